//! Board state: accepted cards, rejections, and the observations derived
//! from them.

pub mod state;

pub use state::{BoardSlot, BoardState, IllegalObservation};

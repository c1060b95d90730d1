//! Card model: ranks, suits, colors, cards, and characteristic tags.
//!
//! ## Key Types
//!
//! - `Rank`: A..K in canonical order, with boundary-checked steps
//! - `Suit` / `Color`: fixed total orders C < D < H < S and Black < Red
//! - `Card`: immutable rank + suit, ordered by suit then rank
//! - `Characteristic`: one of the five derived tags every card carries

pub mod card;
pub mod characteristic;
pub mod rank;
pub mod suit;

pub use card::Card;
pub use characteristic::{Characteristic, CharacteristicKind, CharacteristicSet, Parity, Royalty};
pub use rank::Rank;
pub use suit::{Color, Suit};

//! Rule expressions: the symbolic predicate language over card windows.
//!
//! ## Key Types
//!
//! - `Operator`: closed set of operator kinds with fixed arity
//! - `Slot`: the `previous2` / `previous` / `current` window positions
//! - `Value`: cards, card properties, and truth values produced by evaluation
//! - `ExpressionTree`: an immutable, arity-checked rule
//! - `CardWindow`: the cards a rule is evaluated against
//!
//! Rules are written in prefix call notation:
//!
//! ```
//! use eleusis::expr::{CardWindow, ExpressionTree};
//!
//! let rule = ExpressionTree::parse("equal(suit(previous), suit(current))").unwrap();
//! let window = CardWindow::pair("2H".parse().unwrap(), "9H".parse().unwrap());
//! assert!(rule.holds(&window).unwrap());
//! ```

pub mod eval;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod tree;
pub mod value;

pub use eval::{evaluate, CardWindow};
pub use operator::{Operator, Slot};
pub use parser::Parser;
pub use tree::{Expr, ExpressionTree, Node};
pub use value::Value;

//! Formula evaluation and benchmark classification engine.
//!
//! The core of the quality-indicator tracker: given an indicator mapping
//! and raw numeric inputs, validate the inputs, compute a percentage, and
//! classify it against the mapping's benchmark thresholds. Everything in
//! this crate is a pure, synchronous function of its arguments - no I/O,
//! no shared state, safe to call concurrently across requests.

pub mod classify;
pub mod error;
pub mod evaluate;
pub mod expr;
pub mod validate;

pub use classify::classify;
pub use error::{CalcError, InputField, Result};
pub use evaluate::{CompiledFormula, evaluate, evaluate_result};
pub use expr::{BinOp, Expr};
pub use validate::{ValidatedInput, validate};

//! Per-answer scoring: points, combo multiplier and star rating.
//!
//! Everything here is a pure function of its inputs. Session totals live in
//! [`ScoreState`], which only the session engine mutates.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;

//! Engine constants and the level curve.

#![allow(unused_imports)]

pub mod clock;
pub mod constants;
pub mod leveling;

pub use clock::*;
pub use constants::*;
pub use leveling::*;

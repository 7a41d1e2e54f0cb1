//! Mathematical utilities: least squares and numeric inversion.

pub mod inverse;
pub mod ols;

pub use inverse::*;
pub use ols::*;

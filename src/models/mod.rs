//! Growth model implementations.
//!
//! Models are implemented as small, pure functions so that fitting and code
//! generation can stay generic over `Complexity`.

pub mod model;

pub use model::*;

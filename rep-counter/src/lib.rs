//! Pose-based exercise repetition counting.

mod common;

pub mod angle;
pub mod counter;
pub mod error;
pub mod exercise;
pub mod form;
pub mod pose;
pub mod tracker;

pub use angle::*;
pub use counter::*;
pub use error::*;
pub use exercise::*;
pub use form::*;
pub use pose::*;
pub use tracker::*;

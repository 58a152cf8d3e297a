//! Multi-model object detection ensemble.
//!
//! Detections produced by several independent detectors on the same image are
//! grouped by greedy, anchor-based, same-class IoU matching. Each group is
//! reported as a [ConsensusDetection] whose confidence is the weighted vote of
//! its members.

mod common;

pub mod consensus;
pub mod detection;
pub mod ensemble;
pub mod error;
pub mod source;
pub mod summary;
pub mod weights;

pub use consensus::*;
pub use detection::*;
pub use ensemble::*;
pub use error::*;
pub use source::*;
pub use summary::*;
pub use weights::*;

pub use bbox::{Rect, RectFloat, RectNum, TLBR};
pub use label::Label;

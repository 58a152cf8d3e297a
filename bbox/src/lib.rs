//! Axis-aligned bounding boxes in image coordinates.
//!
//! [TLBR] stores the top, left, bottom and right edges. Detectors speak in
//! `[x1, y1, x2, y2]` corners, see [XYXY_] and [TLBR::try_from_xyxy].

mod common;

pub mod into_tlbr;
pub mod rect;
pub mod tlbr;

pub use into_tlbr::*;
pub use rect::*;
pub use tlbr::*;

//! Class-labeled rectangles.

use bbox::{Rect, RectFloat};
use num_traits::Float;

/// A rectangle annotated with a class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label<R, C>
where
    R: Rect,
{
    #[cfg_attr(feature = "serde", serde(rename = "bbox"))]
    pub rect: R,
    pub class: C,
}

impl<R, C> Label<R, C>
where
    R: Rect,
{
    pub fn new(rect: R, class: C) -> Self {
        Self { rect, class }
    }

    pub fn same_class<R2>(&self, other: &Label<R2, C>) -> bool
    where
        R2: Rect,
        C: PartialEq,
    {
        self.class == other.class
    }
}

impl<R, C> Label<R, C>
where
    R: Rect,
    R::Type: Float,
    C: PartialEq,
{
    /// IoU against another label of the same class, or `None` when the
    /// classes differ.
    pub fn class_iou_with<R2>(&self, other: &Label<R2, C>) -> Option<R::Type>
    where
        R2: Rect<Type = R::Type>,
    {
        self.same_class(other)
            .then(|| self.rect.iou_with(&other.rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bbox::TLBR;

    #[test]
    fn class_iou_requires_matching_class() {
        let apple = Label::new(TLBR::from_xyxy([0.0, 0.0, 10.0, 10.0]), "apple");
        let apple2 = Label::new(TLBR::from_xyxy([0.0, 0.0, 10.0, 5.0]), "apple");
        let banana = Label::new(TLBR::from_xyxy([0.0, 0.0, 10.0, 10.0]), "banana");

        assert_abs_diff_eq!(apple.class_iou_with(&apple2).unwrap(), 0.5);
        assert_eq!(apple.class_iou_with(&banana), None);
        assert!(!apple.same_class(&banana));
    }
}

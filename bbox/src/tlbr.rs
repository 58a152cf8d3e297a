use super::Rect;
use crate::common::*;

/// Bounding box in TLBR format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Build a box from `[x1, y1, x2, y2]` pixel corners.
    pub fn try_from_xyxy(xyxy: [T; 4]) -> Result<Self> {
        let [x1, y1, x2, y2] = xyxy;
        Self::try_from_tlbr([y1, x1, y2, x2])
    }

    /// Build a box from `[x1, y1, x2, y2]` pixel corners.
    ///
    /// # Panics
    /// Panics if `x2 < x1` or `y2 < y1`.
    pub fn from_xyxy(xyxy: [T; 4]) -> Self {
        Self::try_from_xyxy(xyxy).unwrap()
    }

    pub fn x1(&self) -> T {
        self.l
    }

    pub fn y1(&self) -> T {
        self.t
    }

    pub fn x2(&self) -> T {
        self.r
    }

    pub fn y2(&self) -> T {
        self.b
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self { t, l, b, r })
    }

    fn try_from_tlhw(tlhw: [Self::Type; 4]) -> Result<Self> {
        let [t, l, h, w] = tlhw;
        let b = t + h;
        let r = l + w;
        Self::try_from_tlbr([t, l, b, r])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RectNum;

    #[test]
    fn xyxy_maps_onto_tlbr() {
        let rect = TLBR::from_xyxy([1, 2, 5, 9]);
        assert_eq!(rect.tlbr(), [2, 1, 9, 5]);
        assert_eq!(rect.xyxy(), [1, 2, 5, 9]);
        assert_eq!((rect.h(), rect.w()), (7, 4));
        assert_eq!(rect.area(), 28);
    }

    #[test]
    fn reversed_corners_are_rejected() {
        assert!(TLBR::try_from_xyxy([5.0, 0.0, 1.0, 4.0]).is_err());
        assert!(TLBR::try_from_xyxy([0.0, 5.0, 1.0, 4.0]).is_err());
        assert!(TLBR::try_from_tlhw([0.0, 0.0, -1.0, 4.0]).is_err());
    }

    #[test]
    fn tlhw_constructor() {
        let rect = TLBR::try_from_tlhw([10.0, 20.0, 5.0, 8.0]).unwrap();
        assert_eq!(rect.xyxy(), [20.0, 10.0, 28.0, 15.0]);
    }
}

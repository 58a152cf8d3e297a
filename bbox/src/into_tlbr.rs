use crate::{common::*, rect::Rect, TLBR};

/// Unchecked bounding box in `[x1, y1, x2, y2]` corner order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XYXY_<T>(pub [T; 4]);

impl<T> TryFrom<XYXY_<T>> for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Error = Error;

    fn try_from(from: XYXY_<T>) -> Result<Self, Self::Error> {
        Self::try_from(&from)
    }
}

impl<T> TryFrom<&XYXY_<T>> for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Error = Error;

    fn try_from(from: &XYXY_<T>) -> Result<Self, Self::Error> {
        let XYXY_([x1, y1, x2, y2]) = *from;
        Self::try_from_tlbr([y1, x1, y2, x2])
    }
}

impl<T> From<&TLBR<T>> for XYXY_<T>
where
    T: Copy,
{
    fn from(from: &TLBR<T>) -> Self {
        let TLBR { t, l, b, r } = *from;
        Self([l, t, r, b])
    }
}

impl<T> From<TLBR<T>> for XYXY_<T>
where
    T: Copy,
{
    fn from(from: TLBR<T>) -> Self {
        (&from).into()
    }
}

#[cfg(feature = "serde")]
mod with_serde {
    use super::*;
    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    /// Serialized as the `[x1, y1, x2, y2]` array detectors emit.
    impl<T> Serialize for TLBR<T>
    where
        T: Copy + Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            XYXY_::from(self).0.serialize(serializer)
        }
    }

    impl<'de, T> Deserialize<'de> for TLBR<T>
    where
        T: Copy + Num + PartialOrd + Deserialize<'de>,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let xyxy = <[T; 4]>::deserialize(deserializer)?;
            TLBR::try_from(XYXY_(xyxy)).map_err(|err| D::Error::custom(format!("{:#}", err)))
        }
    }
}

pub use bbox::{RectNum, TLBR};
pub use indexmap::{IndexMap, IndexSet};
pub use itertools::{izip, Itertools as _};
pub use label::Label;
pub use noisy_float::prelude::*;
pub use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
pub use std::{
    borrow::Borrow,
    fmt::{self, Display},
    path::{Path, PathBuf},
};
pub use tracing::{debug, trace, warn};

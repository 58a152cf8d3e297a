pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};
pub use tracing::{debug, info};

pub mod config;
pub mod error;
pub mod labels;
pub mod series;

pub use config::{AlignmentPolicy, Config};
pub use error::*;
pub use labels::labels_from_qualifiers;
pub use series::{FlagSeries, Timestamp};

pub mod error;
pub mod policy;
pub mod record;
pub mod types;

#[cfg(feature = "wellness")]
pub mod wellness;

#[cfg(feature = "roster")]
pub mod roster;

pub use error::{ErrorKind, FinactiveError};
pub use policy::ScoringPolicy;
pub use record::{ClientRecord, RecordField};
pub use types::*;

/// Standard result type for all finactive operations
pub type FinactiveResult<T> = Result<T, FinactiveError>;

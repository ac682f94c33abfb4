pub mod combine;
pub mod error;
pub mod tidy;

pub use combine::{CombinationPlan, CombinedTable, combine, plan_groups};
pub use error::{Result, TransformError};
pub use tidy::tidy;

// Pick tables
// One ordered, identifier-keyed table per picking method, with CSV
// persistence at the `Name`/`marked_point` boundary

pub mod set;
pub mod storage;
pub mod types;

pub use set::{PickSet, PickSetError};
pub use storage::PickStoreError;
pub use types::{Pick, PickSource, SENTINEL};

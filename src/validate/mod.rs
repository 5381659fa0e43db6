// Residual validation
// Joins independently produced pick tables, flags disagreements, and
// exposes a cursor for the external review surface

pub mod report;
pub mod residual;
pub mod review;

pub use report::{ReportError, ResidualReport};
pub use residual::{validate, ResidualRecord};
pub use review::{ReviewCursor, ReviewError, ReviewItem};

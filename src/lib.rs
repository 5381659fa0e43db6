// Seispick - Seismic onset picking and residual validation
// Module declarations

pub mod detect;
pub mod picks;
pub mod session;
pub mod trace;
pub mod validate;

pub use detect::{run_batch, Detector, NoiseConfig, StaLtaConfig};
pub use picks::{Pick, PickSet, PickSource, PickStoreError, SENTINEL};
pub use session::{LabelSession, SessionError};
pub use trace::{MemoryTraceSource, Trace, TraceError, TraceId, TraceSource};
pub use validate::{
    validate, ResidualRecord, ResidualReport, ReportError, ReviewCursor, ReviewError, ReviewItem,
};

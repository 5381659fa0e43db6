// Trace module
// Waveform container, canonical trace identifiers, and the loader seam

pub mod ident;
pub mod source;
pub mod types;

pub use ident::TraceId;
pub use source::{MemoryTraceSource, TraceSource};
pub use types::{Trace, TraceError};

//! Order workflow engine: the status progression a repair job moves through,
//! scan-code resolution, and barcode assignment. Everything here is written
//! against the [`repository::OrderStore`] seam so the HTTP services and the
//! in-memory test store share one code path.

pub mod barcode;
pub mod engine;
pub mod repository;
pub mod status;

pub use engine::{ScanResolution, apply_status, resolve_scan};
pub use repository::{MemoryOrderStore, OrderStore};
pub use status::{ClosedBehavior, OrderStatus, TransitionRule, WorkflowPolicy};

//! Session, approval, and recurring-order lifecycle management.
//!
//! All registries are explicit objects holding an owned map, constructed once
//! at process start and passed by handle to every component that needs them.
//! Every registry operation is atomic and non-suspending; sequences that span
//! an external call re-validate their entries after resuming.

pub mod approvals;
pub mod error;
pub mod orders;
pub mod scheduler;
pub mod sessions;

pub use approvals::PendingApprovals;
pub use error::{RegistryError, RegistryResult};
pub use orders::OrderRegistry;
pub use scheduler::{OrderScheduler, DEFAULT_ORDER_INTERVAL};
pub use sessions::SessionRegistry;

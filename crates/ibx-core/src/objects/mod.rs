//! Typed WAPI objects
//!
//! - [`RecordA`]: DNS A record (`record:a`)
//! - [`Ea`]: Extensible attributes attached to any managed object

pub mod ea;
pub mod record_a;

pub use ea::{Ea, EaValue};
pub use record_a::{AddressSpec, RecordA, view_from_reference};

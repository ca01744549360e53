// # ibx-core
//
// Typed object management for DNS A records over the appliance's WAPI
// configuration interface.
//
// ## Architecture Overview
//
// - **WapiObject**: Trait describing a resource kind (object type, return fields)
// - **Connector**: Trait for the four primitive remote operations, generic over the resource kind
// - **QueryParams**: Search filter plus return-field selection passed to a connector
// - **RecordA / Ea**: The A-record entity and its extensible attributes
// - **ObjectManager**: Validates lifecycle requests, builds entities, delegates to a connector
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Object mapping is separate from transport
// 2. **Typed Seams**: Connectors are generic over the entity type, no dynamic "any object"
// 3. **Errors Pass Through**: Connector errors reach the caller unchanged
// 4. **Library-First**: All functionality is usable as a library; `ibxctl` is a thin wrapper

pub mod config;
pub mod error;
pub mod object_manager;
pub mod objects;
pub mod query;
pub mod traits;

// Re-export core types for convenience
pub use config::{ConnectorConfig, ManagerConfig};
pub use error::{Error, Result};
pub use object_manager::{ARecordUpdate, NewARecord, ObjectManager};
pub use objects::{AddressSpec, Ea, EaValue, RecordA};
pub use query::QueryParams;
pub use traits::{Connector, WapiObject};

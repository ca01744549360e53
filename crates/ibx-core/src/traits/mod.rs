//! Core traits for the object-management layer
//!
//! This module defines the abstract interfaces that implementations must follow.
//!
//! - [`WapiObject`]: A typed resource the remote system stores (e.g. `record:a`)
//! - [`Connector`]: Primitive create/get/update/delete operations against the remote system

pub mod connector;
pub mod wapi_object;

pub use connector::Connector;
pub use wapi_object::WapiObject;

// # Connector Trait
//
// Defines the four primitive operations the object manager delegates to.
//
// ## Implementations
//
// - HTTP/WAPI: `ibx-connector-wapi` crate
// - Test doubles: `ibx-core/tests/common`
//
// ## Usage
//
// ```rust,ignore
// use ibx_core::{Connector, QueryParams, RecordA};
//
// async fn show(connector: &impl Connector, reference: &str) -> ibx_core::Result<()> {
//     let record: RecordA = connector
//         .get_object(reference, &QueryParams::new(false))
//         .await?;
//     println!("{} -> {}", record.name, record.ipv4addr);
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::query::QueryParams;
use crate::traits::WapiObject;

/// Trait for connector implementations
///
/// The operations are generic over the entity type instead of accepting
/// "any object": each resource kind gets its own statically typed operation
/// set through [`WapiObject`].
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks. The
/// object manager adds no locking of its own, so sharing a manager between
/// tasks is exactly as safe as sharing its connector.
///
/// ## Allowed Capabilities
/// - ✅ Perform one API call per operation
/// - ✅ Map remote failures onto [`crate::Error`] variants
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off (callers decide)
/// - ❌ Cache objects between calls
/// - ❌ Interpret allocation directives locally (the remote system resolves them)
#[async_trait]
pub trait Connector: Send + Sync {
    /// Create an object
    ///
    /// # Returns
    ///
    /// - `Ok(T)`: The object as stored by the remote system, including its
    ///   server-populated fields and new reference
    /// - `Err(Error)`: If the remote system rejected the object
    async fn create_object<T: WapiObject>(&self, object: &T) -> Result<T, crate::Error>;

    /// Fetch a single object by its reference
    ///
    /// # Returns
    ///
    /// - `Ok(T)`: The object
    /// - `Err(Error)`: If it does not exist or the caller lacks access
    async fn get_object<T: WapiObject>(
        &self,
        reference: &str,
        params: &QueryParams,
    ) -> Result<T, crate::Error>;

    /// Search objects of type `T` matching the filter
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<T>)`: All matches in the order the remote system reported them
    ///   (possibly empty)
    /// - `Err(Error)`: If the search itself failed
    async fn get_objects<T: WapiObject>(&self, params: &QueryParams)
    -> Result<Vec<T>, crate::Error>;

    /// Replace the writable fields of the object identified by `reference`
    ///
    /// # Returns
    ///
    /// - `Ok(T)`: The updated object. Its reference may differ from the input
    ///   when key fields (such as the address) changed.
    /// - `Err(Error)`: If the update was rejected
    async fn update_object<T: WapiObject>(
        &self,
        object: &T,
        reference: &str,
    ) -> Result<T, crate::Error>;

    /// Delete the object identified by `reference`
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The reference of the deleted object, as reported remotely
    /// - `Err(Error)`: If the delete was rejected
    async fn delete_object(&self, reference: &str) -> Result<String, crate::Error>;
}

// # WAPI Object Trait
//
// Describes a resource kind the appliance stores, so a `Connector` can
// address it without knowing anything else about it.
//
// ## Implementations
//
// - `record:a`: [`crate::objects::RecordA`]

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A typed resource managed through the WAPI interface
///
/// Implementors serialize to the JSON body the remote system expects and
/// deserialize from the JSON it returns. Fields listed in
/// [`READ_ONLY_FIELDS`](WapiObject::READ_ONLY_FIELDS) are carried in the
/// object but removed from request bodies; the reference travels in the URL
/// path instead.
pub trait WapiObject: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// WAPI object type name used as the collection path (e.g. `record:a`)
    const OBJECT_TYPE: &'static str;

    /// Fields requested on top of the server's basic field set
    const RETURN_FIELDS: &'static [&'static str];

    /// Fields the server populates and rejects on create/update
    const READ_ONLY_FIELDS: &'static [&'static str] = &["_ref"];

    /// Opaque reference assigned by the remote system; empty until created or fetched
    fn reference(&self) -> &str;

    /// JSON body for create/update requests, with read-only fields removed
    fn to_request_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut body = serde_json::to_value(self)?;
        if let Some(fields) = body.as_object_mut() {
            for field in Self::READ_ONLY_FIELDS {
                fields.remove(*field);
            }
        }
        Ok(body)
    }
}

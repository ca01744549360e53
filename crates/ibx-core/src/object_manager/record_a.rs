// # A-record lifecycle
//
// Create, read, update and delete DNS A records through the connector.
//
// ## Address handling
//
// A record's `ipv4addr` holds either a literal address or an allocation
// directive (`func:nextavailableip:<cidr>,<network view>`) that the remote
// system resolves when it stores the record. A literal address always wins
// over a CIDR when both are supplied.
//
// ## Update is read-then-write
//
// `update_a_record` fetches the current record first and only then sends the
// update. The two calls are not atomic; a concurrent writer between them is
// neither detected nor prevented here.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::object_manager::ObjectManager;
use crate::objects::record_a::DEFAULT_VIEW;
use crate::objects::{AddressSpec, Ea, RecordA, view_from_reference};
use crate::query::QueryParams;
use crate::traits::Connector;

/// Message of the validation error raised when a lookup lacks identifying fields
pub const GET_A_RECORD_REQUIRED: &str =
    "DNS view, IPv4 address and record name are required to retrieve a unique A record";

/// Arguments for creating an A record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewARecord {
    /// Network view the allocation directive is scoped to
    pub network_view: String,
    /// DNS view the record is created in
    pub dns_view: String,
    /// Fully qualified record name
    pub name: String,
    /// Network to allocate from when no literal address is given
    pub cidr: Option<String>,
    /// Literal address; takes precedence over `cidr`
    pub ipv4_addr: Option<String>,
    pub ttl: u32,
    pub use_ttl: bool,
    pub comment: String,
    pub ea: Ea,
}

/// Arguments for updating an A record
///
/// `name`, `ttl`, `use_ttl`, `comment` and `ea` replace the stored values
/// wholesale. An empty `name` is sent as-is: pass the current name to keep it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ARecordUpdate {
    pub name: String,
    /// New literal address; takes precedence over `cidr`
    pub ipv4_addr: Option<String>,
    /// Network to allocate a new address from
    pub cidr: Option<String>,
    /// Network view for the allocation; defaults to the view in the record's reference
    pub network_view: Option<String>,
    pub ttl: u32,
    pub use_ttl: bool,
    pub comment: String,
    pub ea: Ea,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl<C: Connector> ObjectManager<C> {
    /// Create an A record
    ///
    /// Without a literal address the record asks the remote system for the
    /// next free address of `cidr` within `network_view`.
    ///
    /// # Returns
    ///
    /// - `Ok(RecordA)`: The record as stored remotely (zone and reference set)
    /// - `Err(Error::InvalidInput)`: Neither an address nor a CIDR was given
    /// - `Err(Error)`: Any connector error, unchanged
    pub async fn create_a_record(&self, request: NewARecord) -> Result<RecordA> {
        let address = match (non_empty(request.ipv4_addr), non_empty(request.cidr)) {
            (Some(address), _) => AddressSpec::Literal(address),
            (None, Some(cidr)) => {
                let network_view = if request.network_view.is_empty() {
                    DEFAULT_VIEW.to_string()
                } else {
                    request.network_view
                };
                AddressSpec::next_available(cidr, network_view)
            }
            (None, None) => {
                return Err(Error::invalid_input(
                    "an IPv4 address or a CIDR to allocate from is required to create an A record",
                ));
            }
        };

        let record = RecordA {
            view: request.dns_view,
            name: request.name,
            ipv4addr: address.to_string(),
            ttl: request.ttl,
            use_ttl: request.use_ttl,
            comment: request.comment,
            ea: request.ea,
            ..Default::default()
        };

        tracing::debug!(
            "Creating A record {} -> {} in view {}",
            record.name,
            record.ipv4addr,
            record.view
        );
        self.connector.create_object(&record).await
    }

    /// Look up the A record identified by view, name and address
    ///
    /// All three arguments are required; a missing one fails with
    /// [`Error::Validation`] before the connector is contacted.
    ///
    /// # Returns
    ///
    /// - `Ok(RecordA)`: The matching record. If the remote system reports
    ///   several, the first one is returned.
    /// - `Err(Error::NotFound)`: No record matched
    /// - `Err(Error)`: Any connector error, unchanged
    pub async fn get_a_record(&self, dns_view: &str, name: &str, ipv4_addr: &str) -> Result<RecordA> {
        if dns_view.is_empty() || name.is_empty() || ipv4_addr.is_empty() {
            return Err(Error::validation(GET_A_RECORD_REQUIRED));
        }

        let params = QueryParams::new(false)
            .with_field("view", dns_view)
            .with_field("name", name)
            .with_field("ipv4addr", ipv4_addr);

        tracing::debug!("Looking up A record {} ({}) in view {}", name, ipv4_addr, dns_view);
        let records: Vec<RecordA> = self.connector.get_objects(&params).await?;

        if records.len() > 1 {
            tracing::warn!(
                "{} A records match {} ({}) in view {}, using the first",
                records.len(),
                name,
                ipv4_addr,
                dns_view
            );
        }

        records.into_iter().next().ok_or_else(|| {
            Error::not_found(format!(
                "A record {} ({}) in view {}",
                name, ipv4_addr, dns_view
            ))
        })
    }

    /// Fetch an A record by its reference
    pub async fn get_a_record_by_ref(&self, reference: &str) -> Result<RecordA> {
        tracing::debug!("Fetching A record {}", reference);
        self.connector
            .get_object(reference, &QueryParams::new(false))
            .await
    }

    /// Update the A record identified by `reference`
    ///
    /// The current record is fetched first; if that fails its error is
    /// returned and nothing is sent. The new address is, in order of
    /// preference: the literal `ipv4_addr`, an allocation from `cidr`, or the
    /// address the record already has.
    ///
    /// # Returns
    ///
    /// - `Ok(RecordA)`: The updated record. Its reference is the one the
    ///   remote system issued for it, which changes when the address does.
    /// - `Err(Error)`: The fetch or update error, unchanged
    pub async fn update_a_record(&self, reference: &str, update: ARecordUpdate) -> Result<RecordA> {
        let current: RecordA = self
            .connector
            .get_object(reference, &QueryParams::new(false))
            .await?;

        let address = match (non_empty(update.ipv4_addr), non_empty(update.cidr)) {
            (Some(address), _) => AddressSpec::Literal(address),
            (None, Some(cidr)) => {
                let network_view = non_empty(update.network_view).unwrap_or_else(|| {
                    view_from_reference(reference)
                        .map(Cow::into_owned)
                        .unwrap_or_else(|| DEFAULT_VIEW.to_string())
                });
                AddressSpec::next_available(cidr, network_view)
            }
            (None, None) => AddressSpec::Literal(current.ipv4addr),
        };

        let record = RecordA {
            name: update.name,
            ipv4addr: address.to_string(),
            ttl: update.ttl,
            use_ttl: update.use_ttl,
            comment: update.comment,
            ea: update.ea,
            reference: reference.to_string(),
            ..Default::default()
        };

        tracing::debug!(
            "Updating A record {} -> {} ({})",
            record.name,
            record.ipv4addr,
            reference
        );
        self.connector.update_object(&record, reference).await
    }

    /// Delete the A record identified by `reference`
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The reference the connector reports as deleted
    /// - `Err(Error)`: Any connector error, unchanged
    pub async fn delete_a_record(&self, reference: &str) -> Result<String> {
        tracing::debug!("Deleting A record {}", reference);
        self.connector.delete_object(reference).await
    }
}

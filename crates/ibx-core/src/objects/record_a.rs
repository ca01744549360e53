//! DNS A record (`record:a`)

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::objects::Ea;
use crate::traits::WapiObject;

/// Network view assumed when a reference carries no readable view segment
pub const DEFAULT_VIEW: &str = "default";

/// DNS A record: binds a host name to an IPv4 address inside a DNS view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordA {
    /// DNS view the record lives in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub view: String,

    /// Zone the record belongs to; populated by the server
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,

    /// Fully qualified domain name
    #[serde(default)]
    pub name: String,

    /// Literal IPv4 address or an allocation directive (see [`AddressSpec`])
    #[serde(default)]
    pub ipv4addr: String,

    /// Time-to-live in seconds; only honoured when `use_ttl` is set
    #[serde(default)]
    pub ttl: u32,

    /// When false the record inherits the zone's default TTL
    #[serde(default)]
    pub use_ttl: bool,

    #[serde(default)]
    pub comment: String,

    /// Extensible attributes
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,

    /// Opaque server-assigned reference; empty until created or fetched
    #[serde(rename = "_ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
}

impl WapiObject for RecordA {
    const OBJECT_TYPE: &'static str = "record:a";

    const RETURN_FIELDS: &'static [&'static str] = &[
        "extattrs", "comment", "name", "ipv4addr", "ttl", "use_ttl", "view", "zone",
    ];

    const READ_ONLY_FIELDS: &'static [&'static str] = &["_ref", "zone"];

    fn reference(&self) -> &str {
        &self.reference
    }
}

/// Address to place in a record's `ipv4addr` field
///
/// A record either names its address or asks the server to allocate one;
/// the two are never combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSpec {
    /// A literal dotted-quad address, sent unchanged
    Literal(String),
    /// Allocate the next free address of `cidr` within `network_view`
    NextAvailable { cidr: String, network_view: String },
}

impl AddressSpec {
    /// Build a literal address spec
    pub fn literal(address: impl Into<String>) -> Self {
        AddressSpec::Literal(address.into())
    }

    /// Build an allocation directive
    pub fn next_available(cidr: impl Into<String>, network_view: impl Into<String>) -> Self {
        AddressSpec::NextAvailable {
            cidr: cidr.into(),
            network_view: network_view.into(),
        }
    }
}

/// Renders the value sent as `ipv4addr`: the literal itself, or
/// `func:nextavailableip:<cidr>,<network view>` which the server resolves.
impl fmt::Display for AddressSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressSpec::Literal(address) => f.write_str(address),
            AddressSpec::NextAvailable { cidr, network_view } => {
                write!(f, "func:nextavailableip:{},{}", cidr, network_view)
            }
        }
    }
}

/// Extract the view segment that ends a reference
///
/// References look like `record:a/<token>:<address>/<fqdn>/<view>`. Only the
/// last path segment is read, with `%XX` escapes decoded. Returns `None` when
/// the reference has no path or the last segment is empty.
pub fn view_from_reference(reference: &str) -> Option<Cow<'_, str>> {
    let (_, path) = reference.split_once('/')?;
    let (_, last) = path.rsplit_once('/')?;
    if last.is_empty() {
        return None;
    }
    Some(percent_decode(last))
}

fn percent_decode(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') {
        return Cow::Borrowed(segment);
    }

    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            out.push((hex_value(bytes[i + 1]) << 4) | hex_value(bytes[i + 2]));
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }

    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

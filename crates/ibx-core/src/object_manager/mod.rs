//! Object manager
//!
//! The [`ObjectManager`] turns lifecycle requests into typed objects and
//! hands them to a [`Connector`]. It owns no mutable state: besides the
//! connector it keeps only the provisioning-system tag and tenant id it was
//! created with.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ibx_core::{Ea, NewARecord, ObjectManager};
//!
//! let manager = ObjectManager::new(connector, "Docker", "01234567890abcdef");
//! let record = manager
//!     .create_a_record(NewARecord {
//!         network_view: "default".to_string(),
//!         dns_view: "default".to_string(),
//!         name: "web.example.com".to_string(),
//!         cidr: Some("10.0.0.0/24".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("allocated {}", record.ipv4addr);
//! ```

mod record_a;

pub use record_a::{ARecordUpdate, GET_A_RECORD_REQUIRED, NewARecord};

use crate::config::ManagerConfig;
use crate::objects::Ea;
use crate::traits::Connector;

/// Extensible attribute marking objects owned by a cloud platform
pub const EA_CLOUD_API_OWNED: &str = "Cloud API Owned";
/// Extensible attribute naming the provisioning system
pub const EA_CMP_TYPE: &str = "CMP Type";
/// Extensible attribute naming the tenant
pub const EA_TENANT_ID: &str = "Tenant ID";

/// Lifecycle operations for typed WAPI objects, backed by a [`Connector`]
#[derive(Debug)]
pub struct ObjectManager<C> {
    connector: C,
    cmp_type: String,
    tenant_id: String,
}

impl<C: Connector> ObjectManager<C> {
    /// Create a manager
    ///
    /// # Parameters
    ///
    /// - `connector`: Executes the primitive operations
    /// - `cmp_type`: Tag of the provisioning system (e.g. "Docker")
    /// - `tenant_id`: Tenant the managed objects belong to
    pub fn new(connector: C, cmp_type: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            connector,
            cmp_type: cmp_type.into(),
            tenant_id: tenant_id.into(),
        }
    }

    /// Create a manager from configuration
    pub fn from_config(connector: C, config: &ManagerConfig) -> Self {
        Self::new(connector, config.cmp_type.clone(), config.tenant_id.clone())
    }

    /// The underlying connector
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Provisioning-system tag
    pub fn cmp_type(&self) -> &str {
        &self.cmp_type
    }

    /// Tenant id
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Ownership tags for objects created on behalf of this manager's tenant
    pub fn basic_ea(&self) -> Ea {
        Ea::new()
            .with(EA_CLOUD_API_OWNED, "True")
            .with(EA_CMP_TYPE, self.cmp_type.as_str())
            .with(EA_TENANT_ID, self.tenant_id.as_str())
    }
}

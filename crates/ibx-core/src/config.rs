//! Configuration types
//!
//! [`ConnectorConfig`] describes how to reach the appliance's WAPI endpoint,
//! [`ManagerConfig`] carries the immutable identity an
//! [`ObjectManager`](crate::ObjectManager) is created with.

use serde::{Deserialize, Serialize};

/// Connection settings for a WAPI endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Grid master host name or address
    pub host: String,

    /// HTTPS port
    #[serde(default = "default_port")]
    pub port: u16,

    /// WAPI version, without the leading `v` (e.g. "2.11")
    #[serde(default = "default_wapi_version")]
    pub wapi_version: String,

    /// User name for HTTP basic authentication
    pub username: String,

    /// Password for HTTP basic authentication
    /// ⚠️ NEVER log this value
    pub password: String,

    /// Verify the server's TLS certificate
    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,

    /// Per-request timeout (in seconds)
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl ConnectorConfig {
    /// Create a configuration with default port, version, TLS and timeout settings
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            wapi_version: default_wapi_version(),
            username: username.into(),
            password: password.into(),
            ssl_verify: default_ssl_verify(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }

    /// Set the WAPI version
    pub fn with_wapi_version(mut self, version: impl Into<String>) -> Self {
        self.wapi_version = version.into();
        self
    }

    /// Set the HTTPS port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn with_ssl_verify(mut self, ssl_verify: bool) -> Self {
        self.ssl_verify = ssl_verify;
        self
    }

    /// Validate the connector configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.host.is_empty() {
            return Err(crate::Error::config("WAPI host cannot be empty"));
        }
        if self.host.contains("://") || self.host.contains('/') {
            return Err(crate::Error::config(format!(
                "WAPI host must be a bare host name, got: {}",
                self.host
            )));
        }
        if self.username.is_empty() {
            return Err(crate::Error::config("WAPI username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(crate::Error::config("WAPI password cannot be empty"));
        }
        if self.port == 0 {
            return Err(crate::Error::config("WAPI port must be > 0"));
        }

        let version = self.wapi_version.trim_start_matches('v');
        let well_formed = !version.is_empty()
            && version
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
        if !well_formed {
            return Err(crate::Error::config(format!(
                "WAPI version must look like 2.11, got: {}",
                self.wapi_version
            )));
        }

        if self.http_timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }

        Ok(())
    }

    /// Base URL all object paths are appended to, e.g. `https://gm:443/wapi/v2.11/`
    pub fn base_url(&self) -> String {
        format!(
            "https://{}:{}/wapi/v{}/",
            self.host,
            self.port,
            self.wapi_version.trim_start_matches('v')
        )
    }
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("wapi_version", &self.wapi_version)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("ssl_verify", &self.ssl_verify)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

/// Identity an object manager is created with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Tag of the provisioning system driving the appliance ("CMP Type")
    #[serde(default = "default_cmp_type")]
    pub cmp_type: String,

    /// Tenant the managed objects belong to
    pub tenant_id: String,
}

impl ManagerConfig {
    /// Create a manager configuration
    pub fn new(cmp_type: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            cmp_type: cmp_type.into(),
            tenant_id: tenant_id.into(),
        }
    }

    /// Validate the manager configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.cmp_type.is_empty() {
            return Err(crate::Error::config("CMP type cannot be empty"));
        }
        if self.tenant_id.is_empty() {
            return Err(crate::Error::config("Tenant ID cannot be empty"));
        }
        Ok(())
    }
}

fn default_port() -> u16 {
    443
}

fn default_wapi_version() -> String {
    "2.11".to_string()
}

fn default_ssl_verify() -> bool {
    true
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_cmp_type() -> String {
    "ibxctl".to_string()
}

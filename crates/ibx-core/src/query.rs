//! Query parameters passed to a [`Connector`](crate::Connector)
//!
//! A [`QueryParams`] is a set of exact-match search fields plus a flag
//! selecting between the server's basic field set and the full set an object
//! type declares in [`WapiObject::RETURN_FIELDS`](crate::WapiObject::RETURN_FIELDS).

use std::collections::BTreeMap;

/// Query key used to request fields beyond the basic set
pub const RETURN_FIELDS_PLUS: &str = "_return_fields+";

/// Search filter and return-field selection for a connector call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    return_basic_fields: bool,
    search_fields: BTreeMap<String, String>,
}

impl QueryParams {
    /// Create query parameters with no search fields
    ///
    /// When `return_basic_fields` is true only the server's default fields are
    /// returned; otherwise the object type's full return-field list is requested.
    pub fn new(return_basic_fields: bool) -> Self {
        Self {
            return_basic_fields,
            search_fields: BTreeMap::new(),
        }
    }

    /// Create query parameters from an existing field map
    pub fn with_search_fields(
        return_basic_fields: bool,
        search_fields: BTreeMap<String, String>,
    ) -> Self {
        Self {
            return_basic_fields,
            search_fields,
        }
    }

    /// Add an exact-match search field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.search_fields.insert(name.into(), value.into());
        self
    }

    /// Whether only the basic field set is requested
    pub fn return_basic_fields(&self) -> bool {
        self.return_basic_fields
    }

    /// Exact-match search fields
    pub fn search_fields(&self) -> &BTreeMap<String, String> {
        &self.search_fields
    }

    /// Look up one search field
    pub fn search_field(&self, name: &str) -> Option<&str> {
        self.search_fields.get(name).map(String::as_str)
    }

    /// Translate into URL query pairs for an object type with the given return fields
    ///
    /// Search fields come first in key order, followed by `_return_fields+`
    /// unless only basic fields were requested.
    pub fn to_query_pairs(&self, return_fields: &[&str]) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .search_fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if !self.return_basic_fields && !return_fields.is_empty() {
            pairs.push((RETURN_FIELDS_PLUS.to_string(), return_fields.join(",")));
        }

        pairs
    }
}

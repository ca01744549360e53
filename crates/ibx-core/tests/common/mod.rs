//! Test doubles and common utilities for object-manager contract tests
//!
//! [`FakeConnector`] records every call it receives (bodies as the JSON that
//! would go on the wire) and answers with canned responses.

#![allow(dead_code)]

use ibx_core::error::{Error, Result};
use ibx_core::{Connector, Ea, QueryParams, RecordA, WapiObject};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CMP_TYPE: &str = "Docker";
pub const TENANT_ID: &str = "01234567890abcdef01234567890abcdef";

/// A call observed by the fake connector
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { object_type: &'static str, body: Value },
    Get { reference: String, params: QueryParams },
    Search { object_type: &'static str, params: QueryParams },
    Update { reference: String, body: Value },
    Delete { reference: String },
}

#[derive(Default)]
struct Responses {
    create: Option<Result<Value>>,
    get: Option<Result<Value>>,
    search: Option<Result<Vec<Value>>>,
    update: Option<Result<Value>>,
    delete: Option<Result<String>>,
}

/// A connector that records calls and replays canned responses
///
/// Clones share the call log and responses, so a test can keep one handle
/// while the manager owns another.
#[derive(Clone, Default)]
pub struct FakeConnector {
    calls: Arc<Mutex<Vec<Call>>>,
    responses: Arc<Mutex<Responses>>,
    update_call_count: Arc<AtomicUsize>,
    get_call_count: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_result(self, record: &RecordA) -> Self {
        self.responses.lock().unwrap().create = Some(Ok(to_value(record)));
        self
    }

    pub fn with_get_result(self, record: &RecordA) -> Self {
        self.responses.lock().unwrap().get = Some(Ok(to_value(record)));
        self
    }

    pub fn with_get_error(self, err: Error) -> Self {
        self.responses.lock().unwrap().get = Some(Err(err));
        self
    }

    pub fn with_search_results(self, records: &[RecordA]) -> Self {
        self.responses.lock().unwrap().search = Some(Ok(records.iter().map(to_value).collect()));
        self
    }

    pub fn with_search_error(self, err: Error) -> Self {
        self.responses.lock().unwrap().search = Some(Err(err));
        self
    }

    pub fn with_update_result(self, record: &RecordA) -> Self {
        self.responses.lock().unwrap().update = Some(Ok(to_value(record)));
        self
    }

    pub fn with_update_error(self, err: Error) -> Self {
        self.responses.lock().unwrap().update = Some(Err(err));
        self
    }

    pub fn with_delete_result(self, reference: &str) -> Self {
        self.responses.lock().unwrap().delete = Some(Ok(reference.to_string()));
        self
    }

    pub fn with_delete_error(self, err: Error) -> Self {
        self.responses.lock().unwrap().delete = Some(Err(err));
        self
    }

    /// All calls in the order they were made
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made, of any kind
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of get/search calls
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    /// Number of update calls
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    /// Body of the single create call
    pub fn created_body(&self) -> Value {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                Call::Create { body, .. } => Some(body),
                _ => None,
            })
            .expect("create_object was called")
    }

    /// Reference and body of the single update call
    pub fn updated(&self) -> (String, Value) {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                Call::Update { reference, body } => Some((reference, body)),
                _ => None,
            })
            .expect("update_object was called")
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn to_value(record: &RecordA) -> Value {
    serde_json::to_value(record).expect("record serializes")
}

fn unanswered(operation: &str) -> Error {
    Error::Other(format!("FakeConnector has no response for {}", operation))
}

#[async_trait::async_trait]
impl Connector for FakeConnector {
    async fn create_object<T: WapiObject>(&self, object: &T) -> Result<T> {
        self.record(Call::Create {
            object_type: T::OBJECT_TYPE,
            body: object.to_request_body()?,
        });
        let response = self.responses.lock().unwrap().create.take();
        match response {
            Some(Ok(value)) => Ok(serde_json::from_value(value)?),
            Some(Err(err)) => Err(err),
            None => Err(unanswered("create_object")),
        }
    }

    async fn get_object<T: WapiObject>(&self, reference: &str, params: &QueryParams) -> Result<T> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        self.record(Call::Get {
            reference: reference.to_string(),
            params: params.clone(),
        });
        let response = self.responses.lock().unwrap().get.take();
        match response {
            Some(Ok(value)) => Ok(serde_json::from_value(value)?),
            Some(Err(err)) => Err(err),
            None => Err(unanswered("get_object")),
        }
    }

    async fn get_objects<T: WapiObject>(&self, params: &QueryParams) -> Result<Vec<T>> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        self.record(Call::Search {
            object_type: T::OBJECT_TYPE,
            params: params.clone(),
        });
        let response = self.responses.lock().unwrap().search.take();
        match response {
            Some(Ok(values)) => values
                .into_iter()
                .map(|value| serde_json::from_value(value).map_err(Error::from))
                .collect(),
            Some(Err(err)) => Err(err),
            None => Err(unanswered("get_objects")),
        }
    }

    async fn update_object<T: WapiObject>(&self, object: &T, reference: &str) -> Result<T> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.record(Call::Update {
            reference: reference.to_string(),
            body: object.to_request_body()?,
        });
        let response = self.responses.lock().unwrap().update.take();
        match response {
            Some(Ok(value)) => Ok(serde_json::from_value(value)?),
            Some(Err(err)) => Err(err),
            None => Err(unanswered("update_object")),
        }
    }

    async fn delete_object(&self, reference: &str) -> Result<String> {
        self.record(Call::Delete {
            reference: reference.to_string(),
        });
        let response = self.responses.lock().unwrap().delete.take();
        match response {
            Some(result) => result,
            None => Err(unanswered("delete_object")),
        }
    }
}

/// Extensible attributes tagging a record with a virtual machine
pub fn vm_eas() -> Ea {
    Ea::new()
        .with("VM ID", "93f9249abc039284")
        .with("VM Name", "dummyvm")
}

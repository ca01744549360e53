//! Contract Test: A-record creation and lookup
//!
//! Constraints verified:
//! - A literal address is sent exactly as given
//! - An empty address becomes a next-available-IP directive for the CIDR
//! - Lookups lacking view, name or address never reach the connector
//! - The connector's answers are returned unchanged

mod common;

use common::*;
use ibx_core::error::Error;
use ibx_core::object_manager::GET_A_RECORD_REQUIRED;
use ibx_core::{NewARecord, ObjectManager, QueryParams, RecordA};
use serde_json::json;

#[tokio::test]
async fn create_with_literal_address_sends_it_unchanged() {
    let fake_ref = "record:a/ZG5zLmJpbmRfY25h:test/private";
    let stored = RecordA {
        view: "default".to_string(),
        zone: "example.com".to_string(),
        name: "test".to_string(),
        ipv4addr: "53.0.0.1".to_string(),
        ttl: 5,
        use_ttl: true,
        comment: "test comment".to_string(),
        ea: vm_eas(),
        reference: fake_ref.to_string(),
    };
    let conn = FakeConnector::new().with_create_result(&stored);
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    let actual = manager
        .create_a_record(NewARecord {
            network_view: "private".to_string(),
            dns_view: "default".to_string(),
            name: "test".to_string(),
            cidr: Some("53.0.0.0/24".to_string()),
            ipv4_addr: Some("53.0.0.1".to_string()),
            ttl: 5,
            use_ttl: true,
            comment: "test comment".to_string(),
            ea: vm_eas(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(actual, stored);
    assert_eq!(
        conn.created_body(),
        json!({
            "view": "default",
            "name": "test",
            "ipv4addr": "53.0.0.1",
            "ttl": 5,
            "use_ttl": true,
            "comment": "test comment",
            "extattrs": {
                "VM ID": {"value": "93f9249abc039284"},
                "VM Name": {"value": "dummyvm"},
            },
        })
    );
}

#[tokio::test]
async fn create_without_address_allocates_next_available() {
    let fake_ref = "record:a/ZG5zLmJpbmRfY25h:test/53.0.0.1/private";
    let stored = RecordA {
        view: "default".to_string(),
        name: "test".to_string(),
        ipv4addr: "53.0.0.1".to_string(),
        ea: vm_eas(),
        reference: fake_ref.to_string(),
        ..Default::default()
    };
    let conn = FakeConnector::new().with_create_result(&stored);
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    let actual = manager
        .create_a_record(NewARecord {
            network_view: "private".to_string(),
            dns_view: "default".to_string(),
            name: "test".to_string(),
            cidr: Some("53.0.0.0/24".to_string()),
            ipv4_addr: Some(String::new()),
            ttl: 0,
            use_ttl: false,
            comment: String::new(),
            ea: vm_eas(),
        })
        .await
        .expect("create succeeds");

    let body = conn.created_body();
    assert_eq!(body["ipv4addr"], "func:nextavailableip:53.0.0.0/24,private");
    assert_eq!(body["view"], "default");
    assert!(body.get("zone").is_none());
    assert!(body.get("_ref").is_none());

    assert_eq!(actual, stored);
    assert_eq!(actual.ipv4addr, "53.0.0.1");
    assert_eq!(actual.reference, fake_ref);
}

#[tokio::test]
async fn create_without_network_view_scopes_to_default() {
    let conn = FakeConnector::new().with_create_result(&RecordA::default());
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    manager
        .create_a_record(NewARecord {
            dns_view: "default".to_string(),
            name: "host.example.com".to_string(),
            cidr: Some("10.0.0.0/24".to_string()),
            ..Default::default()
        })
        .await
        .expect("create succeeds");

    assert_eq!(
        conn.created_body()["ipv4addr"],
        "func:nextavailableip:10.0.0.0/24,default"
    );
}

#[tokio::test]
async fn create_without_address_or_cidr_is_rejected_locally() {
    let conn = FakeConnector::new();
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    let err = manager
        .create_a_record(NewARecord {
            dns_view: "default".to_string(),
            name: "host.example.com".to_string(),
            cidr: Some(String::new()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(conn.call_count(), 0, "connector must not be contacted");
}

#[tokio::test]
async fn create_propagates_connector_error() {
    let conn = FakeConnector::new();
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    // No canned response: the fake answers with Error::Other
    let err = manager
        .create_a_record(NewARecord {
            dns_view: "default".to_string(),
            name: "host.example.com".to_string(),
            ipv4_addr: Some("10.0.0.5".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(_)));
    assert_eq!(conn.call_count(), 1);
}

#[tokio::test]
async fn get_returns_the_single_match() {
    let record_name = "test.domain.com";
    let ip_addr = "10.0.0.2";
    let found = RecordA {
        view: "default".to_string(),
        name: record_name.to_string(),
        ipv4addr: ip_addr.to_string(),
        reference: format!("record:a/ZG5zLmJpbmRfY25h:{}/default", record_name),
        ..Default::default()
    };
    let conn = FakeConnector::new().with_search_results(std::slice::from_ref(&found));
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    let actual = manager
        .get_a_record("default", record_name, ip_addr)
        .await
        .expect("lookup succeeds");

    assert_eq!(actual, found);
    assert_eq!(
        conn.calls(),
        vec![Call::Search {
            object_type: "record:a",
            params: QueryParams::new(false)
                .with_field("view", "default")
                .with_field("name", record_name)
                .with_field("ipv4addr", ip_addr),
        }]
    );
}

#[tokio::test]
async fn get_without_identifying_fields_never_contacts_connector() {
    let conn = FakeConnector::new();
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    for (view, name, addr) in [
        ("", "test.domain.com", "10.0.0.2"),
        ("default", "", "10.0.0.2"),
        ("default", "test.domain.com", ""),
    ] {
        let err = manager.get_a_record(view, name, addr).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), GET_A_RECORD_REQUIRED);
    }

    assert_eq!(conn.get_call_count(), 0, "connector must not be contacted");
}

#[tokio::test]
async fn get_with_no_match_is_not_found() {
    let conn = FakeConnector::new().with_search_results(&[]);
    let manager = ObjectManager::new(conn, CMP_TYPE, TENANT_ID);

    let err = manager
        .get_a_record("default", "missing.domain.com", "10.0.0.9")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn get_with_several_matches_returns_the_first() {
    let first = RecordA {
        name: "dup.domain.com".to_string(),
        ipv4addr: "10.0.0.3".to_string(),
        view: "default".to_string(),
        reference: "record:a/AAA:10.0.0.3/dup.domain.com/default".to_string(),
        ..Default::default()
    };
    let second = RecordA {
        reference: "record:a/BBB:10.0.0.3/dup.domain.com/default".to_string(),
        ..first.clone()
    };
    let conn = FakeConnector::new().with_search_results(&[first.clone(), second]);
    let manager = ObjectManager::new(conn, CMP_TYPE, TENANT_ID);

    let actual = manager
        .get_a_record("default", "dup.domain.com", "10.0.0.3")
        .await
        .expect("lookup succeeds");

    assert_eq!(actual, first);
}

#[tokio::test]
async fn get_propagates_connector_error() {
    let conn = FakeConnector::new().with_search_error(Error::access_denied("read permission required"));
    let manager = ObjectManager::new(conn, CMP_TYPE, TENANT_ID);

    let err = manager
        .get_a_record("default", "test.domain.com", "10.0.0.2")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AccessDenied(ref msg) if msg == "read permission required"));
}

#[tokio::test]
async fn get_by_ref_requests_full_field_set() {
    let reference = "record:a/ZG5z:10.0.0.2/test.domain.com/default";
    let found = RecordA {
        name: "test.domain.com".to_string(),
        reference: reference.to_string(),
        ..Default::default()
    };
    let conn = FakeConnector::new().with_get_result(&found);
    let manager = ObjectManager::new(conn.clone(), CMP_TYPE, TENANT_ID);

    let actual = manager
        .get_a_record_by_ref(reference)
        .await
        .expect("fetch succeeds");

    assert_eq!(actual, found);
    assert_eq!(
        conn.calls(),
        vec![Call::Get {
            reference: reference.to_string(),
            params: QueryParams::new(false),
        }]
    );
}

#[test]
fn basic_ea_tags_tenant_and_cmp_type() {
    let manager = ObjectManager::new(FakeConnector::new(), CMP_TYPE, TENANT_ID);
    let ea = manager.basic_ea();

    assert_eq!(ea.get("CMP Type").map(ToString::to_string), Some(CMP_TYPE.to_string()));
    assert_eq!(ea.get("Tenant ID").map(ToString::to_string), Some(TENANT_ID.to_string()));
    assert_eq!(ea.get("Cloud API Owned").map(ToString::to_string), Some("True".to_string()));
    assert_eq!(manager.tenant_id(), TENANT_ID);
    assert_eq!(manager.cmp_type(), CMP_TYPE);
}

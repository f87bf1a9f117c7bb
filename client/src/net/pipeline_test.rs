use super::*;
use serde_json::json;

use crate::state::session::{TOKEN_KEY, USER_KEY};
use crate::util::notify::Recorder;
use crate::util::storage::{MemoryStorage, Storage};

struct Harness {
    client: ApiClient,
    storage: Arc<MemoryStorage>,
    recorder: Arc<Recorder>,
}

fn harness(items: &[(&str, &str)]) -> Harness {
    let storage = Arc::new(MemoryStorage::with_items(items.iter().copied()));
    let session = Arc::new(SessionStore::load(storage.clone()));
    let recorder = Arc::new(Recorder::new());
    let client = ApiClient::new(ClientConfig::default(), session, recorder.clone(), recorder.clone()).unwrap();
    Harness { client, storage, recorder }
}

// =============================================================================
// query_pairs
// =============================================================================

#[test]
fn query_pairs_skips_null_and_stringifies_scalars() {
    let pairs = query_pairs(&json!({ "page": 2, "keyword": "os", "open": true, "status": null }));
    assert_eq!(
        pairs,
        vec![
            ("keyword".to_owned(), "os".to_owned()),
            ("open".to_owned(), "true".to_owned()),
            ("page".to_owned(), "2".to_owned()),
        ]
    );
}

#[test]
fn query_pairs_repeats_array_keys() {
    let pairs = query_pairs(&json!({ "ids": [1, null, 3] }));
    assert_eq!(pairs, vec![("ids".to_owned(), "1".to_owned()), ("ids".to_owned(), "3".to_owned())]);
}

#[test]
fn query_pairs_non_object_is_empty() {
    assert!(query_pairs(&json!([1, 2])).is_empty());
    assert!(query_pairs(&Value::Null).is_empty());
}

#[test]
fn api_request_builders_set_method_query_and_body() {
    let req = ApiRequest::get("/courses").with_query(&json!({ "page": 1 })).unwrap();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.query, vec![("page".to_owned(), "1".to_owned())]);
    assert!(req.body.is_none());

    assert!(req.redirect_on_unauthorized);
    assert!(!ApiRequest::post("/auth/logout").without_login_redirect().redirect_on_unauthorized);

    let req = ApiRequest::put("/courses/3").with_json(&json!({ "name": "OS" })).unwrap();
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.body, Some(json!({ "name": "OS" })));
}

// =============================================================================
// bearer_value
// =============================================================================

#[test]
fn bearer_value_formats_token() {
    let value = bearer_value("abc").unwrap();
    assert_eq!(value.to_str().unwrap(), "Bearer abc");
    assert!(value.is_sensitive());
}

#[test]
fn bearer_value_empty_token_is_none() {
    assert!(bearer_value("").is_none());
}

#[test]
fn bearer_value_invalid_header_is_skipped() {
    assert!(bearer_value("bad\ntoken").is_none());
}

// =============================================================================
// classify_response
// =============================================================================

#[test]
fn classify_success_envelope() {
    let inbound = classify_response(200, r#"{"code":0,"data":{"id":1},"message":"ok"}"#);
    assert_eq!(inbound, Inbound::Data(json!({ "id": 1 })));
}

#[test]
fn classify_application_failure() {
    let inbound = classify_response(200, r#"{"code":1,"message":"bad input"}"#);
    let Inbound::Application(err) = inbound else {
        panic!("expected application error");
    };
    assert_eq!(err.payload, json!({ "code": 1, "message": "bad input" }));
}

#[test]
fn classify_unauthorized_ignores_body() {
    assert_eq!(classify_response(401, r#"{"code":0,"data":1}"#), Inbound::Unauthorized);
    assert_eq!(classify_response(401, ""), Inbound::Unauthorized);
}

#[test]
fn classify_http_error_reads_server_message() {
    assert_eq!(
        classify_response(403, r#"{"code":403,"message":"forbidden course"}"#),
        Inbound::Http { status: 403, message: Some("forbidden course".to_owned()) }
    );
    assert_eq!(
        classify_response(502, "<html>bad gateway</html>"),
        Inbound::Http { status: 502, message: None }
    );
}

#[test]
fn classify_non_json_success_is_malformed() {
    assert!(matches!(classify_response(200, "OK"), Inbound::Malformed(_)));
}

// =============================================================================
// settle
// =============================================================================

#[test]
fn settle_data_has_no_side_effects() {
    let h = harness(&[(TOKEN_KEY, "abc")]);
    let data = h.client.settle(Inbound::Data(json!([1, 2]))).unwrap();
    assert_eq!(data, json!([1, 2]));
    assert!(h.recorder.messages().is_empty());
    assert!(h.recorder.paths().is_empty());
    assert!(h.client.session().is_authenticated());
}

#[test]
fn settle_application_error_notifies_once_with_message() {
    let h = harness(&[]);
    let inbound = classify_response(200, r#"{"code":1,"message":"bad input"}"#);
    let err = h.client.settle(inbound).unwrap_err();
    let ClientError::Application(app) = err else {
        panic!("expected application error");
    };
    assert_eq!(app.payload, json!({ "code": 1, "message": "bad input" }));
    assert_eq!(h.recorder.messages(), vec!["bad input".to_owned()]);
}

#[test]
fn settle_application_error_without_message_uses_fallback() {
    let h = harness(&[]);
    let err = h.client.settle(classify_response(200, r#"{"code":7}"#)).unwrap_err();
    assert!(matches!(err, ClientError::Application(_)));
    assert_eq!(h.recorder.messages(), vec![FALLBACK_MESSAGE.to_owned()]);
}

#[test]
fn settle_unauthorized_clears_storage_and_redirects_once() {
    let h = harness(&[(TOKEN_KEY, "abc"), (USER_KEY, r#"{"id":1}"#)]);
    let err = h.client.settle(Inbound::Unauthorized).unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(h.recorder.paths(), vec!["/login".to_owned()]);
    assert!(h.recorder.messages().is_empty());
    assert_eq!(h.storage.get_item(TOKEN_KEY).unwrap(), None);
    assert_eq!(h.storage.get_item(USER_KEY).unwrap(), None);
    assert!(!h.client.session().is_authenticated());
}

#[test]
fn settle_http_error_uses_server_or_generic_message() {
    let h = harness(&[]);
    let err = h
        .client
        .settle(Inbound::Http { status: 500, message: None })
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    let err = h
        .client
        .settle(Inbound::Http { status: 409, message: Some("already enrolled".to_owned()) })
        .unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 409, .. }));
    assert_eq!(
        h.recorder.messages(),
        vec!["Request failed with status 500".to_owned(), "already enrolled".to_owned()]
    );
}

#[test]
fn settle_malformed_notifies_fallback() {
    let h = harness(&[]);
    let err = h.client.settle(Inbound::Malformed("eof".to_owned())).unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(h.recorder.messages(), vec![FALLBACK_MESSAGE.to_owned()]);
}

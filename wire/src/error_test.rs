use super::*;

#[test]
fn from_status_extracts_message_field() {
    let err = RequestError::from_status(404, r#"{"status":"error","message":"Account not found"}"#);
    assert_eq!(
        err,
        RequestError::Status { code: 404, message: Some("Account not found".to_owned()) }
    );
    assert_eq!(err.server_message(), Some("Account not found"));
    assert!(err.is_status());
}

#[test]
fn from_status_tolerates_non_json_body() {
    let err = RequestError::from_status(502, "<html>Bad Gateway</html>");
    assert_eq!(err, RequestError::Status { code: 502, message: None });
    assert_eq!(err.server_message(), None);
}

#[test]
fn network_error_has_no_server_message() {
    let err = RequestError::Network("connection refused".to_owned());
    assert!(!err.is_status());
    assert_eq!(err.server_message(), None);
    assert_eq!(err.to_string(), "network error: connection refused");
}

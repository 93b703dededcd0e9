use crate::RedactedSecret;

/// **VALUE**: Login passwords must never leak through `{:?}` or `{}` formatting.
///
/// **WHY THIS MATTERS**: Login requests are logged at debug level. A derived Debug impl
/// would print the password into the log file.
#[test]
fn given_secret_when_formatted_then_value_is_hidden() {
    let secret = RedactedSecret::new("hunter2");

    assert_eq!(format!("{secret:?}"), "RedactedSecret([REDACTED])");
    assert_eq!(format!("{secret}"), "[REDACTED]");
    assert_eq!(secret.expose(), "hunter2");
    assert_eq!(secret.len(), 7);
}

#[test]
fn given_secret_when_serialized_then_returns_error() {
    let secret = RedactedSecret::new("hunter2");

    let result = serde_json::to_string(&secret);

    assert!(result.is_err(), "Serialization must be refused");
    assert!(result.unwrap_err().to_string().contains("never serialized"));
}

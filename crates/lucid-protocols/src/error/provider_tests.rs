use super::*;

#[test]
fn test_provider_error_not_configured() {
    let err = ProviderError::NotConfigured;
    assert!(err.to_string().contains("not configured"));
}

#[test]
fn test_provider_error_api_error() {
    let err = ProviderError::ApiError {
        status: 500,
        message: "Internal Server Error".to_string(),
    };
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[test]
fn test_provider_error_rate_limited() {
    let err = ProviderError::RateLimited {
        retry_after_seconds: 60,
    };
    assert!(err.to_string().contains("Rate limited"));
    assert!(err.to_string().contains("60"));
}

#[test]
fn test_provider_error_timeout() {
    let err = ProviderError::Timeout(15);
    assert!(err.to_string().contains("Timeout"));
    assert!(err.to_string().contains("15"));
}

#[test]
fn test_from_api_response_quota_message() {
    let err = ProviderError::from_api_response(429, "Resource has been exhausted (e.g. check quota).");
    assert!(matches!(err, ProviderError::QuotaExceeded(_)));
    assert_eq!(err.kind(), ProviderFailureKind::Quota);
}

#[test]
fn test_from_api_response_gemini_invalid_key() {
    let err = ProviderError::from_api_response(
        400,
        "API key not valid. Please pass a valid API key.",
    );
    assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
    assert_eq!(err.kind(), ProviderFailureKind::InvalidKey);
}

#[test]
fn test_from_api_response_openai_invalid_key() {
    let err = ProviderError::from_api_response(401, "Incorrect API key provided: sk-****");
    assert_eq!(err.kind(), ProviderFailureKind::InvalidKey);
}

#[test]
fn test_from_api_response_permission_message() {
    let err = ProviderError::from_api_response(
        403,
        "The caller does not have permission",
    );
    assert!(matches!(err, ProviderError::PermissionDenied(_)));
    assert_eq!(err.kind(), ProviderFailureKind::Permission);
}

#[test]
fn test_from_api_response_status_fallbacks() {
    assert_eq!(
        ProviderError::from_api_response(401, "nope").kind(),
        ProviderFailureKind::InvalidKey
    );
    assert_eq!(
        ProviderError::from_api_response(403, "nope").kind(),
        ProviderFailureKind::Permission
    );
    assert_eq!(
        ProviderError::from_api_response(429, "slow down").kind(),
        ProviderFailureKind::Quota
    );
    assert!(matches!(
        ProviderError::from_api_response(400, "bad"),
        ProviderError::InvalidRequest(_)
    ));
    assert!(matches!(
        ProviderError::from_api_response(502, "bad gateway"),
        ProviderError::ApiError { status: 502, .. }
    ));
}

#[test]
fn test_is_transport() {
    assert!(ProviderError::Network("refused".to_string()).is_transport());
    assert!(ProviderError::Timeout(15).is_transport());
    assert!(!ProviderError::NotConfigured.is_transport());
}

#[test]
fn test_failure_kind_serialization() {
    let json = serde_json::to_string(&ProviderFailureKind::InvalidKey).unwrap();
    assert_eq!(json, "\"invalid_key\"");
}

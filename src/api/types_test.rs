use super::*;

// =============================================================
// ApiMode
// =============================================================

#[test]
fn mode_wire_names_match_service() {
    assert_eq!(ApiMode::Version.as_str(), "VERSION");
    assert_eq!(ApiMode::CsrfToken.as_str(), "CSRFTOKEN");
    assert_eq!(ApiMode::AuthInfo.as_str(), "AUTHINFO");
    assert_eq!(ApiMode::Logout.as_str(), "LOGOUT");
}

#[test]
fn only_auth_info_and_logout_are_privileged() {
    assert!(!ApiMode::Version.is_privileged());
    assert!(!ApiMode::CsrfToken.is_privileged());
    assert!(ApiMode::AuthInfo.is_privileged());
    assert!(ApiMode::Logout.is_privileged());
}

// =============================================================
// ApiError
// =============================================================

#[test]
fn only_404_means_session_gone() {
    assert!(ApiError::Status(404).is_session_gone());
    assert!(!ApiError::Status(401).is_session_gone());
    assert!(!ApiError::Status(410).is_session_gone());
    assert!(!ApiError::Status(500).is_session_gone());
    assert!(!ApiError::Network("reset".to_owned()).is_session_gone());
    assert!(!ApiError::Decode("bad".to_owned()).is_session_gone());
}

#[test]
fn check_status_accepts_2xx_only() {
    assert_eq!(check_status(200), Ok(()));
    assert_eq!(check_status(204), Ok(()));
    assert_eq!(check_status(302), Err(ApiError::Status(302)));
    assert_eq!(check_status(404), Err(ApiError::Status(404)));
}

// =============================================================
// Payload decoding
// =============================================================

#[test]
fn auth_info_reads_integer_max_age() {
    let info: AuthInfo = decode(br#"{"user":"alice","maxAge":30}"#).expect("auth info");
    assert_eq!(info, AuthInfo { user: "alice".to_owned(), max_age: 30 });
}

#[test]
fn auth_info_reads_string_max_age() {
    let info: AuthInfo = decode(br#"{"user":"bob","maxAge":" 600 "}"#).expect("auth info");
    assert_eq!(info.max_age, 600);
}

#[test]
fn auth_info_rejects_negative_max_age() {
    let result: Result<AuthInfo, _> = decode(br#"{"user":"alice","maxAge":-5}"#);
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn auth_info_rejects_missing_user() {
    let result: Result<AuthInfo, _> = decode(br#"{"maxAge":5}"#);
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn version_ignores_extra_fields() {
    let info: VersionInfo = decode(br#"{"version":"2.3","build":"x"}"#).expect("version");
    assert_eq!(info.version, "2.3");
}

#[test]
fn csrf_token_is_trimmed() {
    let token = decode_csrf_token(br#"{"csrfToken":"  abc \n"}"#).expect("token");
    assert_eq!(token.as_str(), "abc");
}

#[test]
fn blank_csrf_token_is_rejected() {
    assert!(matches!(decode_csrf_token(br#"{"csrfToken":"   "}"#), Err(ApiError::Decode(_))));
}

#[test]
fn non_json_body_is_decode_error() {
    let result: Result<VersionInfo, _> = decode(b"<html>");
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

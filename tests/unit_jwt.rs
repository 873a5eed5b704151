use campus_admin::config::jwt::JwtConfig;
use campus_admin::utils::jwt::{ROLE_ADMIN, TokenError, TokenKind, issue_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

fn tamper(token: &str) -> String {
    let mut tampered = token.to_string();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });
    tampered
}

#[test]
fn test_issue_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let result = issue_token(&sub, ROLE_ADMIN, TokenKind::Access, 900, &jwt_config);

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_access_token_round_trip() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Access, 900, &jwt_config).unwrap();
    let claims = verify_token(&token, TokenKind::Access, &jwt_config).unwrap();

    assert_eq!(claims.sub, sub);
    assert_eq!(claims.role, ROLE_ADMIN);
    assert_eq!(claims.kind(), TokenKind::Access);
}

#[test]
fn test_refresh_token_round_trip() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Refresh, 604800, &jwt_config).unwrap();
    let claims = verify_token(&token, TokenKind::Refresh, &jwt_config).unwrap();

    assert_eq!(claims.sub, sub);
    assert_eq!(claims.kind(), TokenKind::Refresh);
}

#[test]
fn test_refresh_token_rejected_as_access() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Refresh, 604800, &jwt_config).unwrap();
    let result = verify_token(&token, TokenKind::Access, &jwt_config);

    assert_eq!(result, Err(TokenError::WrongKind));
}

#[test]
fn test_access_token_rejected_as_refresh() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Access, 900, &jwt_config).unwrap();
    let result = verify_token(&token, TokenKind::Refresh, &jwt_config);

    assert_eq!(result, Err(TokenError::WrongKind));
}

#[test]
fn test_expired_token_is_rejected() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    // -120 keeps the token expired even under the verifier's default leeway
    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Access, -120, &jwt_config).unwrap();
    let result = verify_token(&token, TokenKind::Access, &jwt_config);

    assert_eq!(result, Err(TokenError::Expired));
}

#[test]
fn test_expired_refresh_token_is_rejected() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Refresh, -120, &jwt_config).unwrap();
    let result = verify_token(&token, TokenKind::Refresh, &jwt_config);

    assert_eq!(result, Err(TokenError::Expired));
}

#[test]
fn test_tampered_signature_is_rejected() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Access, 900, &jwt_config).unwrap();
    let result = verify_token(&tamper(&token), TokenKind::Access, &jwt_config);

    assert_eq!(result, Err(TokenError::BadSignature));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(&sub, ROLE_ADMIN, TokenKind::Access, 900, &jwt_config).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    };

    let result = verify_token(&token, TokenKind::Access, &wrong_jwt_config);

    assert_eq!(result, Err(TokenError::BadSignature));
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "",
        "not.enough.parts",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        let result = verify_token(token, TokenKind::Access, &jwt_config);
        assert_eq!(result, Err(TokenError::BadSignature));
    }
}

#[test]
fn test_refresh_token_outlives_access_token() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let access = issue_token(
        &sub,
        ROLE_ADMIN,
        TokenKind::Access,
        jwt_config.access_token_expiry,
        &jwt_config,
    )
    .unwrap();
    let refresh = issue_token(
        &sub,
        ROLE_ADMIN,
        TokenKind::Refresh,
        jwt_config.refresh_token_expiry,
        &jwt_config,
    )
    .unwrap();

    let access_claims = verify_token(&access, TokenKind::Access, &jwt_config).unwrap();
    let refresh_claims = verify_token(&refresh, TokenKind::Refresh, &jwt_config).unwrap();

    assert!(refresh_claims.exp > access_claims.exp);
}

#[test]
fn test_token_expiry_is_set_from_ttl() {
    let jwt_config = get_test_jwt_config();
    let sub = Uuid::new_v4().to_string();

    let token = issue_token(
        &sub,
        ROLE_ADMIN,
        TokenKind::Access,
        jwt_config.access_token_expiry,
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, TokenKind::Access, &jwt_config).unwrap();

    assert!(claims.exp > claims.iat);
    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );
}

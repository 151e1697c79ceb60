//! # Credential & Token Service
//!
//! HS256 JWT 발급과 검증을 담당합니다.
//!
//! - 서명 비밀키는 생성자로 주입됩니다. 전역 상태는 없습니다.
//! - 검증은 HMAC 계열(HS256/HS384/HS512) 알고리즘만 허용합니다. 헤더의
//!   `alg`가 그 외의 값이거나 없으면 서명을 확인하기 전에 거부합니다.
//! - 만료는 `now >= exp`이면 만료로 봅니다 (leeway 없음).
//!
//! 검증은 CPU 연산뿐이며 I/O를 하지 않습니다.
//!
//! ```rust,ignore
//! let tokens = TokenService::new(b"secret", Duration::hours(24));
//! let jwt = tokens.issue(1, "a@b.com", Role::Admin)?;
//! let claims = tokens.validate(&jwt)?;
//! assert_eq!(claims.role, Role::Admin);
//! ```

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::JwtConfig;
use crate::domain::models::auth::Role;
use crate::domain::models::token::Claims;
use crate::errors::{AppError, AppResult, TokenError};

/// Authorization 헤더의 토큰 접두사
pub const BEARER_PREFIX: &str = "Bearer ";

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.set_required_spec_claims(&["exp"]);
        // 만료는 validate_at에서 직접 비교합니다.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes(), Duration::hours(config.expiration_hours))
    }

    /// 현재 시각 기준으로 토큰을 발급합니다.
    pub fn issue(&self, user_id: i64, email: &str, role: Role) -> AppResult<String> {
        self.issue_at(user_id, email, role, Utc::now())
    }

    /// `exp = now + ttl`인 토큰을 HS256으로 서명합니다.
    pub fn issue_at(&self, user_id: i64, email: &str, role: Role, now: DateTime<Utc>) -> AppResult<String> {
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalError("token expiry is out of range".to_string()))?;

        let claims = Claims {
            user_id,
            email: email.to_string(),
            role,
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 현재 시각 기준으로 토큰을 검증합니다.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// 알고리즘, 서명, 클레임 타입, 만료 순으로 검사합니다.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        ensure_hmac_header(token)?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::MissingAlgorithm => TokenError::AlgorithmMismatch,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// `Authorization` 헤더 값에서 토큰을 꺼냅니다. 접두사가 없으면 `None`.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix(BEARER_PREFIX)
}

/// 서명 검증 전에 헤더의 `alg`를 확인합니다.
///
/// `none`처럼 라이브러리가 알지 못하는 값도 형식 오류가 아닌 알고리즘
/// 불일치로 분류하기 위해 헤더를 직접 읽습니다.
fn ensure_hmac_header(token: &str) -> Result<(), TokenError> {
    let encoded = token.split('.').next().unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| TokenError::Malformed)?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

    match header.get("alg").and_then(serde_json::Value::as_str) {
        Some("HS256" | "HS384" | "HS512") => Ok(()),
        _ => Err(TokenError::AlgorithmMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &[u8] = b"token-service-test-secret";

    fn service() -> TokenService {
        TokenService::new(SECRET, Duration::hours(24))
    }

    fn encode_segment(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    fn sign_raw(header: Header, claims: &serde_json::Value, secret: &[u8]) -> String {
        encode(&header, claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    #[test]
    fn test_issue_then_validate_round_trip() {
        let tokens = service();
        let jwt = tokens.issue(1, "a@b.com", Role::Admin).unwrap();
        let claims = tokens.validate(&jwt).unwrap();

        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_expiry_is_exactly_one_ttl_after_issuance() {
        let tokens = service();
        let now = Utc::now();
        let jwt = tokens.issue_at(42, "user@example.com", Role::User, now).unwrap();
        let claims = tokens.validate_at(&jwt, now).unwrap();

        assert_eq!(claims.exp - now.timestamp(), 24 * 60 * 60);
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let tokens = TokenService::new(SECRET, Duration::hours(3_000_000_000));
        let err = tokens.issue(1, "a@b.com", Role::User).unwrap_err();

        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn test_foreign_secret_is_signature_invalid() {
        let other = TokenService::new(b"some-other-secret", Duration::hours(24));
        let jwt = other.issue(1, "a@b.com", Role::User).unwrap();

        assert_eq!(service().validate(&jwt), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service();
        let issued = Utc::now() - Duration::hours(25);
        let jwt = tokens.issue_at(1, "a@b.com", Role::User, issued).unwrap();

        assert_eq!(tokens.validate(&jwt), Err(TokenError::Expired));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let tokens = service();
        let issued = Utc::now();
        let jwt = tokens.issue_at(1, "a@b.com", Role::User, issued).unwrap();

        let just_before = issued + Duration::hours(24) - Duration::seconds(1);
        let exactly = issued + Duration::hours(24);

        assert!(tokens.validate_at(&jwt, just_before).is_ok());
        assert_eq!(tokens.validate_at(&jwt, exactly), Err(TokenError::Expired));
    }

    #[test]
    fn test_non_hmac_algorithm_is_rejected() {
        let payload = encode_segment(&json!({
            "user_id": 1, "email": "a@b.com", "role": "Admin",
            "exp": (Utc::now() + Duration::hours(1)).timestamp()
        }));

        for alg in ["RS256", "ES256", "PS512", "none"] {
            let header = encode_segment(&json!({ "alg": alg, "typ": "JWT" }));
            let jwt = format!("{}.{}.c2lnbmF0dXJl", header, payload);

            assert_eq!(service().validate(&jwt), Err(TokenError::AlgorithmMismatch), "{}", alg);
        }

        let header = encode_segment(&json!({ "typ": "JWT" }));
        let jwt = format!("{}.{}.", header, payload);
        assert_eq!(service().validate(&jwt), Err(TokenError::AlgorithmMismatch));
    }

    #[test]
    fn test_other_hmac_variants_are_accepted() {
        let claims = json!({
            "user_id": 7, "email": "h@b.com", "role": "User",
            "exp": (Utc::now() + Duration::hours(1)).timestamp()
        });
        let jwt = sign_raw(Header::new(Algorithm::HS384), &claims, SECRET);

        assert_eq!(service().validate(&jwt).unwrap().user_id, 7);
    }

    #[test]
    fn test_garbage_is_malformed() {
        for raw in ["", "not-a-token", "a.b.c", "eyJhbGciOiJIUzI1NiJ9"] {
            assert_eq!(service().validate(raw), Err(TokenError::Malformed), "{:?}", raw);
        }
    }

    #[test]
    fn test_claim_types_are_checked() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let bad_claims = [
            json!({ "user_id": 1, "email": "a@b.com", "role": 5, "exp": exp }),
            json!({ "user_id": 1, "email": "a@b.com", "role": "Moderator", "exp": exp }),
            json!({ "user_id": "1", "email": "a@b.com", "role": "User", "exp": exp }),
            json!({ "user_id": 1, "email": "a@b.com", "exp": exp }),
            json!({ "user_id": 1, "email": "a@b.com", "role": "User" }),
        ];

        for claims in bad_claims {
            let jwt = sign_raw(Header::new(Algorithm::HS256), &claims, SECRET);
            assert_eq!(service().validate(&jwt), Err(TokenError::Malformed), "{}", claims);
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("abc.def.ghi"), None);
        assert_eq!(extract_bearer_token("bearer abc"), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
    }
}

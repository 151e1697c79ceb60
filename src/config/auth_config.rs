//! # Authentication Configuration Module
//!
//! Google OAuth 클라이언트, JWT 서명, OAuth 세션 쿠키 등 인증 관련 설정을
//! 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export SESSION_SECRET="at-least-32-bytes-of-random-session-key"
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8888/auth/callback/google"
//! ```
//!
//! ## 선택적 환경 변수
//!
//! ```bash
//! export JWT_EXPIRATION_HOURS="24"
//! export OAUTH_SESSION_MAX_AGE_SECS="2592000"   # 30일
//! export OAUTH_HTTP_TIMEOUT_SECS="10"
//! export BOOTSTRAP_ADMIN_EMAIL="admin@example.com"
//! export BOOTSTRAP_ADMIN_PASSWORD="change-me-please"
//! ```

use crate::config::data_config::{parse_in_range, parse_or};
use crate::config::{EnvLookup, require};
use crate::errors::ConfigError;

/// 세션 쿠키 암호화 키의 최소 길이 (바이트)
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Google OAuth 2.0 클라이언트 설정
///
/// `client_secret`은 토큰 교환 시에만 서버에서 사용되며 로그에 남기지 않습니다.
#[derive(Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Google Cloud Console에 등록된 콜백 URI
    pub redirect_uri: String,
    /// 기본값: `https://accounts.google.com/o/oauth2/auth`
    pub auth_uri: String,
    /// 기본값: `https://oauth2.googleapis.com/token`
    pub token_uri: String,
    /// 기본값: `https://www.googleapis.com/oauth2/v2/userinfo`
    pub userinfo_uri: String,
}

impl GoogleOAuthConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: require(lookup, "GOOGLE_CLIENT_ID")?,
            client_secret: require(lookup, "GOOGLE_CLIENT_SECRET")?,
            redirect_uri: require(lookup, "GOOGLE_REDIRECT_URI")?,
            auth_uri: lookup("GOOGLE_AUTH_URI")
                .unwrap_or_else(|| "https://accounts.google.com/o/oauth2/auth".to_string()),
            token_uri: lookup("GOOGLE_TOKEN_URI")
                .unwrap_or_else(|| "https://oauth2.googleapis.com/token".to_string()),
            userinfo_uri: lookup("GOOGLE_USERINFO_URI")
                .unwrap_or_else(|| "https://www.googleapis.com/oauth2/v2/userinfo".to_string()),
        })
    }
}

/// 토큰 수명 상한 (1년)
const MAX_TOKEN_HOURS: i64 = 24 * 365;
/// 세션 수명 상한 (1년)
const MAX_SESSION_SECS: i64 = 60 * 60 * 24 * 365;
const MAX_HTTP_TIMEOUT_SECS: u64 = 300;

/// JWT 서명 설정
///
/// 비밀키는 시작 시 한 번 로드되어 `TokenService` 생성자로 전달됩니다.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let expiration_hours = parse_in_range(lookup, "JWT_EXPIRATION_HOURS", 24, 1..=MAX_TOKEN_HOURS)?;

        Ok(Self {
            secret: require(lookup, "JWT_SECRET")?,
            expiration_hours,
        })
    }
}

/// OAuth 로그인 왕복 동안 사용하는 임시 세션 설정
#[derive(Clone)]
pub struct OAuthSessionConfig {
    /// 세션 쿠키 암호화 키 (최소 32바이트)
    pub secret: String,
    /// 세션 항목 및 쿠키 수명 (초)
    pub max_age_secs: i64,
    /// 프로바이더 HTTP 호출 타임아웃 (초)
    pub http_timeout_secs: u64,
    /// `Secure` 쿠키 속성 사용 여부
    pub cookie_secure: bool,
}

impl OAuthSessionConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>, production: bool) -> Result<Self, ConfigError> {
        let secret = require(lookup, "SESSION_SECRET")?;
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "SESSION_SECRET",
                reason: format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            });
        }

        let max_age_secs =
            parse_in_range(lookup, "OAUTH_SESSION_MAX_AGE_SECS", 60 * 60 * 24 * 30, 1..=MAX_SESSION_SECS)?;

        Ok(Self {
            secret,
            max_age_secs,
            http_timeout_secs: parse_in_range(lookup, "OAUTH_HTTP_TIMEOUT_SECS", 10, 1..=MAX_HTTP_TIMEOUT_SECS)?,
            cookie_secure: parse_or(lookup, "SESSION_COOKIE_SECURE", production)?,
        })
    }
}

/// 시작 시 생성할 관리자 계정 (선택)
#[derive(Clone)]
pub struct AdminBootstrap {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminBootstrap {
    /// 이메일과 비밀번호가 모두 있을 때만 `Some`
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Option<Self> {
        let email = lookup("BOOTSTRAP_ADMIN_EMAIL")?;
        let password = lookup("BOOTSTRAP_ADMIN_PASSWORD")?;

        Some(Self {
            name: lookup("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
            email,
            password,
        })
    }
}

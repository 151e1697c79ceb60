//! # Configuration Module
//!
//! 환경 변수 기반 설정을 타입이 있는 구조체로 읽어들입니다.
//! 모든 설정은 시작 시 [`AppConfig::from_env`]로 한 번만 로드되며,
//! 필수 값이 없으면 서버는 기동하지 않습니다.
//!
//! - [`data_config`] - 서버, 저장소, 실행 환경, Rate Limiting
//! - [`auth_config`] - JWT, Google OAuth, OAuth 세션
//!
//! 읽기 함수는 모두 `EnvLookup`을 받으므로 테스트에서는 프로세스 환경을
//! 건드리지 않고 `HashMap` 기반 조회 함수를 넘길 수 있습니다.

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use crate::errors::ConfigError;

/// 환경 변수 조회 함수
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 프로세스 환경 변수 조회 (빈 문자열은 미설정으로 취급)
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub(crate) fn require(lookup: EnvLookup<'_>, key: &'static str) -> Result<String, ConfigError> {
    lookup(key).ok_or(ConfigError::Missing(key))
}

/// 애플리케이션 전체 설정
#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
    pub password: PasswordConfig,
    pub jwt: JwtConfig,
    pub google: GoogleOAuthConfig,
    pub oauth_session: OAuthSessionConfig,
    pub admin_bootstrap: Option<AdminBootstrap>,
}

impl AppConfig {
    /// 프로세스 환경에서 설정을 로드합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);
        let password = PasswordConfig::from_lookup(lookup, &environment);
        let oauth_session = OAuthSessionConfig::from_lookup(lookup, environment.is_production())?;

        Ok(Self {
            server: ServerConfig::from_lookup(lookup)?,
            storage: StorageConfig::from_lookup(lookup)?,
            rate_limit: RateLimitConfig::from_lookup(lookup)?,
            password,
            jwt: JwtConfig::from_lookup(lookup)?,
            google: GoogleOAuthConfig::from_lookup(lookup)?,
            oauth_session,
            admin_bootstrap: AdminBootstrap::from_lookup(lookup),
            environment,
        })
    }
}

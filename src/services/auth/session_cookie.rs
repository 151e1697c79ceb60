//! OAuth 세션 쿠키
//!
//! 쿠키에는 세션 ID만 담기며, `SESSION_SECRET`에서 유도한 키로 암호화됩니다.
//! 변조되었거나 다른 키로 만든 쿠키는 읽히지 않습니다.

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};

use crate::config::{MIN_SESSION_SECRET_LEN, OAuthSessionConfig};
use crate::errors::{AppError, AppResult};

pub const SESSION_COOKIE_NAME: &str = "oauth_session";
const SESSION_COOKIE_PATH: &str = "/auth";

pub struct SessionCookies {
    key: Key,
    max_age_secs: i64,
    secure: bool,
}

impl SessionCookies {
    pub fn new(secret: &[u8], max_age_secs: i64, secure: bool) -> AppResult<Self> {
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(AppError::InternalError(format!(
                "session secret must be at least {} bytes",
                MIN_SESSION_SECRET_LEN
            )));
        }

        Ok(Self {
            key: Key::derive_from(secret),
            max_age_secs,
            secure,
        })
    }

    pub fn from_config(config: &OAuthSessionConfig) -> AppResult<Self> {
        Self::new(config.secret.as_bytes(), config.max_age_secs, config.cookie_secure)
    }

    /// 세션 ID를 암호화한 쿠키
    pub fn issue(&self, session_id: &str) -> AppResult<Cookie<'static>> {
        let cookie = Cookie::build(SESSION_COOKIE_NAME, session_id.to_string())
            .path(SESSION_COOKIE_PATH)
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.max_age_secs))
            .finish();

        let mut jar = CookieJar::new();
        jar.private_mut(&self.key).add(cookie);

        jar.get(SESSION_COOKIE_NAME)
            .cloned()
            .ok_or_else(|| AppError::InternalError("session cookie encryption failed".to_string()))
    }

    /// 요청 쿠키를 복호화해 세션 ID를 꺼냅니다.
    pub fn read(&self, req: &HttpRequest) -> Option<String> {
        let cookie = req.cookie(SESSION_COOKIE_NAME)?;

        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        jar.private(&self.key)
            .get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }

    /// 브라우저의 세션 쿠키를 지우는 쿠키
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "")
            .path(SESSION_COOKIE_PATH)
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

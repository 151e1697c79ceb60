//! # Google OAuth 2.0 Identity Provider
//!
//! 인증 코드 교환과 사용자 정보 조회를 담당합니다. 두 HTTP 호출 모두
//! 설정된 타임아웃 안에 끝나지 않으면 `ExternalServiceError`로 실패합니다.
//!
//! ## OAuth 플로우
//!
//! 1. [`IdentityProvider::authorization_url`] - 동의 화면 URL 생성 (`state` 포함)
//! 2. Google이 `code`와 `state`를 붙여 콜백 URI로 리디렉션
//! 3. [`IdentityProvider::exchange`] - `code` → 액세스 토큰 → 사용자 정보

use std::time::Duration;

use async_trait::async_trait;

use crate::config::GoogleOAuthConfig;
use crate::domain::models::oauth::ExternalIdentity;
use crate::domain::models::oauth::google_oauth_model::google_token::GoogleTokenResponse;
use crate::domain::models::oauth::google_oauth_model::google_user::GoogleUserInfo;
use crate::errors::{AppError, AppResult};
use crate::services::auth::login_bridge::IdentityProvider;

pub const GOOGLE_PROVIDER: &str = "google";

pub struct GoogleAuthService {
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

impl GoogleAuthService {
    pub fn new(config: GoogleOAuthConfig, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { config, http })
    }

    async fn exchange_code_for_token(&self, auth_code: &str) -> AppResult<GoogleTokenResponse> {
        let params = [
            ("code", auth_code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패 ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_user_info(&self, access_token: &str) -> AppResult<GoogleUserInfo> {
        let response = self
            .http
            .get(&self.config.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패: {}",
                status
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for GoogleAuthService {
    fn name(&self) -> &'static str {
        GOOGLE_PROVIDER
    }

    fn authorization_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("scope", "openid email profile"),
            ("response_type", "code"),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.auth_uri, query_string)
    }

    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity> {
        let token_response = self.exchange_code_for_token(code).await?;
        let google_user = self.get_user_info(&token_response.access_token).await?;

        if google_user.verified_email == Some(false) {
            return Err(AppError::ExternalServiceError(format!(
                "Google 이메일 미인증: {}",
                google_user.email
            )));
        }

        log::debug!("Google 사용자 확인: {}", google_user.email);
        Ok(google_user.into_identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> GoogleAuthService {
        let config = GoogleOAuthConfig {
            client_id: "client id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8888/auth/callback/google".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_uri: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
        };
        GoogleAuthService::new(config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_authorization_url_is_encoded() {
        let url = service().authorization_url("abc123");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client%20id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8888%2Fauth%2Fcallback%2Fgoogle"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=abc123"));
        assert!(!url.contains("secret"));
    }
}

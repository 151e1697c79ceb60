//! # Google OAuth 사용자 정보 모델
//!
//! `https://www.googleapis.com/oauth2/v2/userinfo` 응답을 역직렬화합니다.
//! 이메일 외의 필드는 scope와 계정 설정에 따라 빠질 수 있으므로 모두
//! 선택적으로 받습니다.

use serde::Deserialize;

use crate::domain::models::oauth::external_identity::ExternalIdentity;

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정 고유 ID
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,

    #[serde(default)]
    pub verified_email: Option<bool>,
}

impl GoogleUserInfo {
    pub fn into_identity(self) -> ExternalIdentity {
        ExternalIdentity {
            provider: "google".to_string(),
            subject: self.id,
            email: self.email,
            name: self.name,
            picture: self.picture,
        }
    }
}

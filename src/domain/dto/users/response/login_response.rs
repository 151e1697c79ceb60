use serde::{Deserialize, Serialize};

use crate::domain::dto::users::response::user_response::UserResponse;

/// 비밀번호 로그인 응답
///
/// `token`은 `"Bearer <jwt>"` 형태로, 그대로 Authorization 헤더에 넣어 쓸 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// OAuth 콜백 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FederatedLoginResponse {
    /// 이메일에 해당하는 로컬 계정이 있음
    Authenticated { user: UserResponse, token: String },
    /// 로컬 계정 없음. 자동 가입은 하지 않습니다.
    RegistrationRequired { message: String },
}

impl FederatedLoginResponse {
    pub fn registration_required() -> Self {
        FederatedLoginResponse::RegistrationRequired {
            message: "registration required".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_required_shape() {
        let json = serde_json::to_value(FederatedLoginResponse::registration_required()).unwrap();
        assert_eq!(json, serde_json::json!({"message": "registration required"}));
    }
}

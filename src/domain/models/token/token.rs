//! JWT 클레임
//!
//! 토큰 페이로드는 `user_id`(정수), `email`, `role`, `exp`(Unix 초) 네 필드로
//! 구성됩니다. 역직렬화 시 타입이 맞지 않거나 필드가 빠지면 토큰은
//! `TokenError::Malformed`로 거부됩니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::auth::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    /// 만료 시각 (Unix timestamp, 초)
    pub exp: i64,
}

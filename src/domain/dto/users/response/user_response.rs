use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::Account;
use crate::domain::models::auth::Role;

/// 클라이언트에 노출되는 계정 정보 (비밀번호 해시 제외)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        let Account {
            id,
            name,
            email,
            role,
            created_at,
            ..
        } = account;

        Self {
            id,
            name,
            email,
            role,
            created_at,
        }
    }
}

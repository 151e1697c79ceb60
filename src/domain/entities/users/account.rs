//! 사용자 계정 엔티티
//!
//! 비밀번호는 bcrypt 해시로만 보관합니다. 클라이언트 응답에는 항상
//! `UserResponse`를 사용하며 엔티티를 직접 직렬화하지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    /// 고유 (저장소에서 유니크 인덱스로 보장)
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// 아직 ID가 할당되지 않은 계정
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewAccount {
    pub fn into_account(self, id: i64, created_at: DateTime<Utc>) -> Account {
        Account {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            created_at,
        }
    }
}

//! 공통 응답 봉투
//!
//! 성공 응답은 `{code, status, data, msg}` 형태를 따르고,
//! 목록 조회는 여기에 `limit`/`offset`이 추가됩니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T> {
    pub code: u16,
    pub status: String,
    pub data: T,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub msg: String,
}

impl<T> Response<T> {
    pub fn ok(data: T, msg: impl Into<String>) -> Self {
        Self {
            code: 200,
            status: "ok".to_string(),
            data,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub code: u16,
    pub status: String,
    pub data: Vec<T>,
    pub limit: i64,
    pub offset: i64,
    pub msg: String,
}

impl<T> PaginatedResponse<T> {
    pub fn ok(data: Vec<T>, limit: i64, offset: i64, msg: impl Into<String>) -> Self {
        Self {
            code: 200,
            status: "ok".to_string(),
            data,
            limit,
            offset,
            msg: msg.into(),
        }
    }
}

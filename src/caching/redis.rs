//! Redis 클라이언트
//!
//! 값은 JSON 문자열로 저장합니다. 연결은 `ConnectionManager`가 재사용하고
//! 끊기면 자동으로 재연결합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};

use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// 연결을 열고 PING으로 서버 가용성을 확인합니다.
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url).map_err(redis_error)?;
        let mut manager = ConnectionManager::new(client).await.map_err(redis_error)?;

        redis::cmd("PING")
            .query_async::<()>(&mut manager)
            .await
            .map_err(redis_error)?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::RedisError(format!("serialization failed: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, seconds)
            .await
            .map_err(redis_error)
    }

    /// 값을 읽으면서 삭제합니다 (`GETDEL`). 같은 키를 두 번 가져갈 수 없습니다.
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get_del(key).await.map_err(redis_error)?;

        value.map(|json| decode(&json)).transpose()
    }
}

fn decode<T: DeserializeOwned>(json: &str) -> AppResult<T> {
    serde_json::from_str(json).map_err(|e| AppError::RedisError(format!("deserialization failed: {}", e)))
}

fn redis_error(e: redis::RedisError) -> AppError {
    AppError::RedisError(e.to_string())
}

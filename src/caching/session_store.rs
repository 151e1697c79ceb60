//! OAuth 로그인 임시 세션 저장소
//!
//! 세션 항목은 쿠키로 전달된 무작위 세션 ID를 키로 저장되며, 읽는 순간
//! 삭제됩니다 (`take`). 만료 여부는 읽을 때 `expires_at`으로 판단하므로
//! 백그라운드 정리 작업이 필요 없습니다.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::caching::redis::RedisClient;
use crate::domain::models::oauth::OAuthSession;
use crate::errors::{AppError, AppResult};

#[async_trait]
pub trait OAuthSessionStore: Send + Sync {
    async fn put(&self, session_id: &str, session: &OAuthSession) -> AppResult<()>;

    /// 항목을 제거하면서 반환합니다. 없거나 `now` 기준으로 만료되었으면 `None`.
    async fn take(&self, session_id: &str, now: DateTime<Utc>) -> AppResult<Option<OAuthSession>>;
}

/// 단일 프로세스용 저장소
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, OAuthSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OAuthSessionStore for InMemorySessionStore {
    async fn put(&self, session_id: &str, session: &OAuthSession) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        // 중단된 로그인 시도가 쌓이지 않도록 쓰기 시점에 만료 항목을 걷어냅니다.
        let now = Utc::now();
        entries.retain(|_, existing| !existing.is_expired_at(now));
        entries.insert(session_id.to_string(), session.clone());

        Ok(())
    }

    async fn take(&self, session_id: &str, now: DateTime<Utc>) -> AppResult<Option<OAuthSession>> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        Ok(entries
            .remove(session_id)
            .filter(|session| !session.is_expired_at(now)))
    }
}

fn poisoned() -> AppError {
    AppError::InternalError("session store lock poisoned".to_string())
}

/// Redis 기반 저장소
///
/// 키에는 세션 ID 원문 대신 SHA-256 해시를 사용합니다. TTL은 Redis에도
/// 걸어 두지만 만료 판단은 저장된 `expires_at` 기준입니다.
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
}

impl RedisSessionStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    fn key(session_id: &str) -> String {
        format!("oauth_session:{:x}", Sha256::digest(session_id.as_bytes()))
    }
}

#[async_trait]
impl OAuthSessionStore for RedisSessionStore {
    async fn put(&self, session_id: &str, session: &OAuthSession) -> AppResult<()> {
        let ttl = session.remaining_secs(Utc::now()).max(1);
        self.redis
            .set_with_expiry(&Self::key(session_id), session, ttl)
            .await
    }

    async fn take(&self, session_id: &str, now: DateTime<Utc>) -> AppResult<Option<OAuthSession>> {
        let session: Option<OAuthSession> = self.redis.take(&Self::key(session_id)).await?;

        Ok(session.filter(|session| !session.is_expired_at(now)))
    }
}

//! # Caching Module
//!
//! Redis 클라이언트와 OAuth 로그인 임시 세션 저장소.

pub mod redis;
pub mod session_store;

pub use session_store::{InMemorySessionStore, OAuthSessionStore, RedisSessionStore};

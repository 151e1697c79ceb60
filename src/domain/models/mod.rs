//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 값들 (인증 주체, 토큰 클레임, OAuth 세션).

pub mod auth;
pub mod oauth;
pub mod token;

//! # Domain Layer
//!
//! - [`entities`] - 저장소에 영속화되는 엔티티 (계정, 태그, neche)
//! - [`models`] - 영속화되지 않는 값 (역할, 토큰 클레임, OAuth 세션)
//! - [`dto`] - HTTP 요청/응답 본문

pub mod dto;
pub mod entities;
pub mod models;

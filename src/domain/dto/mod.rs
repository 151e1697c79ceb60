//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 요청/응답 본문. 요청 DTO는 `validator`로 검증한 뒤 서비스로 넘깁니다.

pub mod common;
pub mod tags;
pub mod users;

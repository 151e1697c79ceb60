//! 미들웨어 모듈
//!
//! ### 접근 제어 (AccessControl)
//! - `Authorization: Bearer <jwt>` 헤더 검증
//! - 라우트 그룹별 단일 역할 요구 (정확히 일치)
//! - 검증된 사용자 정보를 request extensions에 저장
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::domain::models::auth::Role;
//! use crate::middlewares::AccessControl;
//!
//! web::scope("/admin")
//!     .wrap(AccessControl::require(Role::Admin, tokens.clone()))
//!     .service(delete_tag)
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::{AccessControl, authorize};

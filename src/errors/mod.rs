//! # Error Module
//!
//! 애플리케이션 전역 에러 타입을 정의합니다.

pub mod errors;

pub use errors::*;

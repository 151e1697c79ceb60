//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 trait 객체를 생성자로 주입받으며, 시작 시
//! [`crate::core::registry::ServiceRegistry`]에서 한 번 조립됩니다.

pub mod auth;
pub mod tags;
pub mod users;

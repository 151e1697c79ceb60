//! # Domain Entities Module
//!
//! 저장소에 영속화되는 엔티티. 식별자는 모두 양의 정수(`i64`)입니다.

pub mod tags;
pub mod users;

pub use tags::*;
pub use users::*;

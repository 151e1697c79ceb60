//! # Repository Layer
//!
//! 엔티티별 저장소 trait과 구현체.
//!
//! - `Mongo*Repository` - MongoDB 구현 (운영)
//! - [`memory`] - 프로세스 메모리 구현 (로컬 실행, 테스트)
//!
//! 모든 메서드는 `AppResult`를 반환하며, 저장소 장애는
//! `AppError::DatabaseError`(500)로 전달됩니다. 재시도는 하지 않습니다.

pub mod memory;
pub mod tags;
pub mod users;

pub use tags::{MongoNecheRepository, MongoTagRepository, NecheRepository, TagRepository};
pub use users::{AccountRepository, MongoAccountRepository};

use mongodb::error::{ErrorKind, WriteFailure};

/// MongoDB 유니크 인덱스 위반 여부 (E11000)
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

//! 태그와 태그에 속한 neche를 다루는 서비스 모듈

pub mod neche_service;
pub mod tag_service;

pub use neche_service::NecheService;
pub use tag_service::TagService;

//! 계정 관리 서비스 모듈
//!
//! 로컬 계정 등록, 비밀번호 인증, 관리자 계정 부트스트랩을 담당합니다.

pub mod account_service;

pub use account_service::AccountService;

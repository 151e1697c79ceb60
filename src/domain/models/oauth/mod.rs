//! # OAuth Domain Models
//!
//! 외부 프로바이더 응답 모델과, 로그인 왕복 동안만 유지되는 임시 세션 항목.

pub mod external_identity;
pub mod google_oauth_model;
pub mod oauth_session;

pub use external_identity::ExternalIdentity;
pub use oauth_session::OAuthSession;

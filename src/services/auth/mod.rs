//! 인증 서비스 모듈
//!
//! - [`token_service`] - HMAC 서명 JWT 발급/검증
//! - [`login_bridge`] - 외부 프로바이더 리디렉션 로그인
//! - [`google_auth_service`] - Google OAuth 2.0 프로바이더
//! - [`session_cookie`] - 로그인 세션 ID를 담는 암호화 쿠키

pub mod google_auth_service;
pub mod login_bridge;
pub mod session_cookie;
pub mod token_service;

pub use google_auth_service::GoogleAuthService;
pub use login_bridge::{FederatedLoginOutcome, IdentityProvider, LoginBridge, LoginStart, ProviderRegistry};
pub use session_cookie::SessionCookies;
pub use token_service::TokenService;

//! 인증된 사용자 정보
//!
//! 접근 제어 미들웨어가 토큰 검증에 성공하면 [`AuthenticatedUser`]를
//! 요청 extensions에 넣고, 핸들러는 extractor로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/tags")]
//! async fn list_tags(user: AuthenticatedUser) -> impl Responder {
//!     log::debug!("user {} lists tags", user.user_id);
//!     // ...
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::role::Role;
use crate::domain::models::token::token::Claims;
use crate::errors::AccessDenied;

/// 요청 범위의 인증 주체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    /// 미들웨어를 거치지 않은 라우트에서는 401을 반환합니다.
    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AccessDenied::AuthHeaderMissing.into())),
        }
    }
}

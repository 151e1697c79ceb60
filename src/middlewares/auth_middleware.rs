use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::domain::models::auth::{AuthenticatedUser, Role};
use crate::errors::AccessDenied;
use crate::middlewares::auth_inner::AccessControlService;
use crate::services::auth::token_service::{TokenService, extract_bearer_token};

/// 접근 허용 여부를 결정합니다.
///
/// I/O 없이 헤더 값, 요구 역할, 토큰 서비스만으로 판단합니다.
/// 빈 헤더는 헤더가 없는 것으로 봅니다.
pub fn authorize(
    header: Option<&str>,
    required_role: Role,
    tokens: &TokenService,
) -> Result<AuthenticatedUser, AccessDenied> {
    let header = header
        .filter(|value| !value.is_empty())
        .ok_or(AccessDenied::AuthHeaderMissing)?;

    let token = extract_bearer_token(header).ok_or(AccessDenied::BearerPrefixMissing)?;

    let claims = tokens.validate(token).map_err(|kind| {
        log::debug!("토큰 거부: {}", kind);
        AccessDenied::InvalidToken(kind)
    })?;

    if claims.role != required_role {
        log::warn!(
            "권한 부족: user_id={}, role={}, required={}",
            claims.user_id,
            claims.role,
            required_role
        );
        return Err(AccessDenied::RoleMismatch);
    }

    Ok(AuthenticatedUser::from(claims))
}

/// 역할 기반 접근 제어 미들웨어
pub struct AccessControl {
    required_role: Role,
    tokens: Arc<TokenService>,
}

impl AccessControl {
    pub fn require(required_role: Role, tokens: Arc<TokenService>) -> Self {
        Self {
            required_role,
            tokens,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessControl
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessControlService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessControlService {
            service: Rc::new(service),
            required_role: self.required_role,
            tokens: self.tokens.clone(),
        }))
    }
}

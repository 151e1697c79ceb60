//! AccessControl 미들웨어의 요청 처리부
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::Role;
use crate::middlewares::auth_middleware::authorize;
use crate::services::auth::TokenService;

pub struct AccessControlService<S> {
    pub service: Rc<S>,
    pub required_role: Role,
    pub tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AccessControlService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        // 디코딩할 수 없는 헤더 값은 접두사 없는 값과 같이 취급합니다.
        let decision = match req.headers().get(header::AUTHORIZATION) {
            None => authorize(None, self.required_role, &self.tokens),
            Some(value) => authorize(
                Some(value.to_str().unwrap_or("?")),
                self.required_role,
                &self.tokens,
            ),
        };

        Box::pin(async move {
            match decision {
                Ok(user) => {
                    log::debug!("인증 성공: user_id={}", user.user_id);
                    req.extensions_mut().insert(user);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(denied) => {
                    let response = denied.error_response();
                    let (req, _) = req.into_parts();
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                }
            }
        })
    }
}

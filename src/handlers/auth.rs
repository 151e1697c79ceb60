//! 외부 프로바이더 로그인 핸들러
//!
//! # Endpoints
//!
//! - `GET /auth/{provider}` - 세션 쿠키를 설정하고 동의 화면으로 302
//! - `GET /auth/callback/{provider}` - 콜백 처리. 세션 쿠키는 결과와
//!   관계없이 항상 제거됩니다.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, web};

use crate::domain::dto::users::request::OAuthCallbackQuery;
use crate::domain::dto::users::response::{FederatedLoginResponse, UserResponse};
use crate::errors::AppError;
use crate::services::auth::{FederatedLoginOutcome, LoginBridge, SessionCookies};

#[get("/{provider}")]
pub async fn begin_login(
    bridge: web::Data<LoginBridge>,
    cookies: web::Data<SessionCookies>,
    provider: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let start = bridge.begin(&provider).await?;

    Ok(HttpResponse::Found()
        .cookie(cookies.issue(&start.session_id)?)
        .insert_header((header::LOCATION, start.redirect_url))
        .finish())
}

#[get("/callback/{provider}")]
pub async fn complete_login(
    req: HttpRequest,
    bridge: web::Data<LoginBridge>,
    cookies: web::Data<SessionCookies>,
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let session_id = cookies.read(&req);

    let mut response = match bridge.callback(session_id.as_deref(), &provider, &query).await {
        Ok(FederatedLoginOutcome::Authenticated { account, token }) => {
            HttpResponse::Ok().json(FederatedLoginResponse::Authenticated {
                user: UserResponse::from(account),
                token,
            })
        }
        Ok(FederatedLoginOutcome::RegistrationRequired) => {
            HttpResponse::Ok().json(FederatedLoginResponse::registration_required())
        }
        Err(error) => {
            log::warn!("{} 로그인 콜백 실패: {}", provider, error);
            error.error_response()
        }
    };

    response
        .add_removal_cookie(&cookies.removal())
        .map_err(|e| AppError::InternalError(format!("failed to clear session cookie: {}", e)))?;

    Ok(response)
}

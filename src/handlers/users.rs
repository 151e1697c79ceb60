//! 로컬 계정 핸들러
//!
//! # Endpoints
//!
//! - `POST /user/register` - 계정 등록 (역할은 항상 `User`)
//! - `POST /user/login` - 비밀번호 로그인, `Authorization` 응답 헤더 포함

use actix_web::http::header;
use actix_web::{HttpResponse, post, web};

use crate::domain::dto::common::Response;
use crate::domain::dto::users::request::{LoginRequest, RegisterRequest};
use crate::domain::dto::users::response::{LoginResponse, UserResponse};
use crate::errors::AppError;
use crate::services::auth::TokenService;
use crate::services::auth::token_service::BEARER_PREFIX;
use crate::services::users::AccountService;

/// 계정 등록
///
/// 이메일이 이미 등록되어 있으면 409를 반환합니다.
#[post("/register")]
pub async fn register(
    accounts: web::Data<AccountService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let account = accounts.register(payload.into_inner()).await?;
    log::info!("계정 등록: id={}", account.id);

    Ok(HttpResponse::Ok().json(Response::ok(
        UserResponse::from(account),
        "User added successfully.",
    )))
}

/// 비밀번호 로그인
///
/// 본문과 `Authorization` 헤더에 같은 `"Bearer <jwt>"` 값을 담아 반환합니다.
#[post("/login")]
pub async fn login(
    accounts: web::Data<AccountService>,
    tokens: web::Data<TokenService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let account = accounts.authenticate(&payload).await?;
    let bearer = format!(
        "{}{}",
        BEARER_PREFIX,
        tokens.issue(account.id, &account.email, account.role)?
    );

    log::info!("로컬 로그인 성공: user_id={}", account.id);

    Ok(HttpResponse::Ok()
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .json(LoginResponse {
            token: bearer,
            user: UserResponse::from(account),
        }))
}

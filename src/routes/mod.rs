//! 라우트 구성
//!
//! | 경로 | 보호 |
//! |------|------|
//! | `/health` | 공개 |
//! | `/user/register`, `/user/login` | 공개 |
//! | `/auth/{provider}`, `/auth/callback/{provider}` | 공개 |
//! | `/user/tags*`, `/user/neches*` | `User` 역할 |
//! | `/admin/tags/{tagId}`, `/admin/neches/{necheId}` | `Admin` 역할 |
//!
//! actix 스코프는 일치하지 않아도 다음 스코프로 넘어가지 않으므로, `/user`
//! 아래의 공개 라우트와 보호 라우트는 하나의 스코프에 함께 둡니다. 보호
//! 구간은 `tags`/`neches` 경로에만 가드로 한정되어, 그 밖의 `/user/*`
//! 요청은 인증 없이 404가 됩니다.

use std::sync::Arc;

use actix_web::guard::{self, GuardContext};
use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::core::ServiceRegistry;
use crate::domain::models::auth::Role;
use crate::errors::AppError;
use crate::handlers;
use crate::middlewares::AccessControl;
use crate::services::auth::TokenService;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig, registry: &ServiceRegistry) {
    registry.register(cfg);

    // 본문 파싱 실패도 {"error": ...} 형태로 응답합니다.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );

    cfg.service(health_check);

    configure_user_routes(cfg, registry.tokens.clone());
    configure_auth_routes(cfg);
    configure_admin_routes(cfg, registry.tokens.clone());
}

fn configure_user_routes(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.service(
        web::scope("/user")
            .service(handlers::users::register)
            .service(handlers::users::login)
            .service(
                web::scope("")
                    .guard(guard::fn_guard(is_protected_user_path))
                    .wrap(AccessControl::require(Role::User, tokens))
                    .service(handlers::tags::list_tags)
                    .service(handlers::tags::create_tag)
                    .service(handlers::tags::get_tag)
                    .service(handlers::tags::update_tag)
                    .service(handlers::neches::list_neches)
                    .service(handlers::neches::create_neche)
                    .service(handlers::neches::get_neche),
            ),
    );
}

const PROTECTED_USER_RESOURCES: [&str; 2] = ["tags", "neches"];

fn is_protected_user_path(ctx: &GuardContext<'_>) -> bool {
    let Some(rest) = ctx.head().uri.path().strip_prefix("/user/") else {
        return false;
    };
    let resource = rest.split('/').next().unwrap_or_default();
    PROTECTED_USER_RESOURCES.contains(&resource)
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::complete_login)
            .service(handlers::auth::begin_login),
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.service(
        web::scope("/admin")
            .wrap(AccessControl::require(Role::Admin, tokens))
            .service(handlers::tags::delete_tag)
            .service(handlers::neches::delete_neche),
    );
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "tag_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

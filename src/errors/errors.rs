//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 실패를
//! `{"error": "<message>"}` 형태의 JSON 응답으로 변환합니다.
//!
//! 에러는 세 계층으로 나뉩니다.
//!
//! - [`TokenError`] - 토큰 검증 실패 (형식, 알고리즘, 서명, 만료)
//! - [`AccessDenied`] - 접근 제어 미들웨어의 거부 사유 (401/403)
//! - [`AppError`] - 서비스/저장소 계층의 일반 에러
//!
//! 5xx 응답 본문에는 내부 상세 정보가 포함되지 않으며, 상세 내용은
//! `log::error!`로만 남습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, AppResult};
//!
//! async fn find_tag(repo: &dyn TagRepository, id: i64) -> AppResult<Tag> {
//!     repo.find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound(format!("Tag with id {} not found", id)))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// 토큰 검증 실패 사유
///
/// 어떤 사유든 클라이언트에게는 동일하게 "Invalid token"으로 노출됩니다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// 파싱 불가, 필수 클레임 누락, 클레임 타입 불일치
    #[error("token is malformed")]
    Malformed,

    /// HMAC 계열이 아닌 서명 알고리즘 (또는 알고리즘 누락)
    #[error("unexpected signing method")]
    AlgorithmMismatch,

    /// 서명 불일치
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// `now >= exp`
    #[error("token has expired")]
    Expired,
}

/// 접근 제어 미들웨어의 거부 사유
///
/// 메시지는 클라이언트에게 그대로 전달되므로 토큰 검증 세부 사항을
/// 담지 않습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    /// Authorization 헤더 없음 (401)
    #[error("Authorization Token Required.")]
    AuthHeaderMissing,

    /// "Bearer " 접두사 없음 (401)
    #[error("Bearer token required")]
    BearerPrefixMissing,

    /// 토큰 검증 실패 (401)
    #[error("Invalid token")]
    InvalidToken(TokenError),

    /// 역할 불일치 (403)
    #[error("Forbidden: Insufficient privileges")]
    RoleMismatch,
}

impl ResponseError for AccessDenied {
    fn status_code(&self) -> StatusCode {
        match self {
            AccessDenied::RoleMismatch => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 서비스와 저장소 계층에서 발생하는 모든 에러를 포괄합니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 이메일 미존재와 비밀번호 불일치를 구분하지 않는 로그인 실패 (401)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// OAuth 프로바이더 이름을 확인할 수 없음 (400 Bad Request)
    #[error("Could not resolve identity provider: {0}")]
    ProviderUnresolvable(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 노출할 메시지
    pub fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            AppError::ExternalServiceError(_) => "Unable to complete authentication".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::ProviderUnresolvable(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 상세 내용을 로그로만 남기고 고정 메시지를 반환합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.public_message()
        }))
    }
}

/// 설정 로딩 에러
///
/// 시작 시점에만 발생하며, 발생하면 프로세스는 즉시 종료됩니다.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 저장소 계층 에러로 변환합니다.
    fn storage_context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn storage_context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::DatabaseError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_status_codes() {
        let cases = vec![
            (AppError::ValidationError("name".into()), StatusCode::BAD_REQUEST),
            (AppError::ProviderUnresolvable("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("tag".into()), StatusCode::NOT_FOUND),
            (AppError::ConflictError("email".into()), StatusCode::CONFLICT),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::DatabaseError("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::ExternalServiceError("google".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_access_denied_status_codes() {
        assert_eq!(AccessDenied::AuthHeaderMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AccessDenied::BearerPrefixMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AccessDenied::InvalidToken(TokenError::SignatureInvalid).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AccessDenied::RoleMismatch.status_code(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_token_errors_are_opaque() {
        for kind in [
            TokenError::Malformed,
            TokenError::AlgorithmMismatch,
            TokenError::SignatureInvalid,
            TokenError::Expired,
        ] {
            let body = body_json(AccessDenied::InvalidToken(kind).error_response()).await;
            assert_eq!(body["error"], "Invalid token");
        }
    }

    #[actix_web::test]
    async fn test_server_errors_hide_details() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3:27017".into());
        let body = body_json(error.error_response()).await;

        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("bson");
        match result.storage_context("decode") {
            Err(AppError::DatabaseError(msg)) => {
                assert!(msg.contains("decode"));
                assert!(msg.contains("bson"));
            }
            other => panic!("Expected DatabaseError, got {:?}", other),
        }
    }
}

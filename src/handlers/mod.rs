//! HTTP 요청 핸들러 모듈
//!
//! 핸들러는 요청 파싱과 응답 형태만 담당하고, 비즈니스 규칙은 `web::Data`로
//! 주입된 서비스에 위임합니다. 실패는 `AppError`로 반환되어
//! `{"error": "<message>"}` 응답으로 변환됩니다.
//!
//! - [`users`] - 로컬 계정 등록과 비밀번호 로그인 (`/user`)
//! - [`auth`] - 외부 프로바이더 로그인 (`/auth`)
//! - [`tags`], [`neches`] - 태그/neche CRUD

pub mod auth;
pub mod neches;
pub mod tags;
pub mod users;

use crate::errors::AppError;

/// 경로의 ID 세그먼트를 정수로 읽습니다.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::ValidationError(format!("Invalid {} ID: {}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "tag").unwrap(), 42);
        assert!(matches!(parse_id("abc", "tag"), Err(AppError::ValidationError(msg)) if msg == "Invalid tag ID: abc"));
    }
}

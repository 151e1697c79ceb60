//! # 계정 서비스
//!
//! 로컬 계정의 등록과 비밀번호 인증을 담당합니다.
//!
//! - 비밀번호는 bcrypt로 해싱하며 cost는 환경별 설정을 따릅니다.
//! - 이메일은 앞뒤 공백을 제거하고 소문자로 정규화한 뒤 저장/조회합니다.
//! - 등록된 계정의 역할은 항상 `User`입니다. 관리자 계정은 시작 시
//!   [`AccountService::ensure_admin`]으로만 만들어집니다.

use std::sync::Arc;

use bcrypt::hash;
use validator::Validate;

use crate::config::AdminBootstrap;
use crate::domain::dto::users::request::{LoginRequest, RegisterRequest};
use crate::domain::entities::users::{Account, NewAccount};
use crate::domain::models::auth::Role;
use crate::errors::{AppError, AppResult};
use crate::repositories::AccountRepository;

/// 저장/조회에 쓰는 이메일 형태
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

const UNKNOWN_ACCOUNT_PASSWORD: &str = "unknown-account-placeholder";

pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    bcrypt_cost: u32,
    /// 없는 이메일로 로그인할 때 대신 검증하는 해시 (같은 cost)
    placeholder_hash: String,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountRepository>, bcrypt_cost: u32) -> Self {
        let placeholder_hash = hash(UNKNOWN_ACCOUNT_PASSWORD, bcrypt_cost).unwrap_or_default();

        Self {
            accounts,
            bcrypt_cost,
            placeholder_hash,
        }
    }

    /// 로컬 계정 등록
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 입력값 검증 실패
    /// * `ConflictError` - 이미 등록된 이메일
    pub async fn register(&self, request: RegisterRequest) -> AppResult<Account> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        self.create(request.name.trim(), &request.email, &request.password, Role::User)
            .await
    }

    /// 이메일/비밀번호 인증
    ///
    /// 이메일이 없는 경우와 비밀번호가 틀린 경우를 구분하지 않고
    /// 모두 `InvalidCredentials`를 반환합니다. 없는 이메일도 같은 cost의
    /// bcrypt 검증을 한 번 거칩니다.
    pub async fn authenticate(&self, request: &LoginRequest) -> AppResult<Account> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let Some(account) = self
            .accounts
            .find_by_email(&normalize_email(&request.email))
            .await?
        else {
            let _ = bcrypt::verify(&request.password, &self.placeholder_hash);
            return Err(AppError::InvalidCredentials);
        };

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(&request.password, &account.password_hash)
            .map_err(|e| AppError::InternalError(format!("password verification failed: {}", e)))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Account> {
        self.accounts
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))
    }

    /// 설정된 관리자 계정이 없으면 만듭니다.
    ///
    /// 같은 이메일의 계정이 이미 있으면 역할과 무관하게 그대로 둡니다.
    pub async fn ensure_admin(&self, bootstrap: &AdminBootstrap) -> AppResult<Account> {
        let existing = self
            .accounts
            .find_by_email(&normalize_email(&bootstrap.email))
            .await?;

        if let Some(existing) = existing {
            if existing.role != Role::Admin {
                log::warn!(
                    "관리자 부트스트랩 이메일이 일반 계정으로 이미 등록되어 있습니다: id={}",
                    existing.id
                );
            }
            return Ok(existing);
        }

        let admin = self
            .create(&bootstrap.name, &bootstrap.email, &bootstrap.password, Role::Admin)
            .await?;
        log::info!("관리자 계정 생성: id={}", admin.id);

        Ok(admin)
    }

    async fn create(&self, name: &str, email: &str, password: &str, role: Role) -> AppResult<Account> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        self.accounts
            .save(NewAccount {
                name: name.to_string(),
                email: normalize_email(email),
                password_hash,
                role,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryAccountRepository;

    fn service() -> AccountService {
        AccountService::new(Arc::new(InMemoryAccountRepository::new()), 4)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_assigns_user_role_and_hashes_password() {
        let service = service();

        let account = service.register(register_request("Jane@Example.COM")).await.unwrap();

        assert_eq!(account.role, Role::User);
        assert_eq!(account.email, "jane@example.com");
        assert_ne!(account.password_hash, "correct horse");
        assert!(bcrypt::verify("correct horse", &account.password_hash).unwrap());
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let service = service();
        service.register(register_request("jane@example.com")).await.unwrap();

        let second = service.register(register_request("JANE@example.com")).await;

        assert!(matches!(second, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_register_rejects_short_password() {
        let mut request = register_request("jane@example.com");
        request.password = "short".to_string();

        let result = service().register(request).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_authenticate() {
        let service = service();
        let stored = service.register(register_request("jane@example.com")).await.unwrap();

        let account = service
            .authenticate(&login("Jane@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(account.id, stored.id);

        assert!(matches!(
            service.authenticate(&login("jane@example.com", "wrong password")).await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate(&login("nobody@example.com", "correct horse")).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_placeholder_hash_uses_configured_cost() {
        let service = service();

        assert!(service.placeholder_hash.starts_with("$2b$04$"));
        assert!(!bcrypt::verify("correct horse", &service.placeholder_hash).unwrap());
    }

    #[actix_web::test]
    async fn test_ensure_admin_is_idempotent() {
        let service = service();
        let bootstrap = AdminBootstrap {
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password: "admin-password".to_string(),
        };

        let first = service.ensure_admin(&bootstrap).await.unwrap();
        let second = service.ensure_admin(&bootstrap).await.unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(first.id, second.id);
    }

    #[actix_web::test]
    async fn test_find_by_email_missing_is_not_found() {
        let service = service();
        service.register(register_request("jane@example.com")).await.unwrap();

        assert_eq!(service.find_by_email("JANE@example.com").await.unwrap().name, "Jane Doe");
        assert!(matches!(
            service.find_by_email("nobody@example.com").await,
            Err(AppError::NotFound(_))
        ));
    }
}

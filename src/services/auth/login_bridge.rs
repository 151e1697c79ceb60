//! # Federated Login Bridge
//!
//! 외부 프로바이더를 통한 2단계 리디렉션 로그인.
//!
//! 1. [`LoginBridge::begin`] - 세션 항목 `{provider, state, expires_at}`을 만들고
//!    프로바이더 동의 화면 URL을 반환합니다. 세션 ID는 쿠키로 전달됩니다.
//! 2. [`LoginBridge::callback`] - 세션 항목을 꺼내면서 삭제하고, 코드 교환으로
//!    확인된 이메일에 해당하는 로컬 계정을 찾아 토큰을 발급합니다.
//!
//! 로컬 계정이 없으면 가입 안내만 반환하며 계정을 자동 생성하지 않습니다.
//! 두 단계 사이의 상태는 세션 항목뿐이므로, 완료되지 않은 로그인은 만료로만
//! 정리되고 이미 사용되었거나 만료된 세션으로는 콜백을 다시 처리할 수 없습니다.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::caching::OAuthSessionStore;
use crate::domain::dto::users::request::OAuthCallbackQuery;
use crate::domain::entities::users::Account;
use crate::domain::models::oauth::{ExternalIdentity, OAuthSession};
use crate::errors::{AppError, AppResult};
use crate::repositories::AccountRepository;
use crate::services::auth::token_service::TokenService;
use crate::services::users::account_service::normalize_email;

/// 외부 신원 프로바이더
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 라우트 경로와 세션 항목에 쓰이는 이름 (예: "google")
    fn name(&self) -> &'static str;

    /// 동의 화면 URL
    fn authorization_url(&self, state: &str) -> String;

    /// 콜백으로 받은 인증 코드를 확인된 신원으로 교환합니다.
    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity>;
}

/// 이름으로 프로바이더를 찾는 등록부
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn IdentityProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.providers.insert(provider.name(), provider);
        self
    }

    pub fn resolve(&self, name: &str) -> AppResult<Arc<dyn IdentityProvider>> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::ProviderUnresolvable(format!("unknown provider '{}'", name)))
    }
}

/// 1단계 결과
#[derive(Debug, Clone)]
pub struct LoginStart {
    /// 쿠키로 내려보낼 세션 ID
    pub session_id: String,
    /// 302 Location
    pub redirect_url: String,
}

/// 2단계 결과
#[derive(Debug, Clone)]
pub enum FederatedLoginOutcome {
    Authenticated { account: Account, token: String },
    RegistrationRequired,
}

pub struct LoginBridge {
    providers: ProviderRegistry,
    sessions: Arc<dyn OAuthSessionStore>,
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<TokenService>,
    session_ttl: Duration,
}

impl LoginBridge {
    pub fn new(
        providers: ProviderRegistry,
        sessions: Arc<dyn OAuthSessionStore>,
        accounts: Arc<dyn AccountRepository>,
        tokens: Arc<TokenService>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            providers,
            sessions,
            accounts,
            tokens,
            session_ttl,
        }
    }

    pub async fn begin(&self, provider_name: &str) -> AppResult<LoginStart> {
        let provider = self.providers.resolve(provider_name)?;

        let session_id = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let state = Uuid::new_v4().simple().to_string();
        let session = OAuthSession::new(provider.name(), state.as_str(), Utc::now(), self.session_ttl);

        self.sessions.put(&session_id, &session).await?;
        log::debug!("OAuth 로그인 시작: provider={}", provider.name());

        Ok(LoginStart {
            session_id,
            redirect_url: provider.authorization_url(&state),
        })
    }

    pub async fn callback(
        &self,
        session_id: Option<&str>,
        provider_name: &str,
        query: &OAuthCallbackQuery,
    ) -> AppResult<FederatedLoginOutcome> {
        let session_id = session_id
            .ok_or_else(|| AppError::ProviderUnresolvable("no login session".to_string()))?;

        let session = self
            .sessions
            .take(session_id, Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::ProviderUnresolvable("login session expired or already used".to_string())
            })?;

        if session.provider != provider_name {
            return Err(AppError::ProviderUnresolvable(format!(
                "login session belongs to '{}'",
                session.provider
            )));
        }
        let provider = self.providers.resolve(&session.provider)?;

        if let Some(error) = &query.error {
            return Err(AppError::ExternalServiceError(format!(
                "provider returned '{}': {}",
                error,
                query.error_description.as_deref().unwrap_or("")
            )));
        }

        if query.state.as_deref() != Some(session.state.as_str()) {
            return Err(AppError::ExternalServiceError("OAuth state mismatch".to_string()));
        }

        let code = query
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AppError::ExternalServiceError("missing authorization code".to_string()))?;

        let identity = provider.exchange(code).await?;
        let email = normalize_email(&identity.email);

        match self.accounts.find_by_email(&email).await? {
            Some(account) => {
                let token = self.tokens.issue(account.id, &account.email, account.role)?;
                log::info!("{} 로그인 성공: user_id={}", provider.name(), account.id);
                Ok(FederatedLoginOutcome::Authenticated { account, token })
            }
            None => {
                log::info!("{} 로그인: 등록되지 않은 이메일", provider.name());
                Ok(FederatedLoginOutcome::RegistrationRequired)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::caching::InMemorySessionStore;
    use crate::domain::entities::users::NewAccount;
    use crate::domain::models::auth::Role;
    use crate::repositories::memory::InMemoryAccountRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 코드 값과 무관하게 고정된 이메일을 돌려주는 프로바이더
    pub(crate) struct FakeProvider {
        pub name: &'static str,
        pub email: String,
        pub fail: bool,
        pub exchanges: AtomicUsize,
    }

    impl FakeProvider {
        pub(crate) fn returning(email: &str) -> Self {
            Self::named("google", email)
        }

        pub(crate) fn named(name: &'static str, email: &str) -> Self {
            Self {
                name,
                email: email.to_string(),
                fail: false,
                exchanges: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn authorization_url(&self, state: &str) -> String {
            format!("https://provider.test/consent?state={}", state)
        }

        async fn exchange(&self, _code: &str) -> AppResult<ExternalIdentity> {
            self.exchanges.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::ExternalServiceError("exchange refused".to_string()));
            }

            Ok(ExternalIdentity {
                provider: self.name.to_string(),
                subject: "sub-1".to_string(),
                email: self.email.clone(),
                name: Some("Jane".to_string()),
                picture: None,
            })
        }
    }

    /// 모든 조회가 저장소 에러로 끝나는 계정 저장소
    pub(crate) struct UnreachableAccounts;

    #[async_trait]
    impl AccountRepository for UnreachableAccounts {
        async fn save(&self, _account: NewAccount) -> AppResult<Account> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }

        async fn find_by_email(&self, _email: &str) -> AppResult<Option<Account>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
    }

    fn bridge_with(providers: ProviderRegistry, accounts: Arc<dyn AccountRepository>) -> LoginBridge {
        LoginBridge::new(
            providers,
            Arc::new(InMemorySessionStore::new()),
            accounts,
            Arc::new(TokenService::new(b"bridge-test-secret", Duration::hours(24))),
            Duration::minutes(10),
        )
    }

    struct Fixture {
        bridge: LoginBridge,
        tokens: Arc<TokenService>,
        accounts: Arc<InMemoryAccountRepository>,
        provider: Arc<FakeProvider>,
    }

    fn fixture(provider: FakeProvider) -> Fixture {
        let provider = Arc::new(provider);
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let tokens = Arc::new(TokenService::new(b"bridge-test-secret", Duration::hours(24)));
        let bridge = LoginBridge::new(
            ProviderRegistry::new().register(provider.clone()),
            Arc::new(InMemorySessionStore::new()),
            accounts.clone(),
            tokens.clone(),
            Duration::minutes(10),
        );

        Fixture {
            bridge,
            tokens,
            accounts,
            provider,
        }
    }

    fn state_of(start: &LoginStart) -> String {
        start.redirect_url.rsplit("state=").next().unwrap().to_string()
    }

    fn callback_query(state: &str) -> OAuthCallbackQuery {
        OAuthCallbackQuery {
            code: Some("auth-code".to_string()),
            state: Some(state.to_string()),
            ..Default::default()
        }
    }

    async fn seed(accounts: &InMemoryAccountRepository, email: &str, role: Role) -> Account {
        accounts
            .save(NewAccount {
                name: "Jane".to_string(),
                email: email.to_string(),
                password_hash: "unused".to_string(),
                role,
            })
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_known_email_gets_token_with_stored_role() {
        let f = fixture(FakeProvider::returning("Admin@Example.com"));
        let stored = seed(&f.accounts, "admin@example.com", Role::Admin).await;

        let start = f.bridge.begin("google").await.unwrap();
        let outcome = f
            .bridge
            .callback(Some(start.session_id.as_str()), "google", &callback_query(&state_of(&start)))
            .await
            .unwrap();

        match outcome {
            FederatedLoginOutcome::Authenticated { account, token } => {
                assert_eq!(account.id, stored.id);
                let claims = f.tokens.validate(&token).unwrap();
                assert_eq!(claims.role, Role::Admin);
                assert_eq!(claims.user_id, stored.id);
            }
            other => panic!("expected token, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_unknown_email_requires_registration() {
        let f = fixture(FakeProvider::returning("new@example.com"));

        let start = f.bridge.begin("google").await.unwrap();
        let outcome = f
            .bridge
            .callback(Some(start.session_id.as_str()), "google", &callback_query(&state_of(&start)))
            .await
            .unwrap();

        assert!(matches!(outcome, FederatedLoginOutcome::RegistrationRequired));
        assert!(f.accounts.find_by_email("new@example.com").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_replayed_callback_is_rejected() {
        let f = fixture(FakeProvider::returning("new@example.com"));
        let start = f.bridge.begin("google").await.unwrap();
        let query = callback_query(&state_of(&start));

        f.bridge.callback(Some(start.session_id.as_str()), "google", &query).await.unwrap();
        let replay = f.bridge.callback(Some(start.session_id.as_str()), "google", &query).await;

        assert!(matches!(replay, Err(AppError::ProviderUnresolvable(_))));
        assert_eq!(f.provider.exchanges.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_unknown_provider_and_missing_session() {
        let f = fixture(FakeProvider::returning("a@b.com"));

        assert!(matches!(
            f.bridge.begin("github").await,
            Err(AppError::ProviderUnresolvable(_))
        ));
        assert!(matches!(
            f.bridge.callback(None, "google", &callback_query("x")).await,
            Err(AppError::ProviderUnresolvable(_))
        ));
        assert!(matches!(
            f.bridge.callback(Some("nope"), "google", &callback_query("x")).await,
            Err(AppError::ProviderUnresolvable(_))
        ));
    }

    #[actix_web::test]
    async fn test_state_mismatch_consumes_session() {
        let f = fixture(FakeProvider::returning("a@b.com"));
        let start = f.bridge.begin("google").await.unwrap();

        let forged = f
            .bridge
            .callback(Some(start.session_id.as_str()), "google", &callback_query("forged"))
            .await;
        assert!(matches!(forged, Err(AppError::ExternalServiceError(_))));

        let retry = f
            .bridge
            .callback(Some(start.session_id.as_str()), "google", &callback_query(&state_of(&start)))
            .await;
        assert!(matches!(retry, Err(AppError::ProviderUnresolvable(_))));
        assert_eq!(f.provider.exchanges.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_provider_failure_is_exchange_error() {
        let mut provider = FakeProvider::returning("a@b.com");
        provider.fail = true;
        let f = fixture(provider);
        let start = f.bridge.begin("google").await.unwrap();

        let result = f
            .bridge
            .callback(Some(start.session_id.as_str()), "google", &callback_query(&state_of(&start)))
            .await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_account_lookup_failure_consumes_session() {
        let provider = Arc::new(FakeProvider::returning("a@b.com"));
        let bridge = bridge_with(
            ProviderRegistry::new().register(provider.clone()),
            Arc::new(UnreachableAccounts),
        );
        let start = bridge.begin("google").await.unwrap();
        let query = callback_query(&state_of(&start));

        let result = bridge.callback(Some(start.session_id.as_str()), "google", &query).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));

        let retry = bridge.callback(Some(start.session_id.as_str()), "google", &query).await;
        assert!(matches!(retry, Err(AppError::ProviderUnresolvable(_))));
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_callback_for_other_provider_is_rejected() {
        let google = Arc::new(FakeProvider::returning("a@b.com"));
        let github = Arc::new(FakeProvider::named("github", "a@b.com"));
        let bridge = bridge_with(
            ProviderRegistry::new().register(google.clone()).register(github.clone()),
            Arc::new(InMemoryAccountRepository::new()),
        );
        let start = bridge.begin("github").await.unwrap();
        assert!(start.redirect_url.starts_with("https://provider.test/consent"));

        let result = bridge
            .callback(Some(start.session_id.as_str()), "google", &callback_query(&state_of(&start)))
            .await;

        assert!(matches!(result, Err(AppError::ProviderUnresolvable(_))));
        assert_eq!(google.exchanges.load(Ordering::SeqCst), 0);
        assert_eq!(github.exchanges.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_provider_error_parameter() {
        let f = fixture(FakeProvider::returning("a@b.com"));
        let start = f.bridge.begin("google").await.unwrap();
        let query = OAuthCallbackQuery {
            error: Some("access_denied".to_string()),
            state: Some(state_of(&start)),
            ..Default::default()
        };

        let result = f.bridge.callback(Some(start.session_id.as_str()), "google", &query).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}

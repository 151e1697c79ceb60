//! # Service Registry
//!
//! 시작 시 설정으로부터 저장소와 서비스를 한 번 조립하고, actix 앱에
//! `web::Data`로 등록합니다. 전역 상태는 없으며 모든 의존성은 생성자로
//! 주입됩니다.
//!
//! ```text
//! AppConfig ──► Stores (Mongo+Redis | Memory)
//!                  │
//!                  ▼
//!          ServiceRegistry ──► web::Data<AccountService>
//!                              web::Data<TagService>
//!                              web::Data<NecheService>
//!                              web::Data<LoginBridge>
//!                              web::Data<SessionCookies>
//!                              web::Data<TokenService>
//! ```
//!
//! 저장소 구현은 `STORAGE_BACKEND`로 선택합니다. Mongo 백엔드에서
//! `REDIS_URL`이 없으면 로그인 세션만 프로세스 메모리에 둡니다.

use std::sync::Arc;

use actix_web::web;
use chrono::Duration;

use crate::caching::redis::RedisClient;
use crate::caching::{InMemorySessionStore, OAuthSessionStore, RedisSessionStore};
use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::db::Database;
use crate::errors::AppResult;
use crate::repositories::memory::{InMemoryAccountRepository, InMemoryNecheRepository, InMemoryTagRepository};
use crate::repositories::{
    AccountRepository, MongoAccountRepository, MongoNecheRepository, MongoTagRepository, NecheRepository,
    TagRepository,
};
use crate::services::auth::{GoogleAuthService, LoginBridge, ProviderRegistry, SessionCookies, TokenService};
use crate::services::tags::{NecheService, TagService};
use crate::services::users::AccountService;

/// 저장소 구현 묶음
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub neches: Arc<dyn NecheRepository>,
    pub sessions: Arc<dyn OAuthSessionStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepository::new()),
            tags: Arc::new(InMemoryTagRepository::new()),
            neches: Arc::new(InMemoryNecheRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
        }
    }

    /// MongoDB에 연결하고 인덱스를 만듭니다.
    pub async fn connect(config: &StorageConfig) -> AppResult<Self> {
        match config.backend {
            StorageBackend::Memory => {
                log::warn!("STORAGE_BACKEND=memory: 재시작하면 모든 데이터가 사라집니다");
                Ok(Self::in_memory())
            }
            StorageBackend::Mongo => {
                log::info!("📡 데이터베이스 연결 중...");
                let database = Arc::new(Database::connect(config).await?);

                let accounts = MongoAccountRepository::new(database.clone());
                accounts.create_indexes().await?;
                let neches = MongoNecheRepository::new(database.clone());
                neches.create_indexes().await?;

                let sessions: Arc<dyn OAuthSessionStore> = match &config.redis_url {
                    Some(url) => {
                        let redis = RedisClient::connect(url).await?;
                        Arc::new(RedisSessionStore::new(Arc::new(redis)))
                    }
                    None => {
                        log::warn!("REDIS_URL 미설정: 로그인 세션을 프로세스 메모리에 저장합니다");
                        Arc::new(InMemorySessionStore::new())
                    }
                };

                Ok(Self {
                    accounts: Arc::new(accounts),
                    tags: Arc::new(MongoTagRepository::new(database)),
                    neches: Arc::new(neches),
                    sessions,
                })
            }
        }
    }
}

/// 조립된 서비스 묶음
#[derive(Clone)]
pub struct ServiceRegistry {
    pub tokens: Arc<TokenService>,
    pub accounts: Arc<AccountService>,
    pub tags: Arc<TagService>,
    pub neches: Arc<NecheService>,
    pub login_bridge: Arc<LoginBridge>,
    pub session_cookies: Arc<SessionCookies>,
}

impl ServiceRegistry {
    /// 설정을 읽어 저장소 연결부터 서비스 조립까지 수행합니다.
    pub async fn build(config: &AppConfig) -> AppResult<Self> {
        let stores = Stores::connect(&config.storage).await?;

        let google = GoogleAuthService::new(
            config.google.clone(),
            std::time::Duration::from_secs(config.oauth_session.http_timeout_secs),
        )?;

        let registry = Self::assemble(
            stores,
            Arc::new(TokenService::from_config(&config.jwt)),
            ProviderRegistry::new().register(Arc::new(google)),
            SessionCookies::from_config(&config.oauth_session)?,
            config.password.bcrypt_cost,
            Duration::seconds(config.oauth_session.max_age_secs),
        );

        if let Some(bootstrap) = &config.admin_bootstrap {
            registry.accounts.ensure_admin(bootstrap).await?;
        }

        Ok(registry)
    }

    pub fn assemble(
        stores: Stores,
        tokens: Arc<TokenService>,
        providers: ProviderRegistry,
        session_cookies: SessionCookies,
        bcrypt_cost: u32,
        session_ttl: Duration,
    ) -> Self {
        let login_bridge = LoginBridge::new(
            providers,
            stores.sessions.clone(),
            stores.accounts.clone(),
            tokens.clone(),
            session_ttl,
        );

        Self {
            accounts: Arc::new(AccountService::new(stores.accounts.clone(), bcrypt_cost)),
            tags: Arc::new(TagService::new(stores.tags.clone(), stores.neches.clone())),
            neches: Arc::new(NecheService::new(stores.neches, stores.tags)),
            login_bridge: Arc::new(login_bridge),
            session_cookies: Arc::new(session_cookies),
            tokens,
        }
    }

    /// 핸들러가 extractor로 꺼내 쓸 수 있도록 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::from(self.accounts.clone()))
            .app_data(web::Data::from(self.tags.clone()))
            .app_data(web::Data::from(self.neches.clone()))
            .app_data(web::Data::from(self.login_bridge.clone()))
            .app_data(web::Data::from(self.session_cookies.clone()));
    }
}

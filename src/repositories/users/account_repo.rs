use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::users::{Account, NewAccount};
use crate::errors::{AppError, AppResult};
use crate::repositories::is_duplicate_key;

/// 계정 저장소
///
/// `save`는 이메일이 이미 있으면 `ConflictError`를 반환해야 합니다.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn save(&self, account: NewAccount) -> AppResult<Account>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
}

const COLLECTION: &str = "users";

pub struct MongoAccountRepository {
    db: Arc<Database>,
}

impl MongoAccountRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Account> {
        self.db.collection::<Account>(COLLECTION)
    }

    /// 이메일 유니크 인덱스를 생성합니다. 시작 시 한 번 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_index(email_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    async fn save(&self, account: NewAccount) -> AppResult<Account> {
        let id = self.db.next_sequence(COLLECTION).await?;
        let account = account.into_account(id, Utc::now());

        self.collection().insert_one(&account).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError("Email already exists".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

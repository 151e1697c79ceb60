//! # MongoDB Connection Module
//!
//! MongoDB 클라이언트와 정수 ID 발급용 `counters` 컬렉션을 관리합니다.

use log::info;
use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection};

use crate::config::StorageConfig;
use crate::errors::{AppError, AppResult, ErrorContext};

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 연결을 열고 `ping`으로 확인합니다.
    pub async fn connect(config: &StorageConfig) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        client_options.app_name = Some("tag_service".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        client
            .database(&config.database_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.get_database().collection::<T>(name)
    }

    /// `counters` 컬렉션에서 다음 정수 ID를 원자적으로 발급합니다.
    pub async fn next_sequence(&self, counter: &str) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter_doc = self
            .collection::<Document>("counters")
            .find_one_and_update(doc! { "_id": counter }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError(format!("counter '{}' was not created", counter)))?;

        counter_doc.get_i64("seq").storage_context(counter)
    }
}

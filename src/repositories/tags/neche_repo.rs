use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::tags::{Neche, NewNeche};
use crate::errors::{AppError, AppResult};

#[async_trait]
pub trait NecheRepository: Send + Sync {
    async fn save(&self, neche: NewNeche) -> AppResult<Neche>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Neche>>;

    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Neche>>;

    /// 주어진 태그들에 속한 neche 전체 (ID 오름차순)
    async fn find_by_tag_ids(&self, tag_ids: &[i64]) -> AppResult<Vec<Neche>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// 삭제된 개수를 반환합니다.
    async fn delete_by_tag(&self, tag_id: i64) -> AppResult<u64>;
}

const COLLECTION: &str = "neches";

pub struct MongoNecheRepository {
    db: Arc<Database>,
}

impl MongoNecheRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Neche> {
        self.db.collection::<Neche>(COLLECTION)
    }

    /// `tag_id` 조회용 인덱스
    pub async fn create_indexes(&self) -> AppResult<()> {
        let tag_index = IndexModel::builder()
            .keys(doc! { "tag_id": 1 })
            .options(IndexOptions::builder().name("tag_id".to_string()).build())
            .build();

        self.collection()
            .create_index(tag_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_where(&self, filter: Document, options: FindOptions) -> AppResult<Vec<Neche>> {
        self.collection()
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl NecheRepository for MongoNecheRepository {
    async fn save(&self, neche: NewNeche) -> AppResult<Neche> {
        let neche = neche.into_neche(self.db.next_sequence(COLLECTION).await?);

        self.collection()
            .insert_one(&neche)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(neche)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Neche>> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Neche>> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .build();

        self.find_where(doc! {}, options).await
    }

    async fn find_by_tag_ids(&self, tag_ids: &[i64]) -> AppResult<Vec<Neche>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        self.find_where(doc! { "tag_id": { "$in": tag_ids.to_vec() } }, options)
            .await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_by_tag(&self, tag_id: i64) -> AppResult<u64> {
        let result = self
            .collection()
            .delete_many(doc! { "tag_id": tag_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}

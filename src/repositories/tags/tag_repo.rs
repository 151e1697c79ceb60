use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::options::FindOptions;

use crate::db::Database;
use crate::domain::entities::tags::{NewTag, Tag};
use crate::errors::{AppError, AppResult};

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn save(&self, tag: NewTag) -> AppResult<Tag>;

    /// 대상이 없으면 `Ok(false)`
    async fn update(&self, tag: &Tag) -> AppResult<bool>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Tag>>;

    /// ID 오름차순
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Tag>>;

    /// 대상이 없으면 `Ok(false)`. 소속 neche 정리는 호출자 책임입니다.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

const COLLECTION: &str = "tags";

pub struct MongoTagRepository {
    db: Arc<Database>,
}

impl MongoTagRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Tag> {
        self.db.collection::<Tag>(COLLECTION)
    }
}

#[async_trait]
impl TagRepository for MongoTagRepository {
    async fn save(&self, tag: NewTag) -> AppResult<Tag> {
        let tag = tag.into_tag(self.db.next_sequence(COLLECTION).await?);

        self.collection()
            .insert_one(&tag)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(tag)
    }

    async fn update(&self, tag: &Tag) -> AppResult<bool> {
        let result = self
            .collection()
            .update_one(doc! { "_id": tag.id }, doc! { "$set": { "name": &tag.name } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Tag>> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Tag>> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .build();

        self.collection()
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}

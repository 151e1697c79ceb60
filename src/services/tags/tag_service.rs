//! # 태그 서비스
//!
//! 태그 조회 결과에는 항상 소속 neche 목록이 포함됩니다. 태그 삭제 시
//! 소속 neche를 먼저 지운 뒤 태그를 지웁니다.

use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::domain::dto::common::Pagination;
use crate::domain::dto::tags::{CreateTagRequest, TagResponse, UpdateTagRequest};
use crate::domain::entities::tags::{Neche, NewTag, Tag};
use crate::errors::{AppError, AppResult};
use crate::repositories::{NecheRepository, TagRepository};

pub struct TagService {
    tags: Arc<dyn TagRepository>,
    neches: Arc<dyn NecheRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>, neches: Arc<dyn NecheRepository>) -> Self {
        Self { tags, neches }
    }

    pub async fn create(&self, request: CreateTagRequest) -> AppResult<Tag> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let tag = self.tags.save(NewTag { name: request.name }).await?;
        log::info!("태그 생성: id={}", tag.id);

        Ok(tag)
    }

    /// 태그 이름 변경
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 0 이하의 ID 또는 빈 이름
    /// * `NotFound` - 해당 ID의 태그 없음
    pub async fn update(&self, id: i64, request: UpdateTagRequest) -> AppResult<TagResponse> {
        if id <= 0 {
            return Err(AppError::ValidationError("tag ID must be positive".to_string()));
        }
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let mut tag = self.require(id).await?;
        tag.name = request.name;

        if !self.tags.update(&tag).await? {
            return Err(not_found(id));
        }

        let neches = self.neches.find_by_tag_ids(&[id]).await?;
        Ok(TagResponse::new(tag, neches))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.require(id).await?;

        let removed = self.neches.delete_by_tag(id).await?;
        if !self.tags.delete(id).await? {
            return Err(not_found(id));
        }

        log::info!("태그 삭제: id={}, neches={}", id, removed);
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<TagResponse> {
        let tag = self.require(id).await?;
        let neches = self.neches.find_by_tag_ids(&[id]).await?;

        Ok(TagResponse::new(tag, neches))
    }

    pub async fn find_all(&self, page: Pagination) -> AppResult<Vec<TagResponse>> {
        let tags = self.tags.find_all(page.limit, page.offset).await?;
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = tags.iter().map(|tag| tag.id).collect();
        let mut grouped: HashMap<i64, Vec<Neche>> = HashMap::new();
        for neche in self.neches.find_by_tag_ids(&ids).await? {
            grouped.entry(neche.tag_id).or_default().push(neche);
        }

        Ok(tags
            .into_iter()
            .map(|tag| {
                let neches = grouped.remove(&tag.id).unwrap_or_default();
                TagResponse::new(tag, neches)
            })
            .collect())
    }

    async fn require(&self, id: i64) -> AppResult<Tag> {
        self.tags.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Tag with id {} not found", id))
}

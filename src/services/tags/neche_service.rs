use std::sync::Arc;

use validator::Validate;

use crate::domain::dto::tags::CreateNecheRequest;
use crate::domain::entities::tags::{Neche, NewNeche};
use crate::errors::{AppError, AppResult};
use crate::repositories::{NecheRepository, TagRepository};

/// 목록 조회 시 페이지를 나누지 않을 때 쓰는 한도
const UNBOUNDED: i64 = i32::MAX as i64;

/// neche 관리 서비스
///
/// neche는 반드시 존재하는 태그에 속해야 합니다.
pub struct NecheService {
    neches: Arc<dyn NecheRepository>,
    tags: Arc<dyn TagRepository>,
}

impl NecheService {
    pub fn new(neches: Arc<dyn NecheRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { neches, tags }
    }

    pub async fn create(&self, request: CreateNecheRequest) -> AppResult<Neche> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let tag = self
            .tags
            .find_by_id(request.tag_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tag with id {} not found", request.tag_id)))?;

        self.neches
            .save(NewNeche {
                neche_type: request.name,
                tag_id: tag.id,
            })
            .await
    }

    pub async fn find_all(&self) -> AppResult<Vec<Neche>> {
        self.neches.find_all(UNBOUNDED, 0).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Neche> {
        self.neches.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.neches.delete(id).await? {
            return Err(not_found(id));
        }

        log::info!("neche 삭제: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Neche with id {} not found", id))
}

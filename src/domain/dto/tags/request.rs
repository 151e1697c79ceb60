use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 200, message = "Tag name must be 1-200 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 200, message = "Tag name must be 1-200 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNecheRequest {
    #[validate(length(min = 1, max = 200, message = "Neche name must be 1-200 characters"))]
    pub name: String,

    #[serde(rename = "tagId")]
    #[validate(range(min = 1, message = "tagId must be a positive integer"))]
    pub tag_id: i64,
}

use serde::{Deserialize, Serialize};

use crate::domain::entities::tags::{Neche, Tag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NecheResponse {
    pub id: i64,
    #[serde(rename = "necheType")]
    pub neche_type: String,
    #[serde(rename = "tagId")]
    pub tag_id: i64,
}

impl From<Neche> for NecheResponse {
    fn from(neche: Neche) -> Self {
        Self {
            id: neche.id,
            neche_type: neche.neche_type,
            tag_id: neche.tag_id,
        }
    }
}

/// 소속 neche를 포함한 태그
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub neches: Vec<NecheResponse>,
}

impl TagResponse {
    pub fn new(tag: Tag, neches: Vec<Neche>) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            neches: neches.into_iter().map(NecheResponse::from).collect(),
        }
    }
}

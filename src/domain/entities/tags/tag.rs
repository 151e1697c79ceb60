use serde::{Deserialize, Serialize};

/// 태그
///
/// 태그를 삭제하면 소속 neche도 함께 삭제됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn into_tag(self, id: i64) -> Tag {
        Tag { id, name: self.name }
    }
}

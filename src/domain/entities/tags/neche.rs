use serde::{Deserialize, Serialize};

/// 태그에 속한 하위 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neche {
    #[serde(rename = "_id")]
    pub id: i64,
    pub neche_type: String,
    /// 소속 태그 ID (생성 시점에 존재해야 함)
    pub tag_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewNeche {
    pub neche_type: String,
    pub tag_id: i64,
}

impl NewNeche {
    pub fn into_neche(self, id: i64) -> Neche {
        Neche {
            id,
            neche_type: self.neche_type,
            tag_id: self.tag_id,
        }
    }
}

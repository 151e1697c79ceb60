use serde::{Deserialize, Serialize};

/// 외부 프로바이더가 확인해 준 신원
///
/// 로컬 계정과는 이메일로만 연결됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// 프로바이더 이름 (예: "google")
    pub provider: String,
    /// 프로바이더 내 사용자 ID
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

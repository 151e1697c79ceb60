//! OAuth 로그인 임시 세션
//!
//! `begin` 단계에서 생성되어 콜백 단계에서 한 번 읽히고 삭제됩니다.
//! 만료는 읽을 때 `expires_at`과 비교해서 판단하며, 별도의 정리 작업은 없습니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthSession {
    /// 선택된 프로바이더 이름
    pub provider: String,
    /// 프로바이더로 전달한 CSRF state 값
    pub state: String,
    pub expires_at: DateTime<Utc>,
}

impl OAuthSession {
    pub fn new(provider: impl Into<String>, state: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            provider: provider.into(),
            state: state.into(),
            expires_at: now + ttl,
        }
    }

    /// 만료 시각과 같은 순간부터 만료로 봅니다.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// 남은 수명 (초). 만료되었으면 0.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry_boundary() {
        let now = Utc::now();
        let session = OAuthSession::new("google", "state", now, Duration::seconds(60));

        assert!(!session.is_expired_at(now));
        assert!(!session.is_expired_at(now + Duration::seconds(59)));
        assert!(session.is_expired_at(now + Duration::seconds(60)));
        assert_eq!(session.remaining_secs(now), 60);
        assert_eq!(session.remaining_secs(now + Duration::seconds(120)), 0);
    }
}

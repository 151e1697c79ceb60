use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// `?page=&pageSize=` 쿼리
///
/// 숫자가 아니거나 1보다 작은 값은 기본값으로 대체되므로 문자열로 받습니다.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

/// 저장소에 넘길 limit/offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl From<&PageQuery> for Pagination {
    fn from(query: &PageQuery) -> Self {
        let page = parse_positive(query.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(query.page_size.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Self {
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(Pagination::from(&query(None, None)), Pagination { limit: 10, offset: 0 });
        assert_eq!(
            Pagination::from(&query(Some("abc"), Some("-3"))),
            Pagination { limit: 10, offset: 0 }
        );
    }

    #[test]
    fn test_pagination_offset() {
        assert_eq!(
            Pagination::from(&query(Some("3"), Some("20"))),
            Pagination { limit: 20, offset: 40 }
        );
        assert_eq!(
            Pagination::from(&query(Some("2"), Some("5000"))),
            Pagination { limit: MAX_PAGE_SIZE, offset: MAX_PAGE_SIZE }
        );
    }
}

//! Video search query

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Path the self link of a search listing points back to
pub const SEARCH_PATH: &str = "/videos/search";

fn default_limit() -> i64 {
    20
}

/// Video search filters
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free-text search term
    pub q: Option<String>,
    pub course_id: Option<String>,
    pub offering_id: Option<i64>,
    /// Professor university id
    pub prof: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<String>,
    /// Page size (1-100, default 20)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    /// Number of results to skip (default 0)
    #[serde(default)]
    #[validate(range(min = 0, message = "offset must be greater than or equal to 0"))]
    pub offset: i64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            q: None,
            course_id: None,
            offering_id: None,
            prof: None,
            year: None,
            semester: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl SearchQuery {
    /// Parameters sent to the search service. Absent or blank filters are left out.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let filters = [
            ("q", self.q.clone()),
            ("course_id", self.course_id.clone()),
            ("offering_id", self.offering_id.map(|v| v.to_string())),
            ("prof", self.prof.clone()),
            ("year", self.year.map(|v| v.to_string())),
            ("semester", self.semester.clone()),
        ];

        let mut params: Vec<(&'static str, String)> = filters
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (name, v))
            })
            .collect();

        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }

    /// Link reproducing this query. Every parameter is always present, in a fixed
    /// order, with missing ones rendered as empty strings and supplied values
    /// inserted literally.
    pub fn self_href(&self) -> String {
        format!(
            "{}?q={}&course_id={}&offering_id={}&prof={}&year={}&semester={}&limit={}&offset={}",
            SEARCH_PATH,
            self.q.as_deref().unwrap_or_default(),
            self.course_id.as_deref().unwrap_or_default(),
            rendered(self.offering_id),
            self.prof.as_deref().unwrap_or_default(),
            rendered(self.year),
            self.semester.as_deref().unwrap_or_default(),
            self.limit,
            self.offset,
        )
    }
}

fn rendered<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q: Option<&str>, limit: i64) -> SearchQuery {
        SearchQuery {
            q: q.map(String::from),
            limit,
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_filters_not_forwarded() {
        let params = query(Some("calculus"), 5).to_params();
        assert_eq!(
            params,
            vec![
                ("q", "calculus".to_string()),
                ("limit", "5".to_string()),
                ("offset", "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_filter_not_forwarded() {
        let mut q = query(Some("  "), 20);
        q.semester = Some(String::new());
        q.year = Some(2024);
        let names: Vec<_> = q.to_params().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["year", "limit", "offset"]);
    }

    #[test]
    fn test_self_href_renders_missing_as_empty() {
        assert_eq!(
            query(Some("calculus"), 5).self_href(),
            "/videos/search?q=calculus&course_id=&offering_id=&prof=&year=&semester=&limit=5&offset=0"
        );
    }

    #[test]
    fn test_self_href_all_filters() {
        let q = SearchQuery {
            q: Some("linear algebra".to_string()),
            course_id: Some("MATH1201".to_string()),
            offering_id: Some(42),
            prof: Some("abc123".to_string()),
            year: Some(2024),
            semester: Some("Fall".to_string()),
            limit: 10,
            offset: 30,
        };
        let href = q.self_href();
        assert_eq!(
            href,
            "/videos/search?q=linear algebra&course_id=MATH1201&offering_id=42&prof=abc123&year=2024&semester=Fall&limit=10&offset=30"
        );
        assert_eq!(href, q.clone().self_href());
    }

    #[test]
    fn test_self_href_keeps_literal_values() {
        let mut q = query(Some("linear algebra"), 20);
        q.semester = Some("Fall 2024".to_string());
        let href = q.self_href();
        assert!(href.contains("q=linear algebra&"));
        assert!(href.contains("semester=Fall 2024&"));
        assert!(!href.contains('%'));
    }

    #[test]
    fn test_limit_bounds() {
        assert!(query(None, 1).validate().is_ok());
        assert!(query(None, 100).validate().is_ok());
        assert!(query(None, 0).validate().is_err());
        assert!(query(None, 101).validate().is_err());

        let mut negative = query(None, 20);
        negative.offset = -1;
        assert!(negative.validate().is_err());
    }
}

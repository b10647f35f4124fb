//! Pagination, sorting and query-string helpers for list endpoints.

use axum_helpers::validation::{Validator, permitted_value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

use crate::models::ItemQuery;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";
pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sort tokens accepted by `GET /v1/todo`
pub const ITEM_SORT_SAFELIST: [&str; 8] = [
    "id",
    "name",
    "description",
    "status",
    "-id",
    "-name",
    "-description",
    "-status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Page and sort selection for a list query
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Column name, `-` prefixed for descending
    pub sort: String,
    pub sort_safelist: Vec<String>,
}

impl Filters {
    pub fn new(page: i64, page_size: i64, sort: impl Into<String>, safelist: &[&str]) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist: safelist.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Column to order by.
    ///
    /// Only safe-listed tokens are ever returned, so the result can be
    /// placed in SQL as-is. Anything else falls back to `id`.
    pub fn sort_column(&self) -> &str {
        self.sort_safelist
            .iter()
            .find(|safe| **safe == self.sort)
            .map(|safe| safe.trim_start_matches('-'))
            .unwrap_or(DEFAULT_SORT)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAGE,
            DEFAULT_PAGE_SIZE,
            DEFAULT_SORT,
            &ITEM_SORT_SAFELIST,
        )
    }
}

pub fn validate_filters(v: &mut Validator, f: &Filters) {
    v.check(f.page > 0, "page", "must be greater than zero");
    v.check(f.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
    v.check(f.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        f.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted_value(&f.sort, &f.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

/// Pagination details returned next to a page of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    #[schema(example = 1)]
    pub current_page: i64,
    #[schema(example = 20)]
    pub page_size: i64,
    #[schema(example = 1)]
    pub first_page: i64,
    #[schema(example = 3)]
    pub last_page: i64,
    #[schema(example = 42)]
    pub total_records: i64,
}

/// Metadata for `total_records` matches; all zero when nothing matched.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 || page_size <= 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}

/// String parameter, or `default` when absent.
pub fn read_string(qs: &HashMap<String, String>, key: &str, default: &str) -> String {
    qs.get(key)
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

/// Comma-separated parameter, or `default` when absent or empty.
pub fn read_csv(qs: &HashMap<String, String>, key: &str, default: &[String]) -> Vec<String> {
    match qs.get(key).filter(|s| !s.is_empty()) {
        Some(csv) => csv.split(',').map(str::to_string).collect(),
        None => default.to_vec(),
    }
}

/// Integer parameter, or `default` when absent.
///
/// A value that is not an integer records an error under `key` and yields
/// `default`.
pub fn read_int(qs: &HashMap<String, String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    let Some(raw) = qs.get(key).filter(|s| !s.is_empty()) else {
        return default;
    };

    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            v.add_error(key, "must be an integer value");
            default
        }
    }
}

/// Read the item filters and paging parameters of a list request.
pub fn read_item_list_params(
    qs: &HashMap<String, String>,
    v: &mut Validator,
) -> (ItemQuery, Filters) {
    let query = ItemQuery {
        name: read_string(qs, "name", ""),
        description: read_string(qs, "description", ""),
        status: read_string(qs, "status", ""),
        mode: read_csv(qs, "mode", &[]),
    };

    let filters = Filters::new(
        read_int(qs, "page", DEFAULT_PAGE, v),
        read_int(qs, "page_size", DEFAULT_PAGE_SIZE, v),
        read_string(qs, "sort", DEFAULT_SORT),
        &ITEM_SORT_SAFELIST,
    );

    (query, filters)
}

/// Query parameters of `GET /v1/todo`, for the OpenAPI document
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
#[allow(dead_code)]
pub struct ListItemsParams {
    /// Case-insensitive substring of the name
    name: Option<String>,
    /// Case-insensitive substring of the description
    description: Option<String>,
    /// Exact status
    status: Option<String>,
    /// Comma-separated tags that must all be present
    #[param(example = "home,errand")]
    mode: Option<String>,
    /// 1-based page number (default 1)
    page: Option<i64>,
    /// Results per page, at most 100 (default 20)
    page_size: Option<i64>,
    /// One of id, name, description, status, optionally prefixed with `-`
    #[param(example = "-id")]
    sort: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn check(f: &Filters) -> Validator {
        let mut v = Validator::new();
        validate_filters(&mut v, f);
        v
    }

    #[test]
    fn test_validate_filters_accepts_defaults_and_descending() {
        assert!(check(&Filters::default()).valid());

        let f = Filters {
            sort: "-id".to_string(),
            ..Filters::default()
        };
        assert!(check(&f).valid());
    }

    #[test]
    fn test_validate_filters_rejects_out_of_range() {
        let cases = [
            (0, 20, "id", "page", "must be greater than zero"),
            (10_000_001, 20, "id", "page", "must be a maximum of 10 million"),
            (1, 0, "id", "page_size", "must be greater than zero"),
            (1, 101, "id", "page_size", "must be a maximum of 100"),
            (1, 20, "created_at", "sort", "invalid sort value"),
        ];

        for (page, page_size, sort, key, message) in cases {
            let f = Filters::new(page, page_size, sort, &ITEM_SORT_SAFELIST);
            let v = check(&f);
            assert_eq!(v.errors().len(), 1, "{page}/{page_size}/{sort}");
            assert_eq!(v.errors()[key], message);
        }
    }

    #[test]
    fn test_validate_filters_bounds_are_inclusive() {
        let f = Filters::new(MAX_PAGE, MAX_PAGE_SIZE, "status", &ITEM_SORT_SAFELIST);
        assert!(check(&f).valid());
    }

    #[test]
    fn test_sort_column_and_direction() {
        let f = Filters::new(1, 20, "-name", &ITEM_SORT_SAFELIST);
        assert_eq!(f.sort_column(), "name");
        assert_eq!(f.sort_direction(), SortDirection::Desc);
        assert_eq!(f.sort_direction().as_sql(), "DESC");

        let f = Filters::new(1, 20, "status", &ITEM_SORT_SAFELIST);
        assert_eq!(f.sort_column(), "status");
        assert_eq!(f.sort_direction(), SortDirection::Asc);
    }

    #[test]
    fn test_sort_column_never_returns_unlisted_value() {
        let f = Filters::new(1, 20, "name; DROP TABLE items", &ITEM_SORT_SAFELIST);
        assert_eq!(f.sort_column(), "id");
    }

    #[test]
    fn test_limit_and_offset() {
        let f = Filters::new(3, 25, "id", &ITEM_SORT_SAFELIST);
        assert_eq!(f.limit(), 25);
        assert_eq!(f.offset(), 50);
    }

    #[test]
    fn test_calculate_metadata() {
        assert_eq!(
            calculate_metadata(42, 2, 20),
            Metadata {
                current_page: 2,
                page_size: 20,
                first_page: 1,
                last_page: 3,
                total_records: 42,
            }
        );
        assert_eq!(calculate_metadata(40, 1, 20).last_page, 2);
        assert_eq!(calculate_metadata(0, 4, 20), Metadata::default());
    }

    #[test]
    fn test_metadata_serializes_every_field() {
        let json = serde_json::to_value(Metadata::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "current_page": 0,
                "page_size": 0,
                "first_page": 0,
                "last_page": 0,
                "total_records": 0
            })
        );
    }

    #[test]
    fn test_read_helpers_fall_back_to_defaults() {
        let q = qs(&[("name", ""), ("mode", "")]);
        let mut v = Validator::new();

        assert_eq!(read_string(&q, "name", "all"), "all");
        assert_eq!(read_string(&q, "status", ""), "");
        assert_eq!(read_csv(&q, "mode", &["any".to_string()]), vec!["any"]);
        assert_eq!(read_int(&q, "page", 1, &mut v), 1);
        assert!(v.valid());
    }

    #[test]
    fn test_read_csv_splits_on_commas() {
        let q = qs(&[("mode", "home,errand")]);
        assert_eq!(read_csv(&q, "mode", &[]), vec!["home", "errand"]);
    }

    #[test]
    fn test_read_int_records_error() {
        let q = qs(&[("page", "two")]);
        let mut v = Validator::new();

        assert_eq!(read_int(&q, "page", 1, &mut v), 1);
        assert_eq!(v.errors()["page"], "must be an integer value");
    }

    #[test]
    fn test_read_item_list_params() {
        let q = qs(&[
            ("name", "milk"),
            ("status", "pending"),
            ("mode", "home"),
            ("page", "2"),
            ("page_size", "5"),
            ("sort", "-name"),
        ]);
        let mut v = Validator::new();

        let (query, filters) = read_item_list_params(&q, &mut v);

        assert!(v.valid());
        assert_eq!(query.name, "milk");
        assert_eq!(query.description, "");
        assert_eq!(query.status, "pending");
        assert_eq!(query.mode, vec!["home"]);
        assert_eq!(filters.page, 2);
        assert_eq!(filters.page_size, 5);
        assert_eq!(filters.sort, "-name");
    }
}

//! Preview envelope for catalog list endpoints
//!
//! The public pages show the first few matches and a "show all" control;
//! the envelope tells the caller how many more there are.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Preview metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMeta {
    /// Items that matched before slicing
    pub total: usize,
    pub shown: usize,
    pub has_more: bool,
    pub show_all: bool,
}

impl PreviewMeta {
    pub fn new(total: usize, shown: usize, show_all: bool) -> Self {
        Self {
            total,
            shown,
            has_more: shown < total,
            show_all,
        }
    }
}

/// Previewed list response wrapper
#[derive(Debug, Serialize)]
pub struct Preview<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PreviewMeta,
}

impl<T: Serialize> Preview<T> {
    pub fn new(data: Vec<T>, total: usize, show_all: bool) -> Self {
        let meta = PreviewMeta::new(total, data.len(), show_all);
        Self { data, meta }
    }
}

impl<T: Serialize> IntoResponse for Preview<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_while_truncated() {
        let preview = Preview::new(vec![1, 2, 3], 10, false);
        assert_eq!(preview.meta.shown, 3);
        assert!(preview.meta.has_more);
    }

    #[test]
    fn show_all_has_nothing_more() {
        let preview = Preview::new(vec![1, 2], 2, true);
        assert!(!preview.meta.has_more);

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["meta"]["hasMore"], false);
        assert_eq!(json["meta"]["showAll"], true);
    }
}

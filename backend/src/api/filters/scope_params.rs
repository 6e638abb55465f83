use common::filter_state::FilterScope;

use crate::ddi_utils::ddi_http::join_ids;

/// `collections_ids`, `subcollections_ids` and `survey_ids`, each comma-joined.
pub(super) fn scope_params(scope: &FilterScope) -> Vec<(&'static str, String)> {
    vec![
        ("collections_ids", join_ids(&scope.collections)),
        ("subcollections_ids", join_ids(&scope.sub_collections)),
        ("survey_ids", join_ids(&scope.surveys)),
    ]
}

/// Years arrive as numbers or numeric strings.
pub(super) fn parse_year(value: &serde_json::Value) -> Option<i32> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

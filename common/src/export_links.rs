//! Navigation targets for CSV export and question detail pages.

use std::{collections::BTreeSet, fmt::Display};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::form_urlencoded;

use crate::{
    catalog_ids::RowId,
    filter_query,
    filter_state::FilterState,
    search_const::{EXPORT_QUESTIONS_PATH, QUESTION_DETAIL_PATH},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    NothingSelected,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingSelected => write!(f, "Select at least one question to export."),
        }
    }
}

impl std::error::Error for ExportError {}

/// Export of everything matching the current filters.
pub fn export_all_url(state: &FilterState) -> String {
    with_query(EXPORT_QUESTIONS_PATH, &filter_query::serialize(state))
}

/// Export of the checked rows only.
pub fn export_selected_url(rows: &BTreeSet<RowId>) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NothingSelected);
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for row in rows {
        serializer.append_pair("ids", &row.0);
    }
    Ok(with_query(EXPORT_QUESTIONS_PATH, &serializer.finish()))
}

/// Bytes escaped inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Detail page of one question, carrying the filters so the page can link back.
pub fn question_detail_url(row: &RowId, state: &FilterState) -> String {
    let path = format!("{QUESTION_DETAIL_PATH}{}/", utf8_percent_encode(&row.0, PATH_SEGMENT));
    with_query(&path, &filter_query::serialize(state))
}

fn with_query(path: &str, query: &str) -> String {
    format!("{path}?{query}")
}

use serde::{Deserialize, Serialize};

use crate::{catalog_ids::RowId, search_query::SearchParams};

/// A run of result text that is either plain or part of a search match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightTextSpan {
    pub text: String,
    pub is_highlighted: bool,
    pub index: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub params: SearchParams,
    pub records_total: u64,
    pub items: Vec<SearchResultItem>,
}

impl SearchResultPage {
    /// More rows exist than the requested limit covers. Rows dropped while decoding
    /// do not count as missing.
    pub fn has_more(&self) -> bool {
        self.params.limit < self.records_total
    }

    pub fn row_ids(&self) -> Vec<RowId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: RowId,
    pub question_spans: Vec<HighlightTextSpan>,
    pub variable_name_spans: Vec<HighlightTextSpan>,
    pub internal_label_spans: Vec<HighlightTextSpan>,
    pub survey_name: String,
    pub survey_doi: String,
    /// Category table rendered by the catalog, matches already marked up.
    pub categories_html: String,
    pub has_category_match: bool,
}

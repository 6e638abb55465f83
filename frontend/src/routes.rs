use dioxus::prelude::*;

use crate::data_definitions::filter_query_param::FilterQueryParam;
use crate::pages::search_page::SearchPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/?:..filters")]
    SearchPage { filters: FilterQueryParam },
}

impl Route {
    pub fn search_page_from_query(query: &str) -> Self {
        Self::SearchPage { filters: FilterQueryParam::from(query) }
    }
}

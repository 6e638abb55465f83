use common::{
    filter_session::{surface::PageSurface, view::FilterView},
    search_query::SearchParams,
};
use dioxus::prelude::*;
use dioxus::router::Navigator;

use crate::{
    data_definitions::grid_request::GridRequest,
    routes::Route,
};

/// Page surface writing into signals the components render from.
#[derive(Clone, Copy)]
pub struct SignalSurface {
    pub view: Signal<Option<FilterView>>,
    pub grid_request: Signal<Option<GridRequest>>,
    pub navigator: Navigator,
}

impl PageSurface for SignalSurface {
    fn render(&self, view: &FilterView) {
        let mut signal = self.view;
        signal.set(Some(view.clone()));
    }

    fn push_url(&self, query: &str) {
        dioxus::logger::tracing::debug!("push url ?{}", query);
        self.navigator.push(Route::search_page_from_query(query));
    }

    fn reload_grid(&self, params: &SearchParams, reset_to_first_page: bool) {
        let mut signal = self.grid_request;
        let seq = signal.peek().as_ref().map(|request| request.seq + 1).unwrap_or(0);
        signal.set(Some(GridRequest { params: params.clone(), reset_to_first_page, seq }));
    }
}

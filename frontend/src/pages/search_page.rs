use std::rc::Rc;

use dioxus::prelude::*;

use common::{
    catalog_ids::{CollectionId, NamedOption},
    filter_session::{FacetCommand, FilterSession, view::FilterView},
};
use crate::{
    api::ddi_api::list_collections,
    components::{
        error_boundary::ComponentErrorDisplay,
        search_components::{
            export_buttons::ExportButtons, search_facets::SearchFacetsPanel, search_input_top_bar::SearchInputTopBar,
            search_results_panel::SearchResultsPanel, selected_filter_chips::SelectedFilterChips,
        },
        suspend_boundary::SuspendWrapper,
    },
    data_definitions::{filter_query_param::FilterQueryParam, grid_request::GridRequest},
    page_session::{server_fn_resolver::ServerFnResolver, signal_surface::SignalSurface},
};

fn title_ellipsis(title: String) -> String {
    if title.chars().count() > 20 {
        title.chars().take(18).collect::<String>() + "..."
    } else {
        title
    }
}

/// Everything the page components need from the filter session.
#[derive(Clone, Copy)]
pub struct FilterSessionContext {
    pub view: Signal<Option<FilterView>>,
    pub grid_request: Signal<Option<GridRequest>>,
    pub dispatch: Callback<FacetCommand>,
}

/// Search page
#[component]
pub fn SearchPage(filters: FilterQueryParam) -> Element {
    rsx! {
        Title { "Question catalog: {title_ellipsis(filters.0.query.clone())}" }
        SuspendWrapper {
            SearchPageRootComponent { filters }
        }
    }
}

#[component]
fn SearchPageRootComponent(filters: ReadSignal<FilterQueryParam>) -> Element {
    let collections = use_resource(list_collections).suspend()?.cloned();
    let collections = match collections {
        Err(e) => return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
        Ok(c) => c,
    };
    rsx! {
        FilterSessionRoot { filters, collections }
    }
}

#[component]
fn FilterSessionRoot(filters: ReadSignal<FilterQueryParam>, collections: Vec<NamedOption<CollectionId>>) -> Element {
    let view = use_signal(|| None::<FilterView>);
    let grid_request = use_signal(|| None::<GridRequest>);
    let navigator = use_navigator();
    let session = use_hook(move || {
        let surface = SignalSurface { view, grid_request, navigator };
        Rc::new(FilterSession::new(ServerFnResolver, surface, collections.clone()))
    });

    let dispatch = use_callback({
        let session = session.clone();
        move |command: FacetCommand| {
            let session = session.clone();
            spawn(async move {
                session.dispatch(command).await;
            });
        }
    });

    // back/forward and pasted links change the URL without going through the session
    use_effect({
        let session = session.clone();
        move || {
            let query = filters.read().to_string();
            if session.current_url().as_deref() == Some(query.as_str()) {
                return;
            }
            let session = session.clone();
            spawn(async move {
                session.initialize(&query).await;
            });
        }
    });

    use_drop({
        let session = session.clone();
        move || session.close()
    });

    use_context_provider(move || FilterSessionContext { view, grid_request, dispatch });

    rsx! {
        div {
            id: "x-search-page-root-component",
            style: r#"
                height: 100%;
                width: 100%;
                display: flex;
                flex-direction: column;
            "#,
            div {
                id: "x-search-input-top-bar",
                style: "
                    border-bottom: 1px solid rgb(164, 164, 164);
                    background-color: #F8FCFF;
                    flex-shrink: 0;
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 16px;
                    height: 76px;
                    width: 100%;
                ",
                SearchInputTopBar {}
                div { style: "flex-grow: 1;" }
                ExportButtons {}
            }

            div {
                id: "x-search-results-bottom-space",
                style: r#"
                    width: 100%;
                    display: flex;
                    flex-direction: row;
                    flex-grow: 1;
                    max-height: calc(100% - 76px);
                "#,
                div {
                    id: "x-search-filters-left-panel",
                    style: "
                        height: 100%;
                        background-color: #ECEEF2;
                        min-width: 300px;
                        width: 25%;
                        overflow-y: auto;
                    ",
                    SearchFacetsPanel {}
                }
                div {
                    id: "x-search-results-right-panel",
                    style: "
                        height: 100%;
                        flex-grow: 1;
                        display: flex;
                        flex-direction: column;
                        min-width: 400px;
                    ",
                    SelectedFilterChips {}
                    SuspendWrapper { SearchResultsPanel {} }
                }
            }
        }
    }
}

//! Results grid: matching questions for the current filters.

use dioxus::{logger::tracing, prelude::*};

use common::{
    decades::CheckState,
    filter_session::FacetCommand,
    search_result::SearchResultPage,
};
use dioxus_free_icons::{
    Icon,
    icons::{
        md_content_icons::MdLink,
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank, MdIndeterminateCheckBox},
    },
};

use crate::{
    api::ddi_api::search_for_results,
    components::{
        error_boundary::ComponentErrorDisplay,
        search_components::search_result_item_card::SearchResultItemCard,
        suspend_boundary::LoadingIndicator,
    },
    data_definitions::grid_request::GridRequest,
    pages::search_page::FilterSessionContext,
};

#[component]
pub fn SearchResultsPanel() -> Element {
    let session = use_context::<FilterSessionContext>();
    let grid_request = session.grid_request;

    // restarting the resource drops the previous request, so only the latest reload lands
    let search_result = use_resource(move || {
        let request = grid_request();
        async move {
            match request {
                None => Ok(None),
                Some(request) => {
                    let page = search_for_results(request.params.clone()).await?;
                    Ok::<_, ServerFnError>(Some((request, page)))
                }
            }
        }
    });

    let mut first_row_mounted = use_signal(|| None::<Event<MountedData>>);
    use_effect(move || {
        let reset = matches!(
            &*search_result.read(),
            Some(Ok(Some((GridRequest { reset_to_first_page: true, .. }, _))))
        );
        if !reset {
            return;
        }
        if let Some(mounted) = first_row_mounted.peek().as_ref() {
            let _ = mounted.scroll_to_with_options(ScrollToOptions {
                behavior: ScrollBehavior::Instant,
                vertical: ScrollLogicalPosition::Start,
                horizontal: ScrollLogicalPosition::Nearest,
            });
        }
    });

    let search_result = search_result.read();
    let page = match search_result.as_ref() {
        Some(Err(e)) => return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
        Some(Ok(Some((_, page)))) => page.clone(),
        Some(Ok(None)) | None => return rsx! { LoadingIndicator {} },
    };

    rsx! {
        div {
            id: "x-search-results-wrapper",
            style: "
                display: flex;
                flex-direction: column;
                padding: 7px;
                padding-top: 0px;
                height: 100%;
                width: 100%;
                box-sizing: border-box;
            ",
            SearchResultListControls { page: page.clone() }
            ul {
                id: "x-search-results-list",
                style: "
                    width: 100%;
                    flex-grow: 1;
                    overflow-y: auto;
                    padding: 0px;
                    margin: 0px;
                    list-style: none;
                ",
                for (index, result) in page.items.iter().cloned().enumerate() {
                    li {
                        key: "{result.id}",
                        onmounted: move |e| {
                            if index == 0 {
                                first_row_mounted.set(Some(e));
                            }
                        },
                        SearchResultItemCard { result }
                    }
                }
                if page.items.is_empty() {
                    li {
                        style: "padding: 20px; font-size: 18px; color: rgba(28, 33, 45, 0.7);",
                        "No questions match the current filters."
                    }
                }
                if page.has_more() {
                    li {
                        style: "display: flex; justify-content: center; padding: 12px;",
                        button {
                            style: "
                                cursor: pointer;
                                border: 2px solid rgba(0,0,0,0.5);
                                border-radius: 1000px;
                                background-color: white;
                                padding: 8px 20px;
                                font-size: 16px;
                            ",
                            onclick: move |_| session.dispatch.call(FacetCommand::LoadMore),
                            "Load more"
                        }
                    }
                }
            }
        }
    }
}

fn copy_to_clipboard(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    // the returned promise is not awaited, a failed copy only loses the link
    let _ = window.navigator().clipboard().write_text(text);
    tracing::info!("copied link {}", text);
}

fn shareable_link(query: &str) -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    if query.is_empty() {
        Some(format!("{origin}/"))
    } else {
        Some(format!("{origin}/?{query}"))
    }
}

#[component]
fn SearchResultListControls(page: SearchResultPage) -> Element {
    let session = use_context::<FilterSessionContext>();
    let dispatch = session.dispatch;
    let shown = page.row_ids();
    let select_state = session
        .view
        .read()
        .as_ref()
        .map(|v| v.rows_check_state(&shown))
        .unwrap_or(CheckState::Unchecked);
    let view = session.view;

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                height: 48px;
                flex-shrink: 0;
                padding: 0px 8px;
            ",
            div {
                style: "cursor: pointer; display: flex;",
                title: "Select all shown",
                onclick: move |_| {
                    let checked = select_state != CheckState::Checked;
                    dispatch(FacetCommand::SetRows { rows: shown.clone(), checked });
                },
                {match select_state {
                    CheckState::Checked => rsx! { Icon { icon: MdCheckBox, style: "width: 22px; height: 22px;" } },
                    CheckState::Indeterminate => rsx! { Icon { icon: MdIndeterminateCheckBox, style: "width: 22px; height: 22px;" } },
                    CheckState::Unchecked => rsx! { Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px;" } },
                }}
            }
            span {
                style: "font-size: 16px; color: rgba(28, 33, 45, 0.9);",
                "Showing {page.items.len()} of {page.records_total} questions"
            }
            div { style: "flex: 1 1 auto;" }
            button {
                style: "
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    gap: 4px;
                    border: none;
                    background: none;
                    font-size: 14px;
                    color: rgba(28, 33, 45, 0.9);
                ",
                title: "Copy a link to this search",
                onclick: move |_| {
                    let query = view.peek().as_ref().map(|v| v.url_query()).unwrap_or_default();
                    if let Some(link) = shareable_link(&query) {
                        copy_to_clipboard(&link);
                    }
                },
                Icon { icon: MdLink, style: "width: 18px; height: 18px;" }
                "Copy link"
            }
        }
    }
}

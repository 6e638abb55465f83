use dioxus::prelude::*;
use common::filter_session::FacetCommand;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::pages::search_page::FilterSessionContext;

#[component]
pub fn SearchInputTopBar() -> Element {
    let session = use_context::<FilterSessionContext>();
    let view = session.view;
    let dispatch = session.dispatch;

    let committed_query = use_memo(move || view.read().as_ref().map(|v| v.state.query.clone()).unwrap_or_default());
    let mut typed_query = use_signal(|| committed_query.peek().clone());
    // the committed query also changes on reset and history navigation
    use_effect(move || {
        typed_query.set(committed_query());
    });
    let query_has_changed = use_memo(move || typed_query() != committed_query());
    let search_button_color = use_memo(move || if query_has_changed() { "blue" } else { "#6B7280" });

    let trigger_search = move |_: ()| {
        dispatch(FacetCommand::SetQuery(typed_query.peek().clone()));
    };
    let search_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            trigger_search(());
        }
    };
    rsx! {
        div {
            id: "x-search-input-search-box",
            style: "
                display:flex;
                align-items:center;
                gap: 16px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 44px;
                color: #111827;
                border: 1px solid rgba(101, 101, 101, 0.8);
                width: 500px;
                margin-left: 16px;
            ",
            button {
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                ",
                onclick: move |_| trigger_search(()),
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
            }
            input {
                r#type: "text",
                placeholder: "Search questions",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 20px;
                    font-weight: 400;
                    font-family: Roboto, sans-serif;
                ",
                value: "{typed_query}",
                oninput: move |event: Event<FormData>| typed_query.set(event.value()),
                onkeydown: search_onkeydown,
            }
        }
    }
}

use dioxus::{logger::tracing, prelude::*};
use common::export_links::{export_all_url, export_selected_url};
use dioxus_free_icons::{Icon, icons::md_content_icons::MdSaveAlt};

use crate::{components::blocking_dialog::BlockingDialog, pages::search_page::FilterSessionContext};

fn navigate_to(url: &str) {
    let Some(window) = web_sys::window() else {
        tracing::warn!("no window to navigate to {}", url);
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        tracing::error!("failed to navigate to {}: {:?}", url, e);
    }
}

#[component]
pub fn ExportButtons() -> Element {
    let session = use_context::<FilterSessionContext>();
    let view = session.view;
    let mut dialog_message = use_signal(|| None::<String>);

    let export_all = move |_| {
        if let Some(view) = view.peek().as_ref() {
            navigate_to(&export_all_url(&view.state));
        }
    };
    let export_selected = move |_| {
        let Some(url) = view.peek().as_ref().map(|v| export_selected_url(&v.state.selected_rows)) else {
            return;
        };
        match url {
            Ok(url) => navigate_to(&url),
            Err(e) => dialog_message.set(Some(e.to_string())),
        }
    };
    let selected_count = use_memo(move || view.read().as_ref().map(|v| v.state.selected_rows.len()).unwrap_or(0));

    rsx! {
        div {
            style: "display: flex; flex-direction: row; gap: 10px; margin-right: 16px;",
            ExportButton { label: "Export all".to_string(), onclick: export_all }
            ExportButton { label: format!("Export selected ({})", selected_count()), onclick: export_selected }
        }
        BlockingDialog {
            message: dialog_message,
            on_dismiss: move |_| dialog_message.set(None),
        }
    }
}

#[component]
fn ExportButton(label: String, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            style: "
                cursor: pointer;
                display: flex;
                align-items: center;
                gap: 6px;
                border: 2px solid rgba(0,0,0,0.5);
                border-radius: 1000px;
                background-color: white;
                box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                padding: 8px 14px;
                font-size: 15px;
                white-space: nowrap;
            ",
            onclick: move |e| onclick.call(e),
            Icon { icon: MdSaveAlt, style: "width: 20px; height: 20px; color:rgba(0,0,0,0.9);" }
            "{label}"
        }
    }
}

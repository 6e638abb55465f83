use dioxus::prelude::*;
use common::filter_session::{FacetCommand, view::FilterChip};
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use crate::pages::search_page::FilterSessionContext;

/// Strip of removable cards, one per selected filter value.
#[component]
pub fn SelectedFilterChips() -> Element {
    let session = use_context::<FilterSessionContext>();
    let chips = session.view.read().as_ref().map(|v| v.chips()).unwrap_or_default();
    if chips.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            id: "x-selected-filter-chips",
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                gap: 8px;
                padding: 10px 16px;
                border-bottom: 1px solid rgba(0,0,0,0.1);
                flex-shrink: 0;
            ",
            for chip in chips {
                FilterChipCard { key: "{chip.value.facet().url_key()}-{chip.value}", chip }
            }
        }
    }
}

#[component]
fn FilterChipCard(chip: FilterChip) -> Element {
    let dispatch = use_context::<FilterSessionContext>().dispatch;
    let value = chip.value;
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 6px;
                border: 1px solid rgba(0,0,255,0.6);
                border-radius: 1000px;
                background-color: white;
                padding: 4px 6px 4px 12px;
                font-size: 14px;
                max-width: 300px;
            ",
            span {
                style: "color: rgba(28, 33, 45, 0.7);",
                "{value.facet().display_name()}:"
            }
            span {
                style: "overflow: hidden; text-overflow: ellipsis; white-space: nowrap; min-width: 0;",
                title: "{chip.label}",
                "{chip.label}"
            }
            button {
                style: "
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    border: none;
                    background: none;
                    padding: 0px;
                ",
                title: "Remove filter",
                onclick: move |_| dispatch(FacetCommand::RemoveChip(value)),
                Icon { icon: MdClose, style: "width: 16px; height: 16px; color: rgba(0,0,0,0.7);" }
            }
        }
    }
}

use dioxus::prelude::*;
use common::{
    filter_session::{FacetCommand, view::OptionRow},
    filter_state::Facet,
};
use dioxus_free_icons::{
    Icon,
    icons::{
        md_navigation_icons::{MdArrowDropDown, MdArrowDropUp, MdRefresh},
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank},
    },
};

use crate::{components::search_components::decade_filter::DecadeFilter, pages::search_page::FilterSessionContext};

#[derive(Clone, Copy)]
struct AccordionContext {
    expanded_facet: Signal<Option<Facet>>,
}

/// Left column: one collapsible section per facet plus the reset button.
#[component]
pub fn SearchFacetsPanel() -> Element {
    let session = use_context::<FilterSessionContext>();
    let dispatch = session.dispatch;
    let expanded_facet = use_signal(|| Some(Facet::Collections));
    use_context_provider(|| AccordionContext { expanded_facet });

    if session.view.read().is_none() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-search-facets-panel",
            style: "
                display: flex;
                flex-direction: column;
                padding: 10px;
                gap: 6px;
            ",
            for facet in Facet::ALL {
                FacetSection { key: "{facet.url_key()}", facet }
            }
            button {
                style: "
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    gap: 6px;
                    margin-top: 10px;
                    border: 2px solid rgba(0,0,0,0.5);
                    border-radius: 1000px;
                    background-color: white;
                    padding: 8px 14px;
                    font-size: 16px;
                ",
                onclick: move |_| dispatch(FacetCommand::ResetFilters),
                Icon { icon: MdRefresh, style: "width: 20px; height: 20px; color:rgba(0,0,0,0.9);" }
                "Reset filters"
            }
        }
    }
}

#[component]
fn FacetSection(facet: Facet) -> Element {
    let session = use_context::<FilterSessionContext>();
    let mut expanded_facet = use_context::<AccordionContext>().expanded_facet;
    let is_expanded = use_memo(move || expanded_facet() == Some(facet));
    let badge = use_memo(move || session.view.read().as_ref().and_then(|v| v.badge(facet)));
    let badge_count = badge();
    let border_color = if badge_count.is_some() { "rgba(0,0,255,0.9)" } else { "rgba(0,0,0,0.3)" };

    rsx! {
        div {
            style: "
                background-color: white;
                border: 2px solid {border_color};
                border-radius: 10px;
                overflow: hidden;
            ",
            button {
                style: "
                    cursor: pointer;
                    width: 100%;
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 8px;
                    border: none;
                    background: none;
                    padding: 10px;
                    font-size: 18px;
                    font-weight: 500;
                ",
                onclick: move |_| {
                    if is_expanded() {
                        expanded_facet.set(None);
                    } else {
                        expanded_facet.set(Some(facet));
                    }
                },
                "{facet.display_name()}"
                if badge_count.is_some() {
                    span {
                        style: "
                            background-color: rgb(28, 33, 45);
                            color: white;
                            border-radius: 1000px;
                            padding: 0px 8px;
                            font-size: 14px;
                        ",
                        "{badge_count.unwrap_or_default()}"
                    }
                }
                div { style: "flex: 1 1 auto;" }
                if is_expanded() {
                    Icon { icon: MdArrowDropUp, style: "width: 20px; height: 20px;" }
                } else {
                    Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px;" }
                }
            }
            if is_expanded() {
                div {
                    style: "
                        max-height: 400px;
                        overflow-y: auto;
                        padding: 0px 6px 6px 6px;
                    ",
                    if facet == Facet::Years {
                        DecadeFilter {}
                    } else {
                        FacetOptionList { facet }
                    }
                }
            }
        }
    }
}

#[component]
fn FacetOptionList(facet: Facet) -> Element {
    let session = use_context::<FilterSessionContext>();
    let rows = session.view.read().as_ref().map(|v| v.option_rows(facet)).unwrap_or_default();
    if rows.is_empty() {
        return rsx! {
            div {
                style: "padding: 4px; margin: 4px; color: rgba(28, 33, 45, 0.7);",
                "No options for the current selection."
            }
        };
    }
    rsx! {
        for row in rows {
            FacetCheckbox { key: "{row.value}", facet, row }
        }
    }
}

#[component]
fn FacetCheckbox(facet: Facet, row: OptionRow) -> Element {
    let dispatch = use_context::<FilterSessionContext>().dispatch;
    let value = row.value.to_string();
    rsx! {
        div {
            class: "x-facet-list-item",
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                margin: 4px;
                align-items: center;
            ",
            onclick: move |_| dispatch(FacetCommand::Toggle { facet, value: value.clone() }),
            if row.checked {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            div {
                style: "
                    font-size: 16px;
                    line-height: 22px;
                    color: rgb(0, 0, 0);
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    min-width: 0;
                ",
                title: "{row.label}",
                "{row.label}"
            }
        }
    }
}

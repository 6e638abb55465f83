//! Year facet, grouped by decade with a drill-down into single years.

use dioxus::prelude::*;
use common::{
    decades::CheckState,
    filter_session::{FacetCommand, view::DecadeRow},
    filter_state::Facet,
};
use dioxus_free_icons::{
    Icon,
    icons::{
        md_navigation_icons::{MdArrowBack, MdChevronRight},
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank, MdIndeterminateCheckBox},
    },
};

use crate::pages::search_page::FilterSessionContext;

#[component]
pub fn DecadeFilter() -> Element {
    let session = use_context::<FilterSessionContext>();
    let view = session.view.read();
    let Some(view) = view.as_ref() else {
        return rsx! {};
    };

    if let Some(drill_down) = view.options.open_decade.clone() {
        let rows = view.option_rows(Facet::Years);
        let dispatch = session.dispatch;
        return rsx! {
            button {
                style: "
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    gap: 6px;
                    border: none;
                    background: none;
                    padding: 4px;
                    margin: 4px;
                    font-size: 16px;
                ",
                onclick: move |_| dispatch(FacetCommand::CloseDecade),
                Icon { icon: MdArrowBack, style: "width: 18px; height: 18px;" }
                "{drill_down.decade}s"
            }
            for row in rows {
                YearCheckbox { key: "{row.value}", value: row.value.to_string(), label: row.label, checked: row.checked }
            }
        };
    }

    let rows = view.decade_rows();
    if rows.is_empty() {
        return rsx! {
            div {
                style: "padding: 4px; margin: 4px; color: rgba(28, 33, 45, 0.7);",
                "No years for the current selection."
            }
        };
    }
    rsx! {
        for row in rows {
            DecadeCheckbox { key: "{row.decade}", row }
        }
    }
}

#[component]
fn DecadeCheckbox(row: DecadeRow) -> Element {
    let dispatch = use_context::<FilterSessionContext>().dispatch;
    let decade = row.decade;
    let year_count = row.years.len();
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                padding: 4px;
                margin: 4px;
                align-items: center;
            ",
            div {
                style: "cursor: pointer; display: flex;",
                onclick: move |_| dispatch(FacetCommand::ToggleDecade(decade)),
                TriStateIcon { state: row.state }
            }
            div {
                style: "font-size: 16px; line-height: 22px; color: rgb(0, 0, 0);",
                "{decade}s"
            }
            div { style: "flex: 1 1 auto;" }
            button {
                style: "
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    border: none;
                    background: none;
                    color: rgba(28, 33, 45, 0.7);
                    font-size: 14px;
                ",
                title: "Show years",
                onclick: move |_| dispatch(FacetCommand::OpenDecade(decade)),
                "{year_count}"
                Icon { icon: MdChevronRight, style: "width: 18px; height: 18px;" }
            }
        }
    }
}

#[component]
fn YearCheckbox(value: String, label: String, checked: bool) -> Element {
    let dispatch = use_context::<FilterSessionContext>().dispatch;
    let state = if checked { CheckState::Checked } else { CheckState::Unchecked };
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                margin: 4px 4px 4px 20px;
                align-items: center;
            ",
            onclick: move |_| dispatch(FacetCommand::Toggle { facet: Facet::Years, value: value.clone() }),
            TriStateIcon { state }
            div {
                style: "font-size: 16px; line-height: 22px; color: rgb(0, 0, 0);",
                "{label}"
            }
        }
    }
}

#[component]
fn TriStateIcon(state: CheckState) -> Element {
    let style = "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;";
    match state {
        CheckState::Checked => rsx! { Icon { icon: MdCheckBox, style: "{style}" } },
        CheckState::Indeterminate => rsx! { Icon { icon: MdIndeterminateCheckBox, style: "{style}" } },
        CheckState::Unchecked => rsx! { Icon { icon: MdCheckBoxOutlineBlank, style: "{style}" } },
    }
}

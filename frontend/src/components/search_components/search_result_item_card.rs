//! Search result item card component.

use dioxus::prelude::*;
use common::{
    export_links::question_detail_url,
    filter_session::FacetCommand,
    search_result::{HighlightTextSpan, SearchResultItem},
};
use dioxus_free_icons::{
    Icon,
    icons::{
        md_navigation_icons::{MdArrowDropDown, MdArrowRight},
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank},
    },
};

use crate::pages::search_page::FilterSessionContext;

#[component]
pub fn SearchResultItemCard(result: ReadSignal<SearchResultItem>) -> Element {
    let session = use_context::<FilterSessionContext>();
    let dispatch = session.dispatch;
    let SearchResultItem {
        id,
        question_spans,
        variable_name_spans,
        internal_label_spans,
        survey_name,
        survey_doi,
        categories_html,
        has_category_match,
    } = result.read().clone();

    let (we_are_selected, detail_url) = match session.view.read().as_ref() {
        Some(view) => (view.state.selected_rows.contains(&id), question_detail_url(&id, &view.state)),
        None => (false, question_detail_url(&id, &Default::default())),
    };
    let border_color = if we_are_selected { "#367ED899" } else { "#AAAAAA33" };
    let background_color = if we_are_selected { "#4096FF33" } else { "white" };

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: flex-start;
                gap: 12px;
                background: {background_color};
                border: 3px solid {border_color};
                border-radius: 8px;
                padding: 12px 16px;
                margin: 8px 8px;
                width: calc(100% - 16px);
                box-sizing: border-box;
            ",
            div {
                style: "cursor: pointer; display: flex; padding-top: 3px;",
                onclick: move |_| dispatch(FacetCommand::ToggleRow(id.clone())),
                if we_are_selected {
                    Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
                } else {
                    Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
                }
            }
            div {
                style: "
                    display: flex;
                    flex-direction: column;
                    gap: 6px;
                    flex: 1;
                    min-width: 0;
                ",
                // Row 1: QUESTION TEXT
                a {
                    href: "{detail_url}",
                    style: "
                        font-size: 20px;
                        line-height: 28px;
                        font-weight: 400;
                        color: rgb(0, 0, 0);
                        text-decoration: none;
                    ",
                    {render_highlight_text_span(question_spans)}
                }
                // Row 2: SURVEY - VARIABLE - LABEL
                div {
                    style: "
                        display: flex;
                        flex-direction: row;
                        flex-wrap: wrap;
                        align-items: center;
                        gap: 12px;
                        font-size: 15px;
                        color: rgba(0, 0, 0, 0.6);
                    ",
                    SurveyNameSection { survey_name, survey_doi }
                    CardField { name: "Variable".to_string(), spans: variable_name_spans }
                    CardField { name: "Label".to_string(), spans: internal_label_spans }
                }
                if !categories_html.is_empty() {
                    CategoriesSection { categories_html, has_category_match }
                }
            }
        }
    }
}

#[component]
fn SurveyNameSection(survey_name: String, survey_doi: String) -> Element {
    rsx! {
        span {
            style: "
                font-weight: 300;
                font-family: Roboto, sans-serif;
                font-style: italic;
            ",
            "{survey_name}"
        }
        if !survey_doi.is_empty() {
            a {
                href: "https://doi.org/{survey_doi}",
                target: "_blank",
                style: "color: rgba(0, 0, 255, 0.8);",
                "doi:{survey_doi}"
            }
        }
    }
}

#[component]
fn CardField(name: String, spans: Vec<HighlightTextSpan>) -> Element {
    if spans.is_empty() {
        return rsx! {};
    }
    rsx! {
        span {
            "{name}: "
            {render_highlight_text_span(spans)}
        }
    }
}

#[component]
fn CategoriesSection(categories_html: String, has_category_match: bool) -> Element {
    let mut expanded = use_signal(|| false);
    let caret_color = if has_category_match { "#EB3E01" } else { "rgba(0, 0, 0, 0.6)" };
    rsx! {
        div {
            button {
                style: "
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    gap: 2px;
                    border: none;
                    background: none;
                    padding: 0px;
                    font-size: 15px;
                    color: rgba(0, 0, 0, 0.6);
                ",
                onclick: move |_| expanded.toggle(),
                if expanded() {
                    Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px; color: {caret_color};" }
                } else {
                    Icon { icon: MdArrowRight, style: "width: 20px; height: 20px; color: {caret_color};" }
                }
                "Categories"
            }
            if expanded() {
                div {
                    class: "x-question-categories",
                    style: "font-size: 14px; padding-left: 22px;",
                    dangerous_inner_html: "{categories_html}",
                }
            }
        }
    }
}

fn render_highlight_text_span(spans: Vec<HighlightTextSpan>) -> Element {
    let spans = spans.into_iter().map(|i| {
        let color = if i.is_highlighted { "#EB3E014D" } else { "transparent" };
        rsx! {
            span {
                key: "{i.index}",
                style: "background-color: {color};",
                "{i.text}"
            }
        }
    }).collect::<Vec<_>>();
    rsx! {
        {spans.into_iter()}
    }
}

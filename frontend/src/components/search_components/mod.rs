//! Components of the search page.

pub mod decade_filter;
pub mod export_buttons;
pub mod search_facets;
pub mod search_input_top_bar;
pub mod search_result_item_card;
pub mod search_results_panel;
pub mod selected_filter_chips;

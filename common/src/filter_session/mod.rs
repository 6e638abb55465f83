//! The filter cascade controller of a search page.
//!
//! A [`FilterSession`] owns the filter state for one page view. Every user action enters
//! through [`FilterSession::dispatch`]; scope changes re-resolve the dependent facets
//! (collection → sub-collection → survey → years), prune selections that fell out of
//! scope, then push the URL and reload the results grid.
//!
//! State lives in a `RefCell` that is never borrowed across an await. Each cascade run
//! holds a [`RequestToken`]; a run whose token was superseded while it waited drops its
//! responses, so only the most recently dispatched run can change state.

pub mod surface;
pub mod view;

#[cfg(test)]
mod tests;

use std::{
    cell::RefCell,
    collections::BTreeSet,
};

use tracing::{debug, info, warn};

use crate::{
    catalog_ids::{CollectionId, NamedOption, RowId, SubCollectionId, SurveyId},
    decades::{CheckState, DecadeYears},
    filter_query,
    filter_state::{Facet, FacetValue, FilterState},
    request_sequence::{RequestSequencer, RequestToken},
    search_const::{INITIAL_ROW_LIMIT, LOAD_MORE_STEP},
};
use surface::{FilterResolver, PageSurface, ResolveError};
use view::{DecadeDrillDown, FilterOptions, FilterView};

/// Every action the page can ask of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetCommand {
    Toggle { facet: Facet, value: String },
    RemoveChip(FacetValue),
    ToggleDecade(i32),
    OpenDecade(i32),
    CloseDecade,
    SetQuery(String),
    ResetFilters,
    LoadMore,
    ToggleRow(RowId),
    SetRows { rows: Vec<RowId>, checked: bool },
}

/// First dependent facet a cascade run resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CascadeStart {
    SubCollections,
    Surveys,
    Decades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Publish {
    /// Facet lists, counts and chips only.
    Render,
    /// Render, push the URL and reload the grid from the first row.
    Navigate,
    /// Render and reload the grid with a larger limit.
    Grow,
    /// Render and reload the grid from the first row, leaving the URL as it is.
    Reload,
}

/// State to put back when the action that replaced it cannot finish its cascade.
#[derive(Debug, Clone)]
struct Snapshot {
    state: FilterState,
    row_limit: u64,
}

/// What a current cascade run does when a resolve fails.
#[derive(Debug)]
enum OnFailure {
    /// Undo the action: restore the snapshot and re-render.
    Restore(Snapshot),
    /// Keep the state and publish it anyway, so the grid is never left unloaded.
    Publish(Publish),
}

#[derive(Debug, Default)]
struct ResolvedCascade {
    sub_collections: Option<Vec<NamedOption<SubCollectionId>>>,
    surveys: Option<Vec<NamedOption<SurveyId>>>,
    decades: DecadeYears,
}

struct SessionInner {
    state: FilterState,
    options: FilterOptions,
    row_limit: u64,
    last_url: Option<String>,
}

impl SessionInner {
    fn view(&self) -> FilterView {
        FilterView {
            state: self.state.clone(),
            options: self.options.clone(),
            row_limit: self.row_limit,
        }
    }
}

pub struct FilterSession<R, P> {
    resolver: R,
    surface: P,
    inner: RefCell<SessionInner>,
    cascade: RequestSequencer,
    drill_down: RequestSequencer,
}

impl<R: FilterResolver, P: PageSurface> FilterSession<R, P> {
    /// Creates an empty session. `collections` is the fixed list of top-level collections.
    pub fn new(resolver: R, surface: P, collections: Vec<NamedOption<CollectionId>>) -> Self {
        Self {
            resolver,
            surface,
            inner: RefCell::new(SessionInner {
                state: FilterState::default(),
                options: FilterOptions { collections, ..FilterOptions::default() },
                row_limit: INITIAL_ROW_LIMIT,
                last_url: None,
            }),
            cascade: RequestSequencer::default(),
            drill_down: RequestSequencer::default(),
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn view(&self) -> FilterView {
        self.inner.borrow().view()
    }

    /// Query string the session last wrote to (or read from) the URL.
    pub fn current_url(&self) -> Option<String> {
        self.inner.borrow().last_url.clone()
    }

    pub async fn dispatch(&self, command: FacetCommand) {
        debug!("dispatch {:?}", command);
        match command {
            FacetCommand::Toggle { facet, value } => self.on_facet_toggle(facet, &value).await,
            FacetCommand::RemoveChip(value) => self.remove_chip(value).await,
            FacetCommand::ToggleDecade(decade) => self.toggle_decade(decade),
            FacetCommand::OpenDecade(decade) => self.open_decade(decade).await,
            FacetCommand::CloseDecade => self.close_decade(),
            FacetCommand::SetQuery(query) => self.set_query(&query),
            FacetCommand::ResetFilters => self.reset_filters().await,
            FacetCommand::LoadMore => self.load_more(),
            FacetCommand::ToggleRow(row) => self.toggle_row(row),
            FacetCommand::SetRows { rows, checked } => self.set_rows(rows, checked),
        }
    }

    /// Hydrates the state from a query string and resolves the whole cascade before the
    /// first grid load, so a shared URL reproduces the same results.
    pub async fn initialize(&self, query: &str) {
        let token = self.cascade.issue();
        self.drill_down.invalidate();
        {
            let mut inner = self.inner.borrow_mut();
            inner.state = filter_query::hydrate(query);
            inner.options.open_decade = None;
            inner.row_limit = INITIAL_ROW_LIMIT;
            inner.last_url = Some(filter_query::serialize(&inner.state));
        }
        info!("initializing filters from {:?}", query);
        self.publish(Publish::Render);
        self.run_cascade(token, CascadeStart::SubCollections, OnFailure::Publish(Publish::Reload)).await;
    }

    /// Toggles `value` in `facet`. Values the facet cannot hold are ignored.
    pub async fn on_facet_toggle(&self, facet: Facet, value: &str) {
        match FacetValue::parse(facet, value) {
            Some(value) => self.apply_toggle(value).await,
            None => warn!("ignoring invalid {} value {:?}", facet.url_key(), value),
        }
    }

    /// Removing a chip deselects its value through the same pipeline as a toggle.
    pub async fn remove_chip(&self, value: FacetValue) {
        let selected = self.inner.borrow().state.contains(&value);
        if selected {
            self.apply_toggle(value).await;
        }
    }

    /// Selects every year the catalog reports for `decade`, or clears them when all were selected.
    pub fn toggle_decade(&self, decade: i32) {
        {
            let mut inner = self.inner.borrow_mut();
            let inner = &mut *inner;
            let available = inner.options.decades.years_in(decade).to_vec();
            if available.is_empty() {
                return;
            }
            if inner.options.decades.check_state(decade, &inner.state.years) == CheckState::Checked {
                for year in &available {
                    inner.state.years.remove(year);
                }
            } else {
                inner.state.years.extend(available);
            }
            inner.row_limit = INITIAL_ROW_LIMIT;
        }
        self.publish(Publish::Navigate);
    }

    /// Lists the years of one decade for individual selection.
    pub async fn open_decade(&self, decade: i32) {
        let token = self.drill_down.issue();
        let scope = self.inner.borrow().state.scope();
        match self.resolver.resolve_years_in_decade(decade, &scope).await {
            Ok(years) => {
                if !self.drill_down.is_current(token) {
                    debug!("dropping stale years for decade {}", decade);
                    return;
                }
                self.inner.borrow_mut().options.open_decade = Some(DecadeDrillDown { decade, years });
                self.publish(Publish::Render);
            }
            Err(e) => warn!("failed to load years of decade {}: {}", decade, e),
        }
    }

    pub fn close_decade(&self) {
        self.drill_down.invalidate();
        self.inner.borrow_mut().options.open_decade = None;
        self.publish(Publish::Render);
    }

    pub fn set_query(&self, query: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.state.query = query.trim().to_string();
            inner.state.selected_rows.clear();
            inner.row_limit = INITIAL_ROW_LIMIT;
        }
        self.publish(Publish::Navigate);
    }

    /// Clears every filter and re-resolves the unconstrained cascade. In-flight runs are superseded.
    pub async fn reset_filters(&self) {
        let token = self.cascade.issue();
        self.drill_down.invalidate();
        {
            let mut inner = self.inner.borrow_mut();
            inner.state.clear();
            inner.options.open_decade = None;
            inner.row_limit = INITIAL_ROW_LIMIT;
        }
        self.publish(Publish::Render);
        self.run_cascade(token, CascadeStart::SubCollections, OnFailure::Publish(Publish::Navigate)).await;
    }

    pub fn load_more(&self) {
        self.inner.borrow_mut().row_limit += LOAD_MORE_STEP;
        self.publish(Publish::Grow);
    }

    pub fn toggle_row(&self, row: RowId) {
        {
            let mut inner = self.inner.borrow_mut();
            let rows = &mut inner.state.selected_rows;
            if !rows.remove(&row) {
                rows.insert(row);
            }
        }
        self.publish(Publish::Render);
    }

    pub fn set_rows(&self, rows: Vec<RowId>, checked: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            let selected = &mut inner.state.selected_rows;
            for row in rows {
                if checked {
                    selected.insert(row);
                } else {
                    selected.remove(&row);
                }
            }
        }
        self.publish(Publish::Render);
    }

    /// Invalidates in-flight requests; their responses will be dropped.
    pub fn close(&self) {
        self.cascade.invalidate();
        self.drill_down.invalidate();
    }

    async fn apply_toggle(&self, value: FacetValue) {
        let facet = value.facet();
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            let snapshot = Snapshot { state: inner.state.clone(), row_limit: inner.row_limit };
            inner.state.toggle(&value);
            if facet.clears_row_selection() {
                inner.state.selected_rows.clear();
            }
            inner.row_limit = INITIAL_ROW_LIMIT;
            snapshot
        };
        let start = match facet {
            Facet::Collections => CascadeStart::SubCollections,
            Facet::SubCollections => CascadeStart::Surveys,
            Facet::Surveys => CascadeStart::Decades,
            Facet::SearchLocation | Facet::Years => {
                self.publish(Publish::Navigate);
                return;
            }
        };
        let token = self.cascade.issue();
        self.publish(Publish::Render);
        self.run_cascade(token, start, OnFailure::Restore(snapshot)).await;
    }

    async fn run_cascade(&self, token: RequestToken, start: CascadeStart, on_failure: OnFailure) {
        match self.resolve_cascade(token, start).await {
            Ok(Some(resolved)) => {
                self.commit(resolved);
                self.publish(Publish::Navigate);
            }
            Ok(None) => debug!("cascade from {:?} superseded", start),
            Err(e) if self.cascade.is_current(token) => {
                warn!("cascade from {:?} stopped, keeping previous options: {}", start, e);
                match on_failure {
                    OnFailure::Restore(snapshot) => {
                        {
                            let mut inner = self.inner.borrow_mut();
                            inner.state = snapshot.state;
                            inner.row_limit = snapshot.row_limit;
                        }
                        self.publish(Publish::Render);
                    }
                    OnFailure::Publish(publish) => self.publish(publish),
                }
            }
            Err(e) => debug!("superseded cascade failed: {}", e),
        }
    }

    /// Resolves the dependent facets without touching state. `Ok(None)` means superseded.
    async fn resolve_cascade(
        &self,
        token: RequestToken,
        start: CascadeStart,
    ) -> Result<Option<ResolvedCascade>, ResolveError> {
        let (mut scope, mut available_sub_collections) = {
            let inner = self.inner.borrow();
            (inner.state.scope(), inner.options.sub_collections.clone())
        };
        let mut resolved = ResolvedCascade::default();

        if start <= CascadeStart::SubCollections {
            let sub_collections = self.resolver.resolve_sub_collections(&scope.collections).await?;
            if !self.cascade.is_current(token) {
                return Ok(None);
            }
            retain_offered(&mut scope.sub_collections, &sub_collections);
            available_sub_collections = sub_collections.clone();
            resolved.sub_collections = Some(sub_collections);
        }

        if start <= CascadeStart::Surveys {
            // no sub-collection filter means every sub-collection of the current scope
            let survey_parents: BTreeSet<SubCollectionId> = if scope.sub_collections.is_empty() {
                available_sub_collections.iter().map(|option| option.id).collect()
            } else {
                scope.sub_collections.clone()
            };
            // an empty parent set would ask for every survey in the catalog
            let surveys = if survey_parents.is_empty() && !scope.collections.is_empty() {
                Vec::new()
            } else {
                let surveys = self.resolver.resolve_surveys(&survey_parents).await?;
                if !self.cascade.is_current(token) {
                    return Ok(None);
                }
                surveys
            };
            retain_offered(&mut scope.surveys, &surveys);
            resolved.surveys = Some(surveys);
        }

        let decades = self.resolver.resolve_decades(&scope).await?;
        if !self.cascade.is_current(token) {
            return Ok(None);
        }
        resolved.decades = decades;
        Ok(Some(resolved))
    }

    fn commit(&self, resolved: ResolvedCascade) {
        self.drill_down.invalidate();
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        if let Some(sub_collections) = resolved.sub_collections {
            retain_offered(&mut inner.state.sub_collections, &sub_collections);
            inner.options.sub_collections = sub_collections;
        }
        if let Some(surveys) = resolved.surveys {
            retain_offered(&mut inner.state.surveys, &surveys);
            inner.options.surveys = surveys;
        }
        inner.state.years.retain(|year| resolved.decades.contains_year(*year));
        inner.options.decades = resolved.decades;
        inner.options.open_decade = None;
    }

    fn publish(&self, publish: Publish) {
        let (view, url) = {
            let mut inner = self.inner.borrow_mut();
            let url = match publish {
                Publish::Navigate => {
                    let url = filter_query::serialize(&inner.state);
                    inner.last_url = Some(url.clone());
                    Some(url)
                }
                Publish::Render | Publish::Grow | Publish::Reload => None,
            };
            (inner.view(), url)
        };
        self.surface.render(&view);
        if let Some(url) = url {
            self.surface.push_url(&url);
        }
        match publish {
            Publish::Render => {}
            Publish::Navigate | Publish::Reload => self.surface.reload_grid(&view.search_params(), true),
            Publish::Grow => self.surface.reload_grid(&view.search_params(), false),
        }
    }
}

fn retain_offered<I: Ord + Copy>(selected: &mut BTreeSet<I>, offered: &[NamedOption<I>]) {
    let offered: BTreeSet<I> = offered.iter().map(|option| option.id).collect();
    selected.retain(|id| offered.contains(id));
}

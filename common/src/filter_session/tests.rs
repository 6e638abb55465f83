use std::{
    cell::{Cell, RefCell},
    collections::{BTreeSet, VecDeque},
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{channel::oneshot, executor::block_on, join};

use super::*;
use crate::{decades::decade_of, filter_state::FilterScope, search_query::SearchParams};

struct CatalogRow {
    collection: u64,
    sub_collection: u64,
    survey: u64,
    year: i32,
}

fn row(collection: u64, sub_collection: u64, survey: u64, year: i32) -> CatalogRow {
    CatalogRow { collection, sub_collection, survey, year }
}

fn catalog() -> Vec<CatalogRow> {
    let mut rows = vec![
        row(1, 10, 100, 1987),
        row(1, 10, 101, 1988),
        row(1, 11, 110, 1995),
        row(2, 20, 200, 2003),
        row(2, 21, 210, 1987),
    ];
    for offset in 0..5 {
        rows.push(row(5, 50, 500 + offset, 1980 + offset as i32));
        rows.push(row(5, 51, 505 + offset, 1985 + offset as i32));
    }
    rows
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SubCollections(Vec<u64>),
    Surveys(Vec<u64>),
    Decades(FilterScope),
    YearsInDecade(i32),
}

#[derive(Default)]
struct FakeResolver {
    catalog: Vec<CatalogRow>,
    calls: RefCell<Vec<Call>>,
    fail_surveys: Cell<bool>,
    fail_decades: Cell<bool>,
    sub_collection_gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
}

impl FakeResolver {
    fn new() -> Self {
        Self { catalog: catalog(), ..Self::default() }
    }

    /// Holds the next sub-collection request until the returned sender fires.
    fn gate_sub_collections(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.sub_collection_gates.borrow_mut().push_back(rx);
        tx
    }

    fn in_scope<'a>(&'a self, scope: &'a FilterScope) -> impl Iterator<Item = &'a CatalogRow> + 'a {
        self.catalog.iter().filter(move |row| {
            if !scope.surveys.is_empty() {
                scope.surveys.contains(&SurveyId(row.survey))
            } else if !scope.sub_collections.is_empty() {
                scope.sub_collections.contains(&SubCollectionId(row.sub_collection))
            } else if !scope.collections.is_empty() {
                scope.collections.contains(&CollectionId(row.collection))
            } else {
                true
            }
        })
    }
}

impl FilterResolver for FakeResolver {
    async fn resolve_sub_collections(
        &self,
        collections: &BTreeSet<CollectionId>,
    ) -> Result<Vec<NamedOption<SubCollectionId>>, ResolveError> {
        self.calls
            .borrow_mut()
            .push(Call::SubCollections(collections.iter().map(|id| id.0).collect()));
        let gate = self.sub_collection_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let ids: BTreeSet<u64> = self
            .catalog
            .iter()
            .filter(|row| collections.is_empty() || collections.contains(&CollectionId(row.collection)))
            .map(|row| row.sub_collection)
            .collect();
        Ok(ids
            .into_iter()
            .map(|id| NamedOption::new(SubCollectionId(id), format!("Sub {id}")))
            .collect())
    }

    async fn resolve_surveys(
        &self,
        sub_collections: &BTreeSet<SubCollectionId>,
    ) -> Result<Vec<NamedOption<SurveyId>>, ResolveError> {
        self.calls
            .borrow_mut()
            .push(Call::Surveys(sub_collections.iter().map(|id| id.0).collect()));
        if self.fail_surveys.get() {
            return Err(ResolveError::Status { status: 500, body: "boom".to_string() });
        }
        let ids: BTreeSet<u64> = self
            .catalog
            .iter()
            .filter(|row| sub_collections.is_empty() || sub_collections.contains(&SubCollectionId(row.sub_collection)))
            .map(|row| row.survey)
            .collect();
        Ok(ids
            .into_iter()
            .map(|id| NamedOption::new(SurveyId(id), format!("Survey {id}")))
            .collect())
    }

    async fn resolve_decades(&self, scope: &FilterScope) -> Result<DecadeYears, ResolveError> {
        self.calls.borrow_mut().push(Call::Decades(scope.clone()));
        if self.fail_decades.get() {
            return Err(ResolveError::Transport("connection refused".to_string()));
        }
        Ok(DecadeYears::from_years(self.in_scope(scope).map(|row| row.year)))
    }

    async fn resolve_years_in_decade(&self, decade: i32, scope: &FilterScope) -> Result<Vec<i32>, ResolveError> {
        self.calls.borrow_mut().push(Call::YearsInDecade(decade));
        let years: BTreeSet<i32> = self
            .in_scope(scope)
            .map(|row| row.year)
            .filter(|year| decade_of(*year) == decade)
            .collect();
        Ok(years.into_iter().collect())
    }
}

#[derive(Default)]
struct RecordingSurface {
    renders: RefCell<Vec<FilterView>>,
    urls: RefCell<Vec<String>>,
    reloads: RefCell<Vec<(SearchParams, bool)>>,
}

impl PageSurface for RecordingSurface {
    fn render(&self, view: &FilterView) {
        self.renders.borrow_mut().push(view.clone());
    }

    fn push_url(&self, query: &str) {
        self.urls.borrow_mut().push(query.to_string());
    }

    fn reload_grid(&self, params: &SearchParams, reset_to_first_page: bool) {
        self.reloads.borrow_mut().push((params.clone(), reset_to_first_page));
    }
}

type TestSession = FilterSession<FakeResolver, RecordingSurface>;

fn session() -> TestSession {
    FilterSession::new(
        FakeResolver::new(),
        RecordingSurface::default(),
        vec![
            NamedOption::new(CollectionId(1), "Elections"),
            NamedOption::new(CollectionId(2), "Health"),
            NamedOption::new(CollectionId(5), "Labour"),
        ],
    )
}

fn ids<I: Copy>(options: &[NamedOption<I>]) -> Vec<I> {
    options.iter().map(|option| option.id).collect()
}

fn reload_count(session: &TestSession) -> usize {
    session.surface().reloads.borrow().len()
}

fn assert_pruned(session: &TestSession) {
    let view = session.view();
    let subs: BTreeSet<_> = ids(&view.options.sub_collections).into_iter().collect();
    let surveys: BTreeSet<_> = ids(&view.options.surveys).into_iter().collect();
    assert!(view.state.sub_collections.is_subset(&subs), "{:?}", view.state);
    assert!(view.state.surveys.is_subset(&surveys), "{:?}", view.state);
    assert!(view.state.years.iter().all(|year| view.options.decades.contains_year(*year)));
}

/// Returns `Pending` once so other futures joined with the caller get polled.
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

fn yield_now() -> YieldNow {
    YieldNow(false)
}

#[test]
fn hydration_resolves_whole_cascade_before_one_reload() {
    let session = session();
    block_on(session.initialize("?collections=5&years=1987&years=1988"));

    assert_eq!(
        *session.resolver().calls.borrow(),
        vec![
            Call::SubCollections(vec![5]),
            Call::Surveys(vec![50, 51]),
            Call::Decades(FilterScope { collections: [CollectionId(5)].into(), ..FilterScope::default() }),
        ]
    );
    let view = session.view();
    assert_eq!(view.state.years, [1987, 1988].into());
    assert_eq!(view.options.decades.years_in(1980).len(), 10);
    assert_eq!(view.decade_rows()[0].state, CheckState::Indeterminate);

    let reloads = session.surface().reloads.borrow();
    assert_eq!(reloads.len(), 1);
    let (params, reset) = &reloads[0];
    assert!(*reset);
    assert_eq!(params.collections, vec![CollectionId(5)]);
    assert_eq!(params.years, vec![1987, 1988]);
    assert_eq!(session.current_url().as_deref(), Some("collections=5&years=1987&years=1988"));
}

#[test]
fn selecting_collection_prunes_foreign_sub_collection() {
    let session = session();
    block_on(session.initialize("sub_collections=20"));
    assert_eq!(session.view().state.sub_collections, [SubCollectionId(20)].into());
    session.resolver().calls.borrow_mut().clear();

    block_on(session.on_facet_toggle(Facet::Collections, "1"));

    let view = session.view();
    assert!(view.state.sub_collections.is_empty());
    assert_eq!(ids(&view.options.sub_collections), vec![SubCollectionId(10), SubCollectionId(11)]);
    assert_eq!(ids(&view.options.surveys), vec![SurveyId(100), SurveyId(101), SurveyId(110)]);
    assert!(view.chips().iter().all(|chip| chip.value.facet() != Facet::SubCollections));
    assert_eq!(
        session.resolver().calls.borrow()[..2],
        [Call::SubCollections(vec![1]), Call::Surveys(vec![10, 11])]
    );
    assert_eq!(session.surface().urls.borrow().last().map(String::as_str), Some("collections=1"));
}

#[test]
fn selections_stay_inside_offered_options() {
    let session = session();
    block_on(async {
        session.initialize("").await;
        session.on_facet_toggle(Facet::SubCollections, "50").await;
        assert_pruned(&session);
        session.on_facet_toggle(Facet::Surveys, "502").await;
        session.on_facet_toggle(Facet::Years, "1982").await;
        assert_pruned(&session);
        session.on_facet_toggle(Facet::Collections, "2").await;
        assert_pruned(&session);
        session.on_facet_toggle(Facet::Collections, "5").await;
        assert_pruned(&session);
    });
    let view = session.view();
    assert!(view.state.sub_collections.is_empty());
    assert!(view.state.surveys.is_empty());
    assert!(view.state.years.is_empty());
}

#[test]
fn double_toggle_restores_state_and_options() {
    let session = session();
    block_on(session.initialize("years=1987"));
    let before = session.view();

    block_on(async {
        session.on_facet_toggle(Facet::Collections, "2").await;
        session.on_facet_toggle(Facet::Collections, "2").await;
    });

    let after = session.view();
    assert_eq!(after.state, before.state);
    assert_eq!(after.options, before.options);
}

#[test]
fn failed_resolve_commits_nothing() {
    let session = session();
    block_on(session.initialize("sub_collections=20"));
    let before = session.view();
    let urls_before = session.surface().urls.borrow().len();
    session.resolver().fail_surveys.set(true);

    block_on(session.on_facet_toggle(Facet::Collections, "1"));

    let after = session.view();
    assert_eq!(after.state, before.state);
    assert_eq!(after.options, before.options);
    assert_eq!(reload_count(&session), 1);
    assert_eq!(session.surface().urls.borrow().len(), urls_before);
    assert_eq!(session.surface().renders.borrow().last(), Some(&before));

    // the next navigation must not carry the abandoned collection
    session.resolver().fail_surveys.set(false);
    block_on(session.on_facet_toggle(Facet::Years, "2003"));

    let reloads = session.surface().reloads.borrow();
    let (params, _) = reloads.last().unwrap();
    assert!(params.collections.is_empty());
    assert_eq!(params.sub_collections, vec![SubCollectionId(20)]);
    assert_eq!(
        session.surface().urls.borrow().last().map(String::as_str),
        Some("sub_collections=20&years=2003")
    );
}

#[test]
fn collection_without_sub_collections_offers_no_surveys() {
    let session = session();
    block_on(session.initialize(""));
    session.resolver().calls.borrow_mut().clear();

    block_on(session.on_facet_toggle(Facet::Collections, "9"));

    let view = session.view();
    assert_eq!(view.state.collections, [CollectionId(9)].into());
    assert!(view.options.sub_collections.is_empty());
    assert!(view.options.surveys.is_empty());
    assert!(view.options.decades.is_empty());
    assert!(
        session
            .resolver()
            .calls
            .borrow()
            .iter()
            .all(|call| !matches!(call, Call::Surveys(_)))
    );
    assert_eq!(session.surface().urls.borrow().last().map(String::as_str), Some("collections=9"));
}

#[test]
fn failed_first_load_still_loads_grid_once() {
    let session = session();
    session.resolver().fail_decades.set(true);

    block_on(session.initialize("collections=2&q=vote"));

    let reloads = session.surface().reloads.borrow();
    assert_eq!(reloads.len(), 1);
    let (params, reset) = &reloads[0];
    assert!(*reset);
    assert_eq!(params.collections, vec![CollectionId(2)]);
    assert_eq!(params.q, "vote");
    assert!(session.surface().urls.borrow().is_empty());
    assert!(session.view().options.decades.is_empty());
}

#[test]
fn failed_reset_still_navigates_to_cleared_filters() {
    let session = session();
    block_on(session.initialize("collections=1&years=1987"));
    session.resolver().fail_decades.set(true);

    block_on(session.reset_filters());

    assert_eq!(session.view().state, FilterState::default());
    assert_eq!(reload_count(&session), 2);
    assert_eq!(session.surface().urls.borrow().last().map(String::as_str), Some(""));
}

#[test]
fn stale_cascade_response_is_dropped() {
    let session = session();
    block_on(session.initialize(""));
    let first_gate = session.resolver().gate_sub_collections();
    let second_gate = session.resolver().gate_sub_collections();

    block_on(async {
        join!(
            session.on_facet_toggle(Facet::Collections, "1"),
            session.on_facet_toggle(Facet::Collections, "2"),
            async {
                let _ = second_gate.send(());
                yield_now().await;
                let _ = first_gate.send(());
            }
        )
    });

    let view = session.view();
    assert_eq!(
        ids(&view.options.sub_collections),
        vec![SubCollectionId(10), SubCollectionId(11), SubCollectionId(20), SubCollectionId(21)]
    );
    assert_eq!(reload_count(&session), 2);
    let reloads = session.surface().reloads.borrow();
    assert_eq!(reloads[1].0.collections, vec![CollectionId(1), CollectionId(2)]);
}

#[test]
fn reset_supersedes_in_flight_cascade() {
    let session = session();
    block_on(session.initialize(""));
    let gate = session.resolver().gate_sub_collections();

    block_on(async {
        join!(session.on_facet_toggle(Facet::Collections, "1"), async {
            session.reset_filters().await;
            let _ = gate.send(());
        })
    });

    let view = session.view();
    assert_eq!(view.state, FilterState::default());
    assert_eq!(view.options.sub_collections.len(), 6);
    assert_eq!(reload_count(&session), 2);
}

#[test]
fn year_toggle_does_not_cancel_cascade() {
    let session = session();
    block_on(session.initialize(""));
    let gate = session.resolver().gate_sub_collections();

    block_on(async {
        join!(session.on_facet_toggle(Facet::Collections, "1"), async {
            session.on_facet_toggle(Facet::Years, "1987").await;
            let _ = gate.send(());
        })
    });

    let view = session.view();
    assert_eq!(ids(&view.options.sub_collections), vec![SubCollectionId(10), SubCollectionId(11)]);
    assert_eq!(view.state.years, [1987].into());
}

#[test]
fn invalid_toggle_value_is_ignored() {
    let session = session();
    block_on(session.initialize(""));
    let renders = session.surface().renders.borrow().len();

    block_on(session.on_facet_toggle(Facet::Collections, "abc"));

    assert_eq!(session.surface().renders.borrow().len(), renders);
    assert!(session.view().state.collections.is_empty());
}

#[test]
fn decade_checkbox_selects_and_clears_available_years() {
    let session = session();
    block_on(session.initialize("collections=5"));
    session.set_rows(vec![RowId::from("r1")], true);

    session.toggle_decade(1980);
    let view = session.view();
    assert_eq!(view.state.years.len(), 10);
    assert_eq!(view.decade_rows()[0].state, CheckState::Checked);
    assert!(view.state.selected_rows.contains(&RowId::from("r1")));

    session.toggle_decade(1980);
    assert!(session.view().state.years.is_empty());

    session.toggle_decade(1990);
    assert!(session.view().state.years.is_empty());
    assert_eq!(reload_count(&session), 3);
}

#[test]
fn load_more_grows_limit_without_reset() {
    let session = session();
    block_on(session.initialize(""));
    session.set_rows(vec![RowId::from("a"), RowId::from("b")], true);

    session.load_more();
    {
        let reloads = session.surface().reloads.borrow();
        let (params, reset) = reloads.last().cloned().unwrap();
        assert_eq!(params.limit, 20);
        assert!(!reset);
    }
    assert_eq!(session.view().state.selected_rows.len(), 2);

    block_on(session.on_facet_toggle(Facet::Years, "1987"));
    let view = session.view();
    assert_eq!(view.row_limit, 10);
    assert_eq!(view.state.selected_rows.len(), 2);

    block_on(session.on_facet_toggle(Facet::SearchLocation, "questions"));
    assert!(session.view().state.selected_rows.is_empty());
}

#[test]
fn row_toggles_do_not_reload() {
    let session = session();
    block_on(session.initialize(""));

    session.toggle_row(RowId::from("x"));
    assert!(session.view().state.selected_rows.contains(&RowId::from("x")));
    session.toggle_row(RowId::from("x"));
    assert!(session.view().state.selected_rows.is_empty());
    session.set_rows(vec![RowId::from("x"), RowId::from("y")], true);
    session.set_rows(vec![RowId::from("y")], false);
    assert_eq!(session.view().state.selected_rows, [RowId::from("x")].into());

    assert_eq!(reload_count(&session), 1);
}

#[test]
fn set_query_trims_and_clears_rows() {
    let session = session();
    block_on(session.initialize(""));
    session.toggle_row(RowId::from("x"));

    session.set_query("  vote intention ");

    let view = session.view();
    assert_eq!(view.state.query, "vote intention");
    assert!(view.state.selected_rows.is_empty());
    assert_eq!(session.surface().urls.borrow().last().map(String::as_str), Some("q=vote+intention"));
}

#[test]
fn drill_down_lists_years_until_scope_changes() {
    let session = session();
    block_on(session.initialize("collections=5"));

    block_on(session.open_decade(1980));
    let view = session.view();
    assert_eq!(view.options.open_decade.as_ref().map(|d| d.decade), Some(1980));
    assert_eq!(view.option_rows(Facet::Years).len(), 10);

    session.close_decade();
    assert!(session.view().options.open_decade.is_none());

    block_on(async {
        session.open_decade(1980).await;
        session.on_facet_toggle(Facet::Collections, "1").await;
    });
    assert!(session.view().options.open_decade.is_none());
}

#[test]
fn removing_chip_deselects_value() {
    let session = session();
    block_on(session.initialize("collections=1&survey=100&years=1987"));
    let labels: Vec<String> = session.view().chips().into_iter().map(|chip| chip.label).collect();
    assert_eq!(labels, vec!["Elections".to_string(), "Survey 100".to_string(), "1987".to_string()]);

    block_on(session.dispatch(FacetCommand::RemoveChip(FacetValue::Survey(SurveyId(100)))));

    let view = session.view();
    assert!(view.state.surveys.is_empty());
    assert_eq!(view.state.years, [1987].into());
    assert_eq!(view.options.decades.all_years(), [1987, 1988, 1995].into());
}

#[test]
fn close_drops_in_flight_responses() {
    let session = session();
    block_on(session.initialize(""));
    let gate = session.resolver().gate_sub_collections();

    block_on(async {
        join!(session.on_facet_toggle(Facet::Collections, "2"), async {
            session.close();
            let _ = gate.send(());
        })
    });

    assert_eq!(session.view().options.sub_collections.len(), 6);
    assert_eq!(reload_count(&session), 1);
}

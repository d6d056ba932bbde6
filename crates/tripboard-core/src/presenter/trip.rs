// ── Trip presenter ──
//
// Top-level coordinator. Owns the board's views and one presenter per
// visible point, turns view requests into model mutations, and turns
// model notifications back into re-renders.
//
// Everything that happens off the UI task (model notifications from a
// spawned mutation, a failed mutation, a finished shake) arrives as a
// `Signal` on one unbounded channel. The front end pumps it with
// `next_signal` / `handle_signal`, so all view work stays on one task
// and signals are applied strictly in arrival order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::new_point::NewPointPresenter;
use super::point::{Mode, PointPresenter, PointRequest};
use crate::api::PointsApi;
use crate::error::CoreError;
use crate::input::{EditorSlot, Key};
use crate::model::{
    Destination, FilterType, ModelEvent, ModelPayload, OffersList, Point, PointId, SortType,
    UpdateType, UserAction, ViewAction,
};
use crate::store::{DestinationsModel, FilterModel, ObserverId, OffersModel, PointsModel};
use crate::view::{Mount, RenderPosition, SortView, Ui, View};

/// The four models a board works against.
#[derive(Clone)]
pub struct Models {
    pub points: Arc<PointsModel>,
    pub filter: Arc<FilterModel>,
    pub offers: Arc<OffersModel>,
    pub destinations: Arc<DestinationsModel>,
}

impl Models {
    /// Fresh, empty models sharing one accessor.
    pub fn new(api: Arc<dyn PointsApi>) -> Self {
        Self {
            points: Arc::new(PointsModel::new(Arc::clone(&api))),
            filter: Arc::new(FilterModel::new()),
            offers: Arc::new(OffersModel::new(Arc::clone(&api))),
            destinations: Arc::new(DestinationsModel::new(api)),
        }
    }
}

/// A message for the presenter's loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// A model committed a change.
    Model(ModelEvent),
    /// The mutation started from this form (or row) failed.
    Aborted(EditorSlot),
    /// The shake started by an abort has finished.
    ShakeFinished(EditorSlot),
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send>;

pub struct TripPresenter {
    ui: Ui,
    models: Models,
    clock: Clock,

    signal_tx: mpsc::UnboundedSender<Signal>,
    signal_rx: mpsc::UnboundedReceiver<Signal>,
    points_observer: ObserverId,
    filter_observer: ObserverId,

    list: Box<dyn View>,
    list_mounted: bool,
    sort_view: Option<Box<dyn SortView>>,
    loading_view: Option<Box<dyn View>>,
    empty_view: Option<Box<dyn View>>,

    point_presenters: IndexMap<PointId, PointPresenter>,
    new_point: NewPointPresenter,

    current_sort: SortType,
    is_loading: bool,
    pending_create: bool,
}

impl TripPresenter {
    pub fn new(mut ui: Ui, models: Models) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let tx = signal_tx.clone();
        let points_observer = models.points.add_observer(move |event| {
            let _ = tx.send(Signal::Model(event.clone()));
        });
        let tx = signal_tx.clone();
        let filter_observer = models.filter.add_observer(move |event| {
            let _ = tx.send(Signal::Model(event.clone()));
        });

        let list = ui.views.points_list();
        let new_point = NewPointPresenter::new(list.id());

        Self {
            ui,
            models,
            clock: Box::new(Utc::now),
            signal_tx,
            signal_rx,
            points_observer,
            filter_observer,
            list,
            list_mounted: false,
            sort_view: None,
            loading_view: None,
            empty_view: None,
            point_presenters: IndexMap::new(),
            new_point,
            current_sort: SortType::default(),
            is_loading: true,
            pending_create: false,
        }
    }

    /// Evaluate filters against `clock` instead of the wall clock.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Points to show: current filter, then current sort.
    pub fn points(&self) -> Vec<Point> {
        let filter = self.models.filter.filter();
        let mut points = filter.apply(&self.models.points.points(), (self.clock)());
        self.current_sort.sort(&mut points);
        points
    }

    pub fn current_sort(&self) -> SortType {
        self.current_sort
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the creation form is open.
    pub fn is_creating(&self) -> bool {
        self.new_point.is_open()
    }

    /// Ids of the rendered rows, top to bottom.
    pub fn rendered_points(&self) -> Vec<PointId> {
        self.point_presenters.keys().cloned().collect()
    }

    /// The point whose edit form is open, if any.
    pub fn editing_point(&self) -> Option<PointId> {
        self.point_presenters
            .iter()
            .find(|(_, presenter)| presenter.mode() == Mode::Editing)
            .map(|(id, _)| id.clone())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn init(&mut self) {
        info!("rendering board");
        self.render_board();
    }

    /// Prepare the creation form.
    ///
    /// Refreshes offers and destinations, resets sort and switches the
    /// filter to `everything` with a `MAJOR` update. The form opens when
    /// that update is handled, after the board has been rebuilt.
    pub async fn create_point(&mut self) -> Result<(), CoreError> {
        self.models.offers.get().await?;
        self.models.destinations.get().await?;

        self.current_sort = SortType::default();
        self.pending_create = true;
        self.models
            .filter
            .set_filter(UpdateType::Major, FilterType::Everything);
        Ok(())
    }

    /// Route a key press.
    ///
    /// Escape goes to whoever registered for it. Anything else goes to
    /// the open form if there is one, then the sort bar, then the
    /// focused row.
    pub fn handle_key(&mut self, key: Key, focused: Option<&PointId>) {
        if key == Key::Escape {
            for slot in self.ui.keys.listeners() {
                self.dispatch_escape(&slot);
            }
            return;
        }

        if self.new_point.is_open() {
            if let Some(action) = self.new_point.handle_key(&mut self.ui, key) {
                self.handle_view_action(action);
            }
            return;
        }

        if let Some(id) = self.editing_point() {
            self.forward_to_point(&id, key);
            return;
        }

        if let Some(sort) = self.sort_view.as_mut().and_then(|view| view.handle_key(key)) {
            self.handle_sort_change(sort);
            return;
        }

        if let Some(id) = focused {
            self.forward_to_point(id, key);
        }
    }

    pub fn handle_sort_change(&mut self, sort: SortType) {
        if sort == self.current_sort || !sort.is_enabled() {
            return;
        }
        debug!(%sort, "sort changed");
        self.current_sort = sort;
        self.clear_board(false);
        self.render_board();
    }

    // ── Signals ──────────────────────────────────────────────────────

    /// Wait for the next signal.
    pub async fn next_signal(&mut self) -> Option<Signal> {
        self.signal_rx.recv().await
    }

    /// Apply every signal already queued. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(signal) = self.signal_rx.try_recv() {
            self.handle_signal(signal);
            handled += 1;
        }
        handled
    }

    pub fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Model(event) => self.handle_model_event(event),
            Signal::Aborted(slot) => self.handle_aborted(slot),
            Signal::ShakeFinished(EditorSlot::Point(id)) => {
                if let Some(presenter) = self.point_presenters.get_mut(&id) {
                    presenter.finish_aborting();
                }
            }
            Signal::ShakeFinished(EditorSlot::NewPoint) => self.new_point.finish_aborting(),
        }
    }

    fn handle_model_event(&mut self, event: ModelEvent) {
        debug!(update_type = %event.update_type, "model event");
        match event.update_type {
            UpdateType::Patch => {
                let ModelPayload::Point(point) = event.payload else {
                    return;
                };
                let offers = self.models.offers.cached();
                let destinations = self.models.destinations.cached();
                if let Some(presenter) = self.point_presenters.get_mut(&point.id) {
                    presenter.init(&mut self.ui, point, &offers, &destinations);
                }
            }
            UpdateType::Minor => {
                self.clear_board(false);
                self.render_board();
            }
            UpdateType::Major => {
                self.clear_board(true);
                self.render_board();
                // Every row was just rebuilt in display mode, so the
                // creation form is the only one open.
                if std::mem::take(&mut self.pending_create) {
                    let offers = self.models.offers.cached();
                    let destinations = self.models.destinations.cached();
                    self.new_point.init(&mut self.ui, &offers, &destinations);
                }
            }
            UpdateType::Init => {
                self.is_loading = false;
                self.remove_loading();
                self.clear_board(false);
                self.render_board();
            }
        }
    }

    fn handle_aborted(&mut self, slot: EditorSlot) {
        let shake = match &slot {
            EditorSlot::Point(id) => self
                .point_presenters
                .get_mut(id)
                .and_then(PointPresenter::set_aborting),
            EditorSlot::NewPoint => self.new_point.set_aborting(),
        };
        let Some(shake) = shake else {
            debug!(?slot, "aborted form is gone");
            return;
        };
        let tx = self.signal_tx.clone();
        tokio::spawn(async move {
            shake.await;
            let _ = tx.send(Signal::ShakeFinished(slot));
        });
    }

    // ── View requests ────────────────────────────────────────────────

    fn forward_to_point(&mut self, id: &PointId, key: Key) {
        let Some(presenter) = self.point_presenters.get_mut(id) else {
            return;
        };
        match presenter.handle_key(&mut self.ui, key) {
            Some(PointRequest::ModeChange) => self.handle_mode_change(id),
            Some(PointRequest::ChangeData(action)) => self.handle_view_action(action),
            None => {}
        }
    }

    fn dispatch_escape(&mut self, slot: &EditorSlot) {
        match slot {
            EditorSlot::NewPoint => self.new_point.on_escape(&mut self.ui),
            EditorSlot::Point(id) => {
                if let Some(presenter) = self.point_presenters.get_mut(id) {
                    presenter.on_escape(&mut self.ui);
                }
            }
        }
    }

    /// Close the creation form and every edit form except `origin`'s.
    fn handle_mode_change(&mut self, origin: &PointId) {
        self.new_point.destroy(&mut self.ui);
        for (id, presenter) in &mut self.point_presenters {
            if id != origin {
                presenter.reset_view(&mut self.ui);
            }
        }
    }

    fn handle_view_action(&mut self, action: ViewAction) {
        debug!(action = %action.action, update_type = %action.update_type, point = %action.point.id, "view action");
        let slot = match action.action {
            UserAction::UpdatePoint => {
                if let Some(presenter) = self.point_presenters.get_mut(&action.point.id) {
                    presenter.set_saving();
                }
                EditorSlot::Point(action.point.id.clone())
            }
            UserAction::AddPoint => {
                self.new_point.set_saving();
                EditorSlot::NewPoint
            }
            UserAction::DeletePoint => {
                if let Some(presenter) = self.point_presenters.get_mut(&action.point.id) {
                    presenter.set_deleting();
                    presenter.finish_deleting(&mut self.ui);
                }
                EditorSlot::Point(action.point.id.clone())
            }
        };
        self.spawn_mutation(slot, action);
    }

    fn spawn_mutation(&self, slot: EditorSlot, action: ViewAction) {
        let points = Arc::clone(&self.models.points);
        let tx = self.signal_tx.clone();
        tokio::spawn(async move {
            let ViewAction {
                action,
                update_type,
                point,
            } = action;
            let result = match action {
                UserAction::UpdatePoint => points.update_point(update_type, point).await,
                UserAction::AddPoint => points.add_point(update_type, point).await,
                UserAction::DeletePoint => points.delete_point(update_type, point).await,
            };
            if let Err(e) = result {
                warn!(%action, error = %e, "mutation failed");
                let _ = tx.send(Signal::Aborted(slot));
            }
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_board(&mut self) {
        self.render_sort();
        if !self.list_mounted {
            self.ui
                .surface
                .render(self.list.id(), Mount::Root, RenderPosition::BeforeEnd);
            self.list_mounted = true;
        }

        if self.is_loading {
            self.render_loading();
            return;
        }

        let points = self.points();
        if points.is_empty() {
            self.render_empty(self.models.filter.filter());
            return;
        }

        let offers = self.models.offers.cached();
        let destinations = self.models.destinations.cached();
        for point in points {
            self.render_point(point, &offers, &destinations);
        }
    }

    fn render_sort(&mut self) {
        let view = self.ui.views.sort_view(self.current_sort);
        self.ui
            .surface
            .render(view.id(), Mount::Root, RenderPosition::AfterBegin);
        self.sort_view = Some(view);
    }

    fn render_loading(&mut self) {
        let view = self.ui.views.loading();
        self.ui
            .surface
            .render(view.id(), Mount::View(self.list.id()), RenderPosition::AfterBegin);
        self.loading_view = Some(view);
    }

    fn render_empty(&mut self, filter: FilterType) {
        let view = self.ui.views.empty_list(filter);
        self.ui
            .surface
            .render(view.id(), Mount::View(self.list.id()), RenderPosition::AfterBegin);
        self.empty_view = Some(view);
    }

    fn render_point(&mut self, point: Point, offers: &OffersList, destinations: &[Destination]) {
        let mut presenter = PointPresenter::new(self.list.id());
        let id = point.id.clone();
        presenter.init(&mut self.ui, point, offers, destinations);
        self.point_presenters.insert(id, presenter);
    }

    fn remove_loading(&mut self) {
        if let Some(view) = self.loading_view.take() {
            self.ui.surface.remove(view.id());
        }
    }

    fn clear_board(&mut self, reset_sort: bool) {
        self.new_point.destroy(&mut self.ui);
        for (_, mut presenter) in self.point_presenters.drain(..) {
            presenter.destroy(&mut self.ui);
        }

        if let Some(view) = self.sort_view.take() {
            self.ui.surface.remove(view.id());
        }
        self.remove_loading();
        if let Some(view) = self.empty_view.take() {
            self.ui.surface.remove(view.id());
        }

        if reset_sort {
            self.current_sort = SortType::default();
        }
    }
}

impl Drop for TripPresenter {
    fn drop(&mut self) {
        self.models.points.remove_observer(self.points_observer);
        self.models.filter.remove_observer(self.filter_observer);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{
        FakeApi, Op, Recorder, ViewKind, fake_ui, fixed_now, point_at,
    };
    use crate::view::FormState;
    use pretty_assertions::assert_eq;

    struct Board {
        trip: TripPresenter,
        recorder: Recorder,
        api: Arc<FakeApi>,
        models: Models,
    }

    fn trip_points() -> Vec<Point> {
        vec![
            point_at("later", 5, 10, 50),
            point_at("past", -10, -8, 300),
            point_at("soon", 2, 3, 500),
            point_at("now", -1, 1, 100),
        ]
    }

    async fn board(points: Vec<Point>) -> Board {
        let api = FakeApi::with_points(points);
        let models = Models::new(Arc::clone(&api) as Arc<dyn PointsApi>);
        let (ui, recorder) = fake_ui();
        let mut trip = TripPresenter::new(ui, models.clone()).with_clock(fixed_now);
        trip.init();
        models.offers.init().await.unwrap();
        models.destinations.init().await.unwrap();
        models.points.init().await.unwrap();
        trip.process_pending();
        Board {
            trip,
            recorder,
            api,
            models,
        }
    }

    /// Let spawned mutations and shakes run, applying their signals.
    async fn settle(trip: &mut TripPresenter) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
            trip.process_pending();
        }
    }

    fn ids(trip: &TripPresenter) -> Vec<String> {
        trip.rendered_points()
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect()
    }

    fn pid(id: &str) -> PointId {
        PointId::from(id)
    }

    fn item(id: &str) -> ViewKind {
        ViewKind::Item(pid(id))
    }

    fn form(id: &str) -> ViewKind {
        ViewKind::Form(Some(pid(id)))
    }

    #[tokio::test]
    async fn loading_until_init_then_rows() {
        let api = FakeApi::with_points(trip_points());
        let models = Models::new(Arc::clone(&api) as Arc<dyn PointsApi>);
        let (ui, recorder) = fake_ui();
        let mut trip = TripPresenter::new(ui, models.clone()).with_clock(fixed_now);

        trip.init();
        assert!(trip.is_loading());
        assert_eq!(recorder.root(), vec![ViewKind::Sort(SortType::Day), ViewKind::List]);
        assert_eq!(recorder.list(), vec![ViewKind::Loading]);

        models.points.init().await.unwrap();
        assert_eq!(trip.process_pending(), 1);

        assert!(!trip.is_loading());
        assert_eq!(
            recorder.list(),
            vec![item("past"), item("now"), item("soon"), item("later")]
        );
        assert_eq!(recorder.root().len(), 2);
    }

    #[tokio::test]
    async fn failed_load_shows_empty_state() {
        let api = FakeApi::with_points(trip_points());
        api.fail_fetches(true);
        let models = Models::new(Arc::clone(&api) as Arc<dyn PointsApi>);
        let (ui, recorder) = fake_ui();
        let mut trip = TripPresenter::new(ui, models.clone());
        trip.init();

        assert!(models.points.init().await.is_err());
        trip.process_pending();

        assert_eq!(
            recorder.list(),
            vec![ViewKind::Empty(FilterType::Everything)]
        );
    }

    #[tokio::test]
    async fn empty_state_follows_the_filter() {
        let mut b = board(vec![point_at("past", -10, -8, 300)]).await;

        b.models.filter.set_filter(UpdateType::Major, FilterType::Future);
        b.trip.process_pending();

        assert_eq!(b.recorder.list(), vec![ViewKind::Empty(FilterType::Future)]);
    }

    #[tokio::test]
    async fn filter_then_sort() {
        let mut b = board(trip_points()).await;
        assert_eq!(ids(&b.trip), vec!["past", "now", "soon", "later"]);

        b.trip.handle_sort_change(SortType::Price);
        assert_eq!(ids(&b.trip), vec!["soon", "past", "now", "later"]);
        assert_eq!(b.recorder.root()[0], ViewKind::Sort(SortType::Price));

        b.trip.handle_sort_change(SortType::Time);
        assert_eq!(ids(&b.trip), vec!["later", "past", "now", "soon"]);

        b.models.filter.set_filter(UpdateType::Minor, FilterType::Future);
        b.trip.process_pending();
        assert_eq!(ids(&b.trip), vec!["later", "soon"]);
        assert_eq!(
            b.trip.points().iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            b.trip.rendered_points()
        );
    }

    #[tokio::test]
    async fn unchanged_or_disabled_sort_is_ignored() {
        let mut b = board(trip_points()).await;
        let before = b.recorder.child_ids(Mount::Root);

        b.trip.handle_sort_change(SortType::Day);
        b.trip.handle_sort_change(SortType::Offers);

        assert_eq!(b.recorder.child_ids(Mount::Root), before);
        assert_eq!(b.trip.current_sort(), SortType::Day);
    }

    #[tokio::test]
    async fn sort_bar_keys_change_the_sort() {
        let mut b = board(trip_points()).await;

        b.trip.handle_key(Key::Char('p'), None);

        assert_eq!(b.trip.current_sort(), SortType::Price);
    }

    #[tokio::test]
    async fn major_resets_sort_minor_keeps_it() {
        let mut b = board(trip_points()).await;
        b.trip.handle_sort_change(SortType::Price);

        b.trip.handle_key(Key::Char('f'), Some(&pid("now")));
        settle(&mut b.trip).await;
        assert_eq!(b.trip.current_sort(), SortType::Price);
        let now = b.models.points.points().iter().find(|p| p.id == pid("now")).cloned();
        assert!(now.unwrap().is_favorite);
        let rebuilt = b.trip.point_presenters[&pid("now")].point().unwrap();
        assert!(rebuilt.is_favorite);

        b.models.filter.set_filter(UpdateType::Major, FilterType::Everything);
        b.trip.process_pending();
        assert_eq!(b.trip.current_sort(), SortType::Day);
        assert_eq!(b.recorder.root()[0], ViewKind::Sort(SortType::Day));
    }

    #[tokio::test]
    async fn submit_saves_then_rerenders() {
        let mut b = board(trip_points()).await;
        let soon = pid("soon");

        b.trip.handle_key(Key::Enter, Some(&soon));
        assert_eq!(b.trip.editing_point(), Some(soon.clone()));
        b.trip.handle_key(Key::Char('+'), Some(&soon));
        b.trip.handle_key(Key::Enter, Some(&soon));
        assert_eq!(b.recorder.form_state(&form("soon")), Some(FormState::SAVING));

        settle(&mut b.trip).await;

        assert_eq!(b.trip.editing_point(), None);
        assert!(b.recorder.list().iter().all(|v| matches!(v, ViewKind::Item(_))));
        let stored = b.models.points.points().iter().find(|p| p.id == soon).cloned();
        assert_eq!(stored.unwrap().base_price, 510);
        assert!(b.api.calls().contains(&"update soon".to_owned()));
    }

    #[tokio::test]
    async fn failed_submit_shakes_form_and_keeps_edits() {
        let mut b = board(trip_points()).await;
        let soon = pid("soon");
        b.api.fail_mutations(true);

        b.trip.handle_key(Key::Enter, Some(&soon));
        b.trip.handle_key(Key::Char('+'), Some(&soon));
        b.trip.handle_key(Key::Enter, Some(&soon));
        settle(&mut b.trip).await;

        assert_eq!(b.recorder.shakes(), 1);
        assert_eq!(b.trip.editing_point(), Some(soon.clone()));
        assert_eq!(b.recorder.form_state(&form("soon")), Some(FormState::default()));
        let stored = b.models.points.points().iter().find(|p| p.id == soon).cloned();
        assert_eq!(stored.unwrap().base_price, 500);

        // The edit survived the failure and goes out on the retry.
        b.api.fail_mutations(false);
        b.trip.handle_key(Key::Enter, Some(&soon));
        settle(&mut b.trip).await;
        let stored = b.models.points.points().iter().find(|p| p.id == soon).cloned();
        assert_eq!(stored.unwrap().base_price, 510);
    }

    #[tokio::test]
    async fn failed_favorite_shakes_the_row() {
        let mut b = board(trip_points()).await;
        b.api.fail_mutations(true);

        b.trip.handle_key(Key::Char('f'), Some(&pid("past")));
        settle(&mut b.trip).await;

        assert_eq!(b.recorder.shakes(), 1);
        assert_eq!(b.recorder.list().len(), 4);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let mut b = board(trip_points()).await;
        let now = pid("now");

        b.trip.handle_key(Key::Enter, Some(&now));
        b.trip.handle_key(Key::Char('d'), Some(&now));
        assert_eq!(b.trip.editing_point(), None);
        settle(&mut b.trip).await;

        assert_eq!(ids(&b.trip), vec!["past", "soon", "later"]);
        assert!(b.api.calls().contains(&"delete now".to_owned()));
    }

    #[tokio::test]
    async fn delete_marks_the_form_deleting_before_closing_it() {
        let mut b = board(trip_points()).await;
        let now = pid("now");
        b.trip.handle_key(Key::Enter, Some(&now));
        let form_id = b.recorder.find(&form("now")).unwrap();

        b.trip.handle_key(Key::Char('d'), Some(&now));

        let ops = b.recorder.ops();
        let deleting = ops
            .iter()
            .position(|op| *op == Op::Update(form_id, FormState::DELETING))
            .unwrap();
        let closed = ops
            .iter()
            .position(|op| matches!(op, Op::Replace { old, .. } if *old == form_id))
            .unwrap();
        assert!(deleting < closed, "{ops:?}");
        assert_eq!(b.recorder.list()[1], item("now"));
    }

    #[tokio::test]
    async fn failed_delete_surfaces_as_aborting() {
        let mut b = board(trip_points()).await;
        let now = pid("now");
        b.api.fail_mutations(true);

        b.trip.handle_key(Key::Enter, Some(&now));
        b.trip.handle_key(Key::Char('d'), Some(&now));
        settle(&mut b.trip).await;

        assert_eq!(b.recorder.shakes(), 1);
        assert_eq!(ids(&b.trip).len(), 4);

        b.trip.handle_key(Key::Enter, Some(&now));
        assert_eq!(
            b.recorder.form_state(&form("now")),
            Some(FormState::default())
        );
    }

    #[tokio::test]
    async fn opening_a_form_closes_every_other_form() {
        let mut b = board(trip_points()).await;

        b.trip.forward_to_point(&pid("past"), Key::Enter);
        b.trip.forward_to_point(&pid("soon"), Key::Enter);

        assert_eq!(b.trip.editing_point(), Some(pid("soon")));
        assert_eq!(
            b.recorder.list(),
            vec![item("past"), item("now"), form("soon"), item("later")]
        );
        assert_eq!(
            b.recorder.listeners(),
            vec![EditorSlot::Point(pid("soon"))]
        );
    }

    #[tokio::test]
    async fn escape_goes_to_the_listening_form() {
        let mut b = board(trip_points()).await;
        b.trip.handle_key(Key::Enter, Some(&pid("later")));

        b.trip.handle_key(Key::Escape, None);

        assert_eq!(b.trip.editing_point(), None);
        assert!(b.recorder.listeners().is_empty());
    }

    #[tokio::test]
    async fn create_point_resets_view_and_opens_form_on_top() {
        let mut b = board(trip_points()).await;
        b.trip.handle_sort_change(SortType::Price);
        b.models.filter.set_filter(UpdateType::Minor, FilterType::Past);
        b.trip.process_pending();

        b.trip.create_point().await.unwrap();
        assert!(!b.trip.is_creating());
        b.trip.process_pending();

        assert!(b.trip.is_creating());
        assert_eq!(b.models.filter.filter(), FilterType::Everything);
        assert_eq!(b.trip.current_sort(), SortType::Day);
        assert_eq!(b.recorder.list()[0], ViewKind::Form(None));
        assert_eq!(b.recorder.list().len(), 5);
        assert_eq!(b.recorder.listeners(), vec![EditorSlot::NewPoint]);
    }

    #[tokio::test]
    async fn new_point_submit_adds_and_closes_the_form() {
        let mut b = board(trip_points()).await;
        b.trip.create_point().await.unwrap();
        b.trip.process_pending();

        b.trip.handle_key(Key::Enter, None);
        assert_eq!(b.recorder.form_state(&ViewKind::Form(None)), Some(FormState::SAVING));
        settle(&mut b.trip).await;

        assert!(!b.trip.is_creating());
        assert_eq!(b.models.points.points().len(), 5);
        assert_eq!(b.recorder.list().len(), 5);
        assert!(b.recorder.listeners().is_empty());
    }

    #[tokio::test]
    async fn failed_new_point_shakes_and_stays_open() {
        let mut b = board(trip_points()).await;
        b.trip.create_point().await.unwrap();
        b.trip.process_pending();
        b.api.fail_mutations(true);

        b.trip.handle_key(Key::Enter, None);
        settle(&mut b.trip).await;

        assert!(b.trip.is_creating());
        assert_eq!(b.recorder.shakes(), 1);
        assert_eq!(
            b.recorder.form_state(&ViewKind::Form(None)),
            Some(FormState::default())
        );
    }

    #[tokio::test]
    async fn opening_a_row_form_closes_the_new_point_form() {
        let mut b = board(trip_points()).await;
        b.trip.create_point().await.unwrap();
        b.trip.process_pending();

        b.trip.forward_to_point(&pid("now"), Key::Enter);

        assert!(!b.trip.is_creating());
        assert_eq!(b.trip.editing_point(), Some(pid("now")));
    }

    #[tokio::test]
    async fn create_point_fails_when_catalog_is_unreachable() {
        let mut b = board(trip_points()).await;
        b.api.fail_fetches(true);

        assert!(b.trip.create_point().await.is_err());
        assert_eq!(b.trip.process_pending(), 0);
        assert!(!b.trip.is_creating());
    }

    #[tokio::test]
    async fn patch_reinitializes_only_the_changed_row() {
        let mut b = board(trip_points()).await;
        let before = b.recorder.child_ids(Mount::View(b.trip.list.id()));
        let root_before = b.recorder.child_ids(Mount::Root);

        let edited = Point {
            base_price: 1,
            ..point_at("soon", 2, 3, 500)
        };
        b.models.points.update_point(UpdateType::Patch, edited).await.unwrap();
        b.trip.process_pending();

        let after = b.recorder.child_ids(Mount::View(b.trip.list.id()));
        assert_eq!(after.len(), 4);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[1]);
        assert_ne!(after[2], before[2]);
        assert_eq!(after[3], before[3]);
        assert_eq!(b.recorder.child_ids(Mount::Root), root_before);
    }

    #[tokio::test]
    async fn late_signals_for_gone_presenters_are_ignored() {
        let mut b = board(trip_points()).await;

        b.trip.handle_signal(Signal::Aborted(EditorSlot::Point(pid("ghost"))));
        b.trip.handle_signal(Signal::ShakeFinished(EditorSlot::NewPoint));
        settle(&mut b.trip).await;

        assert_eq!(b.recorder.shakes(), 0);
        assert_eq!(ids(&b.trip).len(), 4);
    }
}

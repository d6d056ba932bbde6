// ── Test doubles ──
//
// An in-memory `PointsApi` with failure switches, and a fake UI whose
// factory, surface and key source all write into one shared recorder so
// tests can inspect the resulting mount tree.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use futures_util::future::BoxFuture;

use crate::api::PointsApi;
use crate::error::CoreError;
use crate::input::{EditorSlot, Key, KeySource};
use crate::model::{
    Destination, DestinationId, FilterType, Offer, OfferId, OffersList, Point, PointId, PointType,
    SortType,
};
use crate::view::{
    FormIntent, FormState, ItemIntent, Mount, PointFormView, PointItemView, RenderPosition,
    ShakeDone, SortView, Surface, Ui, View, ViewFactory, ViewId,
};

// ── Data ───────────────────────────────────────────────────────────

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// A future point (starts an hour after `fixed_now`).
pub(crate) fn sample_point(id: &str, price: u32) -> Point {
    Point {
        id: PointId::from(id),
        point_type: PointType::Taxi,
        destination: Some(DestinationId::from("d-1")),
        date_from: fixed_now() + Duration::hours(1),
        date_to: fixed_now() + Duration::hours(2),
        base_price: price,
        offers: Vec::new(),
        is_favorite: false,
    }
}

/// Point spanning `from..to` hours relative to `fixed_now`.
pub(crate) fn point_at(id: &str, from: i64, to: i64, price: u32) -> Point {
    Point {
        date_from: fixed_now() + Duration::hours(from),
        date_to: fixed_now() + Duration::hours(to),
        ..sample_point(id, price)
    }
}

fn sample_offers() -> OffersList {
    [(
        PointType::Taxi,
        vec![
            Offer {
                id: OfferId::from("1"),
                title: "Upgrade".into(),
                price: 50,
            },
            Offer {
                id: OfferId::from("2"),
                title: "Music".into(),
                price: 5,
            },
        ],
    )]
    .into_iter()
    .collect()
}

fn sample_destinations() -> Vec<Destination> {
    ["d-1", "d-2"]
        .into_iter()
        .map(|id| Destination {
            id: DestinationId::from(id),
            name: format!("City {id}"),
            description: String::new(),
            pictures: Vec::new(),
        })
        .collect()
}

// ── Fake API ───────────────────────────────────────────────────────

pub(crate) struct FakeApi {
    points: Mutex<Vec<Point>>,
    offers: OffersList,
    destinations: Vec<Destination>,
    fail_fetches: AtomicBool,
    fail_mutations: AtomicBool,
    next_id: AtomicU64,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(crate) fn with_points(points: Vec<Point>) -> Arc<Self> {
        Arc::new(Self {
            points: Mutex::new(points),
            offers: sample_offers(),
            destinations: sample_destinations(),
            fail_fetches: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
            next_id: AtomicU64::new(100),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn fail_fetches(&self, on: bool) {
        self.fail_fetches.store(on, Ordering::SeqCst);
    }

    pub(crate) fn fail_mutations(&self, on: bool) {
        self.fail_mutations.store(on, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn fetch_guard(&self) -> Result<(), CoreError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(CoreError::ConnectionFailed {
                url: "fake://".into(),
                reason: "offline".into(),
            });
        }
        Ok(())
    }

    fn mutation_guard(&self) -> Result<(), CoreError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(CoreError::Api {
                message: "boom".into(),
                status: Some(500),
            });
        }
        Ok(())
    }
}

impl PointsApi for FakeApi {
    fn points(&self) -> BoxFuture<'_, Result<Vec<Point>, CoreError>> {
        Box::pin(async move {
            self.record("points".into());
            self.fetch_guard()?;
            Ok(self.points.lock().unwrap().clone())
        })
    }

    fn offers(&self) -> BoxFuture<'_, Result<OffersList, CoreError>> {
        Box::pin(async move {
            self.record("offers".into());
            self.fetch_guard()?;
            Ok(self.offers.clone())
        })
    }

    fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>, CoreError>> {
        Box::pin(async move {
            self.record("destinations".into());
            self.fetch_guard()?;
            Ok(self.destinations.clone())
        })
    }

    fn update_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
        Box::pin(async move {
            self.record(format!("update {}", point.id));
            self.mutation_guard()?;
            let mut points = self.points.lock().unwrap();
            if let Some(slot) = points.iter_mut().find(|p| p.id == point.id) {
                *slot = point.clone();
            }
            Ok(point.clone())
        })
    }

    fn add_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
        Box::pin(async move {
            self.record("add".into());
            self.mutation_guard()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let stored = Point {
                id: PointId::new(id.to_string()),
                ..point.clone()
            };
            self.points.lock().unwrap().insert(0, stored.clone());
            Ok(stored)
        })
    }

    fn delete_point<'a>(&'a self, id: &'a PointId) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move {
            self.record(format!("delete {id}"));
            self.mutation_guard()?;
            self.points.lock().unwrap().retain(|p| &p.id != id);
            Ok(())
        })
    }
}

// ── Fake UI ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewKind {
    Sort(SortType),
    List,
    Loading,
    Empty(FilterType),
    Item(PointId),
    /// `None` for the creation form.
    Form(Option<PointId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    Update(ViewId, FormState),
    Reset(ViewId, PointId),
    Replace { new: ViewId, old: ViewId },
    Shake(ViewId),
}

#[derive(Default)]
struct RecorderState {
    next_id: u64,
    kinds: HashMap<ViewId, ViewKind>,
    children: HashMap<Option<ViewId>, Vec<ViewId>>,
    form_states: HashMap<ViewId, FormState>,
    listeners: Vec<EditorSlot>,
    ops: Vec<Op>,
}

impl RecorderState {
    fn allocate(&mut self, kind: ViewKind) -> ViewId {
        self.next_id += 1;
        let id = ViewId::new(self.next_id);
        self.kinds.insert(id, kind);
        id
    }

    fn detach(&mut self, view: ViewId) {
        for list in self.children.values_mut() {
            list.retain(|v| *v != view);
        }
    }
}

/// Shared view of everything the fake UI has been asked to do.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    state: Arc<Mutex<RecorderState>>,
}

impl Recorder {
    /// Kinds of the views mounted directly under `container`, in order.
    pub(crate) fn children(&self, container: Mount) -> Vec<ViewKind> {
        let state = self.state.lock().unwrap();
        let key = match container {
            Mount::Root => None,
            Mount::View(id) => Some(id),
        };
        state
            .children
            .get(&key)
            .into_iter()
            .flatten()
            .map(|id| state.kinds[id].clone())
            .collect()
    }

    /// Ids of the views mounted directly under `container`, in order.
    pub(crate) fn child_ids(&self, container: Mount) -> Vec<ViewId> {
        let state = self.state.lock().unwrap();
        let key = match container {
            Mount::Root => None,
            Mount::View(id) => Some(id),
        };
        state.children.get(&key).cloned().unwrap_or_default()
    }

    pub(crate) fn root(&self) -> Vec<ViewKind> {
        self.children(Mount::Root)
    }

    /// Children of the (single) points list container.
    pub(crate) fn list(&self) -> Vec<ViewKind> {
        match self.find(&ViewKind::List) {
            Some(id) => self.children(Mount::View(id)),
            None => Vec::new(),
        }
    }

    pub(crate) fn find(&self, kind: &ViewKind) -> Option<ViewId> {
        let state = self.state.lock().unwrap();
        let mounted: Vec<ViewId> = state.children.values().flatten().copied().collect();
        mounted.into_iter().find(|id| &state.kinds[id] == kind)
    }

    pub(crate) fn form_state(&self, kind: &ViewKind) -> Option<FormState> {
        let id = self.find(kind)?;
        let state = self.state.lock().unwrap();
        Some(state.form_states.get(&id).copied().unwrap_or_default())
    }

    pub(crate) fn listeners(&self) -> Vec<EditorSlot> {
        self.state.lock().unwrap().listeners.clone()
    }

    pub(crate) fn ops(&self) -> Vec<Op> {
        self.state.lock().unwrap().ops.clone()
    }

    pub(crate) fn shakes(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, Op::Shake(_)))
            .count()
    }

}

pub(crate) fn fake_ui() -> (Ui, Recorder) {
    let recorder = Recorder::default();
    let ui = Ui::new(
        Box::new(FakeViews(recorder.clone())),
        Box::new(FakeSurface(recorder.clone())),
        Box::new(FakeKeys(recorder.clone())),
    );
    (ui, recorder)
}

struct FakeViews(Recorder);

impl FakeViews {
    fn allocate(&self, kind: ViewKind) -> ViewId {
        self.0.state.lock().unwrap().allocate(kind)
    }
}

struct PlainView(ViewId);

impl View for PlainView {
    fn id(&self) -> ViewId {
        self.0
    }
}

/// `t` → time, `p` → price, `D` → day.
struct FakeSort(ViewId);

impl View for FakeSort {
    fn id(&self) -> ViewId {
        self.0
    }
}

impl SortView for FakeSort {
    fn handle_key(&mut self, key: Key) -> Option<SortType> {
        match key {
            Key::Char('t') => Some(SortType::Time),
            Key::Char('p') => Some(SortType::Price),
            Key::Char('D') => Some(SortType::Day),
            _ => None,
        }
    }
}

/// Enter → edit, `f` → favorite.
struct FakeItem {
    id: ViewId,
    recorder: Recorder,
}

impl View for FakeItem {
    fn id(&self) -> ViewId {
        self.id
    }
}

impl PointItemView for FakeItem {
    fn handle_key(&mut self, key: Key) -> Option<ItemIntent> {
        match key {
            Key::Enter => Some(ItemIntent::Edit),
            Key::Char('f') => Some(ItemIntent::Favorite),
            _ => None,
        }
    }

    fn shake(&mut self) -> ShakeDone {
        self.recorder.state.lock().unwrap().ops.push(Op::Shake(self.id));
        Box::pin(futures_util::future::ready(()))
    }
}

/// `+` raises the draft price by 10, Enter submits, `d` deletes, `c`
/// closes.
struct FakeForm {
    id: ViewId,
    draft: Point,
    recorder: Recorder,
}

impl View for FakeForm {
    fn id(&self) -> ViewId {
        self.id
    }
}

impl PointFormView for FakeForm {
    fn handle_key(&mut self, key: Key) -> Option<FormIntent> {
        match key {
            Key::Char('+') => {
                self.draft.base_price += 10;
                None
            }
            Key::Enter => Some(FormIntent::Submit(self.draft.clone())),
            Key::Char('d') => Some(FormIntent::Delete(self.draft.clone())),
            Key::Char('c') => Some(FormIntent::Close),
            _ => None,
        }
    }

    fn update_element(&mut self, form_state: FormState) {
        let mut state = self.recorder.state.lock().unwrap();
        state.form_states.insert(self.id, form_state);
        state.ops.push(Op::Update(self.id, form_state));
    }

    fn reset(&mut self, point: &Point) {
        self.draft = point.clone();
        self.recorder
            .state
            .lock()
            .unwrap()
            .ops
            .push(Op::Reset(self.id, point.id.clone()));
    }

    fn shake(&mut self) -> ShakeDone {
        self.recorder.state.lock().unwrap().ops.push(Op::Shake(self.id));
        Box::pin(futures_util::future::ready(()))
    }
}

impl ViewFactory for FakeViews {
    fn sort_view(&mut self, current: SortType) -> Box<dyn SortView> {
        Box::new(FakeSort(self.allocate(ViewKind::Sort(current))))
    }

    fn points_list(&mut self) -> Box<dyn View> {
        Box::new(PlainView(self.allocate(ViewKind::List)))
    }

    fn loading(&mut self) -> Box<dyn View> {
        Box::new(PlainView(self.allocate(ViewKind::Loading)))
    }

    fn empty_list(&mut self, filter: FilterType) -> Box<dyn View> {
        Box::new(PlainView(self.allocate(ViewKind::Empty(filter))))
    }

    fn point_item(
        &mut self,
        point: &Point,
        _offers: &OffersList,
        _destinations: &[Destination],
    ) -> Box<dyn PointItemView> {
        Box::new(FakeItem {
            id: self.allocate(ViewKind::Item(point.id.clone())),
            recorder: self.0.clone(),
        })
    }

    fn point_form(
        &mut self,
        point: Option<&Point>,
        _offers: &OffersList,
        _destinations: &[Destination],
    ) -> Box<dyn PointFormView> {
        Box::new(FakeForm {
            id: self.allocate(ViewKind::Form(point.map(|p| p.id.clone()))),
            draft: point.cloned().unwrap_or_else(|| Point::blank(fixed_now())),
            recorder: self.0.clone(),
        })
    }
}

struct FakeSurface(Recorder);

impl Surface for FakeSurface {
    fn render(&mut self, view: ViewId, container: Mount, position: RenderPosition) {
        let mut state = self.0.state.lock().unwrap();
        state.detach(view);
        let key = match container {
            Mount::Root => None,
            Mount::View(id) => Some(id),
        };
        let list = state.children.entry(key).or_default();
        match position {
            RenderPosition::AfterBegin | RenderPosition::BeforeBegin => list.insert(0, view),
            RenderPosition::BeforeEnd | RenderPosition::AfterEnd => list.push(view),
        }
    }

    fn replace(&mut self, new: ViewId, old: ViewId) {
        let mut state = self.0.state.lock().unwrap();
        state.ops.push(Op::Replace { new, old });
        for list in state.children.values_mut() {
            if let Some(slot) = list.iter_mut().find(|v| **v == old) {
                *slot = new;
            }
        }
    }

    fn remove(&mut self, view: ViewId) {
        let mut state = self.0.state.lock().unwrap();
        state.detach(view);
        state.children.remove(&Some(view));
    }
}

struct FakeKeys(Recorder);

impl KeySource for FakeKeys {
    fn listen(&mut self, slot: EditorSlot) {
        let mut state = self.0.state.lock().unwrap();
        if !state.listeners.contains(&slot) {
            state.listeners.push(slot);
        }
    }

    fn unlisten(&mut self, slot: &EditorSlot) {
        self.0.state.lock().unwrap().listeners.retain(|s| s != slot);
    }

    fn listeners(&self) -> Vec<EditorSlot> {
        self.0.state.lock().unwrap().listeners.clone()
    }
}

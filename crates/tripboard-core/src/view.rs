// ── View contracts ──
//
// Presenters talk to the screen through three seams: a `ViewFactory`
// that builds views, a `Surface` that places them by id, and the view
// handles themselves, which turn keys into intents and accept state
// updates. Nothing here knows how anything is drawn.

use futures_util::future::BoxFuture;

use crate::input::{Key, KeySource};
use crate::model::{Destination, FilterType, OffersList, Point, SortType};

/// Opaque handle naming one mounted (or mountable) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Where a view goes relative to its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPosition {
    /// Before the container itself, as a sibling.
    BeforeBegin,
    /// First child.
    AfterBegin,
    /// Last child.
    #[default]
    BeforeEnd,
    /// After the container itself, as a sibling.
    AfterEnd,
}

/// Container a view is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// The board itself.
    Root,
    View(ViewId),
}

/// Resolves once a shake animation has finished.
pub type ShakeDone = BoxFuture<'static, ()>;

pub trait View: Send {
    fn id(&self) -> ViewId;
}

/// The sort bar.
pub trait SortView: View {
    /// A key that selects a different sort column, if any.
    fn handle_key(&mut self, key: Key) -> Option<SortType>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemIntent {
    Edit,
    Favorite,
}

/// A point shown as a compact row.
pub trait PointItemView: View {
    fn handle_key(&mut self, key: Key) -> Option<ItemIntent>;

    fn shake(&mut self) -> ShakeDone;
}

/// Transient flags a form renders while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormState {
    pub is_disabled: bool,
    pub is_saving: bool,
    pub is_deleting: bool,
}

impl FormState {
    pub const SAVING: Self = Self {
        is_disabled: true,
        is_saving: true,
        is_deleting: false,
    };

    pub const DELETING: Self = Self {
        is_disabled: true,
        is_saving: false,
        is_deleting: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    /// Save the edited point.
    Submit(Point),
    /// Delete the point (or cancel, for a creation form).
    Delete(Point),
    Close,
}

/// The add/edit form.
pub trait PointFormView: View {
    fn handle_key(&mut self, key: Key) -> Option<FormIntent>;

    /// Apply transient flags. Edits in progress are kept.
    fn update_element(&mut self, state: FormState);

    /// Throw away edits and show `point` again.
    fn reset(&mut self, point: &Point);

    fn shake(&mut self) -> ShakeDone;
}

pub trait ViewFactory: Send {
    fn sort_view(&mut self, current: SortType) -> Box<dyn SortView>;

    fn points_list(&mut self) -> Box<dyn View>;

    fn loading(&mut self) -> Box<dyn View>;

    fn empty_list(&mut self, filter: FilterType) -> Box<dyn View>;

    fn point_item(
        &mut self,
        point: &Point,
        offers: &OffersList,
        destinations: &[Destination],
    ) -> Box<dyn PointItemView>;

    /// `None` builds a blank creation form.
    fn point_form(
        &mut self,
        point: Option<&Point>,
        offers: &OffersList,
        destinations: &[Destination],
    ) -> Box<dyn PointFormView>;
}

/// Places views by id.
pub trait Surface: Send {
    fn render(&mut self, view: ViewId, container: Mount, position: RenderPosition);

    /// Put `new` where `old` is and detach `old`.
    fn replace(&mut self, new: ViewId, old: ViewId);

    fn remove(&mut self, view: ViewId);
}

/// Everything a presenter needs to touch the screen.
pub struct Ui {
    pub views: Box<dyn ViewFactory>,
    pub surface: Box<dyn Surface>,
    pub keys: Box<dyn KeySource>,
}

impl Ui {
    pub fn new(
        views: Box<dyn ViewFactory>,
        surface: Box<dyn Surface>,
        keys: Box<dyn KeySource>,
    ) -> Self {
        Self {
            views,
            surface,
            keys,
        }
    }
}

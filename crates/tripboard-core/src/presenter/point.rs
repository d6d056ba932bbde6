// ── Point presenter ──
//
// Owns one point's row and edit form and swaps between them. It never
// calls back into the coordinator: anything the coordinator must act on
// is returned from `handle_key` as a `PointRequest`.

use tracing::debug;

use crate::input::{EditorSlot, Key};
use crate::model::{Destination, OffersList, Point, UpdateType, UserAction, ViewAction};
use crate::view::{
    FormIntent, FormState, ItemIntent, Mount, PointFormView, PointItemView, RenderPosition,
    ShakeDone, Ui, View, ViewId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Display,
    Editing,
}

/// What a point presenter asks of its coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointRequest {
    /// This presenter just opened its form; every other form must close.
    ModeChange,
    /// Run a mutation.
    ChangeData(ViewAction),
}

pub struct PointPresenter {
    container: ViewId,
    point: Option<Point>,
    mode: Mode,
    item: Option<Box<dyn PointItemView>>,
    form: Option<Box<dyn PointFormView>>,
}

impl PointPresenter {
    pub fn new(container: ViewId) -> Self {
        Self {
            container,
            point: None,
            mode: Mode::Display,
            item: None,
            form: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn point(&self) -> Option<&Point> {
        self.point.as_ref()
    }

    /// Build fresh views for `point`.
    ///
    /// The first call mounts the row. Later calls swap the new view of
    /// the current mode in place of the old one, so an open form stays
    /// open.
    pub fn init(
        &mut self,
        ui: &mut Ui,
        point: Point,
        offers: &OffersList,
        destinations: &[Destination],
    ) {
        let item = ui.views.point_item(&point, offers, destinations);
        let form = ui.views.point_form(Some(&point), offers, destinations);
        let prev_item = self.item.replace(item);
        let prev_form = self.form.replace(form);
        self.point = Some(point);

        let (Some(prev_item), Some(prev_form)) = (prev_item, prev_form) else {
            if let Some(item) = &self.item {
                ui.surface
                    .render(item.id(), Mount::View(self.container), RenderPosition::BeforeEnd);
            }
            return;
        };

        match (self.mode, &self.item, &self.form) {
            (Mode::Display, Some(item), _) => ui.surface.replace(item.id(), prev_item.id()),
            (Mode::Editing, _, Some(form)) => ui.surface.replace(form.id(), prev_form.id()),
            _ => {}
        }
    }

    /// Unmount whichever view is showing and drop the Escape listener.
    pub fn destroy(&mut self, ui: &mut Ui) {
        if let Some(item) = self.item.take() {
            ui.surface.remove(item.id());
        }
        if let Some(form) = self.form.take() {
            ui.surface.remove(form.id());
        }
        if self.mode == Mode::Editing {
            self.stop_listening(ui);
        }
        self.mode = Mode::Display;
    }

    /// Discard edits and fall back to the row.
    pub fn reset_view(&mut self, ui: &mut Ui) {
        if self.mode == Mode::Editing {
            self.close_form(ui);
        }
    }

    /// Escape while the form is open.
    pub fn on_escape(&mut self, ui: &mut Ui) {
        self.reset_view(ui);
    }

    pub fn handle_key(&mut self, ui: &mut Ui, key: Key) -> Option<PointRequest> {
        match self.mode {
            Mode::Display => {
                let intent = self.item.as_mut()?.handle_key(key)?;
                match intent {
                    ItemIntent::Edit => {
                        self.open_form(ui);
                        Some(PointRequest::ModeChange)
                    }
                    ItemIntent::Favorite => {
                        let toggled = self.point.as_ref()?.with_favorite_toggled();
                        Some(PointRequest::ChangeData(ViewAction::new(
                            UserAction::UpdatePoint,
                            UpdateType::Minor,
                            toggled,
                        )))
                    }
                }
            }
            Mode::Editing => {
                if key == Key::Escape {
                    self.on_escape(ui);
                    return None;
                }
                let intent = self.form.as_mut()?.handle_key(key)?;
                match intent {
                    FormIntent::Submit(update) => Some(PointRequest::ChangeData(ViewAction::new(
                        UserAction::UpdatePoint,
                        UpdateType::Minor,
                        update,
                    ))),
                    FormIntent::Delete(point) => Some(PointRequest::ChangeData(ViewAction::new(
                        UserAction::DeletePoint,
                        UpdateType::Minor,
                        point,
                    ))),
                    FormIntent::Close => {
                        self.close_form(ui);
                        None
                    }
                }
            }
        }
    }

    pub fn set_saving(&mut self) {
        self.update_form(FormState::SAVING);
    }

    pub fn set_deleting(&mut self) {
        self.update_form(FormState::DELETING);
    }

    /// Put the row back once a delete has been issued from the form.
    /// The form keeps its deleting flags until the request settles.
    pub fn finish_deleting(&mut self, ui: &mut Ui) {
        if self.mode == Mode::Editing {
            self.replace_form_with_item(ui);
        }
    }

    /// Shake whichever view is showing. Once the returned future
    /// resolves, call [`finish_aborting`](Self::finish_aborting).
    pub fn set_aborting(&mut self) -> Option<ShakeDone> {
        match self.mode {
            Mode::Display => self.item.as_mut().map(|item| item.shake()),
            Mode::Editing => self.form.as_mut().map(|form| form.shake()),
        }
    }

    /// Re-enable the form after a failed request. Edits are kept. A form
    /// closed by a failed delete is cleared too, so it reopens enabled.
    pub fn finish_aborting(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.update_element(FormState::default());
        }
    }

    fn update_form(&mut self, state: FormState) {
        if self.mode != Mode::Editing {
            return;
        }
        if let Some(form) = self.form.as_mut() {
            form.update_element(state);
        }
    }

    fn open_form(&mut self, ui: &mut Ui) {
        let (Some(item), Some(form), Some(point)) = (&self.item, &self.form, &self.point) else {
            return;
        };
        debug!(point = %point.id, "opening edit form");
        ui.surface.replace(form.id(), item.id());
        ui.keys.listen(EditorSlot::Point(point.id.clone()));
        self.mode = Mode::Editing;
    }

    fn close_form(&mut self, ui: &mut Ui) {
        if let (Some(form), Some(point)) = (self.form.as_mut(), self.point.as_ref()) {
            form.reset(point);
        }
        self.replace_form_with_item(ui);
    }

    fn replace_form_with_item(&mut self, ui: &mut Ui) {
        if let (Some(item), Some(form)) = (&self.item, &self.form) {
            ui.surface.replace(item.id(), form.id());
        }
        self.stop_listening(ui);
        self.mode = Mode::Display;
    }

    fn stop_listening(&self, ui: &mut Ui) {
        if let Some(point) = &self.point {
            ui.keys.unlisten(&EditorSlot::Point(point.id.clone()));
        }
    }
}

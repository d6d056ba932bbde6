// ── New point presenter ──

use tracing::debug;

use crate::input::{EditorSlot, Key};
use crate::model::{Destination, OffersList, UpdateType, UserAction, ViewAction};
use crate::view::{
    FormIntent, FormState, Mount, PointFormView, RenderPosition, ShakeDone, Ui, View, ViewId,
};

/// The creation form, mounted at the top of the points list.
pub struct NewPointPresenter {
    container: ViewId,
    form: Option<Box<dyn PointFormView>>,
}

impl NewPointPresenter {
    pub fn new(container: ViewId) -> Self {
        Self {
            container,
            form: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    /// Open a blank form. Does nothing when one is already open.
    pub fn init(&mut self, ui: &mut Ui, offers: &OffersList, destinations: &[Destination]) {
        if self.form.is_some() {
            return;
        }
        let form = ui.views.point_form(None, offers, destinations);
        ui.surface
            .render(form.id(), Mount::View(self.container), RenderPosition::AfterBegin);
        ui.keys.listen(EditorSlot::NewPoint);
        self.form = Some(form);
        debug!("new point form opened");
    }

    pub fn destroy(&mut self, ui: &mut Ui) {
        let Some(form) = self.form.take() else {
            return;
        };
        ui.surface.remove(form.id());
        ui.keys.unlisten(&EditorSlot::NewPoint);
        debug!("new point form closed");
    }

    pub fn on_escape(&mut self, ui: &mut Ui) {
        self.destroy(ui);
    }

    /// Submit becomes an `ADD_POINT` request; delete and close both
    /// cancel.
    pub fn handle_key(&mut self, ui: &mut Ui, key: Key) -> Option<ViewAction> {
        if key == Key::Escape {
            self.on_escape(ui);
            return None;
        }
        match self.form.as_mut()?.handle_key(key)? {
            FormIntent::Submit(point) => Some(ViewAction::new(
                UserAction::AddPoint,
                UpdateType::Minor,
                point,
            )),
            FormIntent::Delete(_) | FormIntent::Close => {
                self.destroy(ui);
                None
            }
        }
    }

    pub fn set_saving(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.update_element(FormState::SAVING);
        }
    }

    pub fn set_aborting(&mut self) -> Option<ShakeDone> {
        self.form.as_mut().map(|form| form.shake())
    }

    pub fn finish_aborting(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.update_element(FormState::default());
        }
    }
}

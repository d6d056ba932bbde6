//! Terminal implementations of the core view contracts.
//!
//! Each handle is a `ViewId` into the shared [`Scene`](crate::scene::Scene);
//! key handling and state updates edit the scene entry under the lock.
//! Dropping a handle releases its entry once nothing shows it.

use chrono::Utc;

use tripboard_core::model::find_destination;
use tripboard_core::{
    Destination, FilterType, FormIntent, FormState, ItemIntent, Key, Mount, OffersList,
    Point, PointFormView, PointItemView, RenderPosition, ShakeDone, SortType, SortView, Surface,
    View, ViewFactory, ViewId,
};

use crate::form::FormDraft;
use crate::scene::{FormNode, ItemNode, Node, SharedScene, lock};

/// Builds views into the shared scene.
pub struct SceneViews {
    scene: SharedScene,
}

impl SceneViews {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }

    fn handle(&self, node: Node) -> Handle {
        let id = lock(&self.scene).add(node);
        Handle {
            id,
            scene: SharedScene::clone(&self.scene),
        }
    }
}

impl ViewFactory for SceneViews {
    fn sort_view(&mut self, current: SortType) -> Box<dyn SortView> {
        Box::new(self.handle(Node::Sort(current)))
    }

    fn points_list(&mut self) -> Box<dyn View> {
        Box::new(self.handle(Node::List))
    }

    fn loading(&mut self) -> Box<dyn View> {
        Box::new(self.handle(Node::Loading))
    }

    fn empty_list(&mut self, filter: FilterType) -> Box<dyn View> {
        Box::new(self.handle(Node::Empty(filter)))
    }

    fn point_item(
        &mut self,
        point: &Point,
        offers: &OffersList,
        destinations: &[Destination],
    ) -> Box<dyn PointItemView> {
        let node = ItemNode {
            destination: find_destination(destinations, point.destination.as_ref())
                .map(|d| d.name.clone()),
            offers: offers
                .selected(point.point_type, &point.offers)
                .cloned()
                .collect(),
            point: point.clone(),
        };
        Box::new(self.handle(Node::Item(node)))
    }

    fn point_form(
        &mut self,
        point: Option<&Point>,
        offers: &OffersList,
        destinations: &[Destination],
    ) -> Box<dyn PointFormView> {
        let node = FormNode {
            draft: FormDraft::new(point, offers, destinations, Utc::now()),
            state: FormState::default(),
        };
        Box::new(self.handle(Node::Form(Box::new(node))))
    }
}

/// Places views in the shared scene.
pub struct SceneSurface {
    scene: SharedScene,
}

impl SceneSurface {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }
}

impl Surface for SceneSurface {
    fn render(&mut self, view: ViewId, container: Mount, position: RenderPosition) {
        lock(&self.scene).attach(view, container, position);
    }

    fn replace(&mut self, new: ViewId, old: ViewId) {
        lock(&self.scene).replace(new, old);
    }

    fn remove(&mut self, view: ViewId) {
        lock(&self.scene).remove(view);
    }
}

/// One scene entry. Which traits apply depends on the entry's node.
struct Handle {
    id: ViewId,
    scene: SharedScene,
}

impl Handle {
    fn shake(&self) -> ShakeDone {
        let rx = lock(&self.scene).start_shake(self.id);
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        lock(&self.scene).release(self.id);
    }
}

impl View for Handle {
    fn id(&self) -> ViewId {
        self.id
    }
}

impl SortView for Handle {
    fn handle_key(&mut self, key: Key) -> Option<SortType> {
        match key {
            Key::Char('d') => Some(SortType::Day),
            Key::Char('v') => Some(SortType::Event),
            Key::Char('t') => Some(SortType::Time),
            Key::Char('p') => Some(SortType::Price),
            Key::Char('o') => Some(SortType::Offers),
            _ => None,
        }
    }
}

impl PointItemView for Handle {
    fn handle_key(&mut self, key: Key) -> Option<ItemIntent> {
        match key {
            Key::Enter | Key::Char('e') => Some(ItemIntent::Edit),
            Key::Char('f') => Some(ItemIntent::Favorite),
            _ => None,
        }
    }

    fn shake(&mut self) -> ShakeDone {
        Handle::shake(self)
    }
}

impl PointFormView for Handle {
    fn handle_key(&mut self, key: Key) -> Option<FormIntent> {
        let mut scene = lock(&self.scene);
        let Some(Node::Form(form)) = scene.node_mut(self.id) else {
            return None;
        };
        if form.state.is_disabled {
            return None;
        }
        form.draft.handle_key(key)
    }

    fn update_element(&mut self, state: FormState) {
        if let Some(Node::Form(form)) = lock(&self.scene).node_mut(self.id) {
            form.state = state;
        }
    }

    fn reset(&mut self, point: &Point) {
        if let Some(Node::Form(form)) = lock(&self.scene).node_mut(self.id) {
            form.draft.reset(point);
        }
    }

    fn shake(&mut self) -> ShakeDone {
        Handle::shake(self)
    }
}

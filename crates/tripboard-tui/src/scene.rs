//! Scene graph: the retained tree the presenters mount views into.
//!
//! Every view handle built by [`crate::views`] owns one entry here. The
//! presenters place entries with `render` / `replace` / `remove`; the
//! board renderer walks the attached tree top to bottom. Detached
//! entries stay alive until their handle drops, so a presenter can swap
//! a row and its form back and forth.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::warn;

use tripboard_core::{
    FilterType, FormState, Mount, Offer, Point, RenderPosition, SortType, ViewId,
};

use crate::form::FormDraft;

/// Ticks a shake lasts.
pub const SHAKE_TICKS: u8 = 6;

pub type SharedScene = Arc<Mutex<Scene>>;

pub fn shared() -> SharedScene {
    Arc::new(Mutex::new(Scene::default()))
}

/// Lock the scene, recovering from a poisoned lock.
pub fn lock(scene: &SharedScene) -> MutexGuard<'_, Scene> {
    scene.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A point row as rendered.
#[derive(Debug, Clone)]
pub struct ItemNode {
    pub point: Point,
    pub destination: Option<String>,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone)]
pub struct FormNode {
    pub draft: FormDraft,
    pub state: FormState,
}

#[derive(Debug, Clone)]
pub enum Node {
    Sort(SortType),
    List,
    Loading,
    Empty(FilterType),
    Item(ItemNode),
    Form(Box<FormNode>),
}

struct Shake {
    remaining: u8,
    done: oneshot::Sender<()>,
}

struct Entry {
    node: Node,
    children: Vec<ViewId>,
    parent: Option<Mount>,
    shake: Option<Shake>,
}

pub struct Scene {
    next_id: u64,
    entries: HashMap<ViewId, Entry>,
    root: Vec<ViewId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: HashMap::new(),
            root: Vec::new(),
        }
    }
}

impl Scene {
    /// Create a detached entry.
    pub fn add(&mut self, node: Node) -> ViewId {
        let id = ViewId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                node,
                children: Vec::new(),
                parent: None,
                shake: None,
            },
        );
        id
    }

    pub fn node(&self, id: ViewId) -> Option<&Node> {
        self.entries.get(&id).map(|e| &e.node)
    }

    pub fn node_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        self.entries.get_mut(&id).map(|e| &mut e.node)
    }

    pub fn children(&self, mount: Mount) -> &[ViewId] {
        match mount {
            Mount::Root => self.root.as_slice(),
            Mount::View(id) => self
                .entries
                .get(&id)
                .map_or(&[][..], |e| e.children.as_slice()),
        }
    }

    pub fn is_attached(&self, id: ViewId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.parent.is_some())
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn attach(&mut self, view: ViewId, container: Mount, position: RenderPosition) {
        if !self.entries.contains_key(&view) || container == Mount::View(view) {
            warn!(view = view.raw(), "ignoring render of unknown view");
            return;
        }
        self.detach(view);

        let target = match (position, container) {
            (RenderPosition::AfterBegin, _) | (RenderPosition::BeforeBegin, Mount::Root) => {
                Some((container, 0))
            }
            (RenderPosition::BeforeEnd, _) | (RenderPosition::AfterEnd, Mount::Root) => {
                let len = self.children(container).len();
                Some((container, len))
            }
            (RenderPosition::BeforeBegin, Mount::View(anchor)) => self.position_of(anchor),
            (RenderPosition::AfterEnd, Mount::View(anchor)) => {
                self.position_of(anchor).map(|(parent, i)| (parent, i + 1))
            }
        };
        let Some((parent, index)) = target else {
            warn!(view = view.raw(), "render anchor is not mounted");
            return;
        };
        self.insert_at(view, parent, index);
    }

    /// Put `new` where `old` is and detach `old`.
    pub fn replace(&mut self, new: ViewId, old: ViewId) {
        if new == old || !self.entries.contains_key(&new) {
            return;
        }
        self.detach(new);
        let Some((parent, index)) = self.detach(old) else {
            warn!(view = old.raw(), "replaced view is not mounted");
            return;
        };
        self.insert_at(new, parent, index);
    }

    /// Detach `view` and drop it along with everything under it.
    pub fn remove(&mut self, view: ViewId) {
        self.detach(view);
        let mut stack = vec![view];
        while let Some(id) = stack.pop() {
            if let Some(entry) = self.entries.remove(&id) {
                stack.extend(entry.children);
            }
        }
    }

    /// Drop `view` if nothing shows it any more.
    pub fn release(&mut self, view: ViewId) {
        if !self.is_attached(view) {
            self.remove(view);
        }
    }

    /// Start shaking `view`. The receiver fires when the shake ends, or
    /// errors if the view goes away first.
    pub fn start_shake(&mut self, view: ViewId) -> oneshot::Receiver<()> {
        let (done, rx) = oneshot::channel();
        if let Some(entry) = self.entries.get_mut(&view) {
            entry.shake = Some(Shake {
                remaining: SHAKE_TICKS,
                done,
            });
        }
        rx
    }

    /// Horizontal offset of a shaking view for this frame.
    pub fn shake_offset(&self, view: ViewId) -> u16 {
        self.entries
            .get(&view)
            .and_then(|e| e.shake.as_ref())
            .map_or(0, |s| u16::from(s.remaining % 2) * 2)
    }

    /// Advance shakes by one tick, firing the ones that finish.
    pub fn tick(&mut self) {
        for entry in self.entries.values_mut() {
            let Some(shake) = entry.shake.as_mut() else {
                continue;
            };
            shake.remaining = shake.remaining.saturating_sub(1);
            if shake.remaining == 0 {
                if let Some(shake) = entry.shake.take() {
                    let _ = shake.done.send(());
                }
            }
        }
    }

    fn position_of(&self, view: ViewId) -> Option<(Mount, usize)> {
        let parent = self.entries.get(&view)?.parent?;
        let index = self.children(parent).iter().position(|id| *id == view)?;
        Some((parent, index))
    }

    fn detach(&mut self, view: ViewId) -> Option<(Mount, usize)> {
        let (parent, index) = self.position_of(view)?;
        if let Some(siblings) = self.siblings_mut(parent) {
            siblings.remove(index);
        }
        if let Some(entry) = self.entries.get_mut(&view) {
            entry.parent = None;
        }
        Some((parent, index))
    }

    fn insert_at(&mut self, view: ViewId, parent: Mount, index: usize) {
        let Some(siblings) = self.siblings_mut(parent) else {
            warn!(view = view.raw(), "render container is gone");
            return;
        };
        siblings.insert(index.min(siblings.len()), view);
        if let Some(entry) = self.entries.get_mut(&view) {
            entry.parent = Some(parent);
        }
    }

    fn siblings_mut(&mut self, mount: Mount) -> Option<&mut Vec<ViewId>> {
        match mount {
            Mount::Root => Some(&mut self.root),
            Mount::View(id) => self.entries.get_mut(&id).map(|e| &mut e.children),
        }
    }
}

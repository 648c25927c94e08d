use crate::{foundation::core::Rect, layout::placement::OverlayLayout};

/// Handle to a view owned by a [`ViewHierarchy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub u32);

/// The slice of the host's view system the engine needs: ancestry, local frames, and
/// attaching/detaching overlay children.
pub trait ViewHierarchy {
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// Frame of `view` in its parent's coordinate space.
    fn frame(&self, view: ViewId) -> Rect;

    fn remove_from_parent(&mut self, view: ViewId);

    fn add_child(&mut self, parent: ViewId, child: ViewId, layout: OverlayLayout);
}

#[derive(Clone, Debug)]
struct ViewNode {
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    frame: Rect,
    layout: Option<OverlayLayout>,
}

/// Arena-backed [`ViewHierarchy`] for headless hosts and tests.
#[derive(Clone, Debug)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
}

impl ViewTree {
    /// Create a tree whose root has the given frame.
    pub fn new(root_frame: Rect) -> Self {
        Self {
            nodes: vec![ViewNode {
                parent: None,
                children: Vec::new(),
                frame: root_frame,
                layout: None,
            }],
        }
    }

    pub fn root(&self) -> ViewId {
        ViewId(0)
    }

    /// Add a view under `parent`.
    pub fn insert(&mut self, parent: ViewId, frame: Rect) -> ViewId {
        let id = self.insert_detached(frame);
        self.link(parent, id);
        id
    }

    /// Create a view with no parent, e.g. overlay content not yet attached anywhere.
    pub fn insert_detached(&mut self, frame: Rect) -> ViewId {
        let id = ViewId(self.nodes.len() as u32);
        self.nodes.push(ViewNode {
            parent: None,
            children: Vec::new(),
            frame,
            layout: None,
        });
        id
    }

    pub fn children(&self, view: ViewId) -> &[ViewId] {
        &self.node(view).children
    }

    /// Layout constraints set by the last [`ViewHierarchy::add_child`], if attached that way.
    pub fn layout_of(&self, view: ViewId) -> Option<OverlayLayout> {
        self.node(view).layout
    }

    pub fn set_frame(&mut self, view: ViewId, frame: Rect) {
        self.node_mut(view).frame = frame;
    }

    fn link(&mut self, parent: ViewId, child: ViewId) {
        assert!(
            !self.is_ancestor_or_self(child, parent),
            "attaching {child:?} under {parent:?} would create a cycle"
        );
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn is_ancestor_or_self(&self, candidate: ViewId, mut view: ViewId) -> bool {
        loop {
            if view == candidate {
                return true;
            }
            match self.node(view).parent {
                Some(p) => view = p,
                None => return false,
            }
        }
    }

    fn node(&self, view: ViewId) -> &ViewNode {
        &self.nodes[view.0 as usize]
    }

    fn node_mut(&mut self, view: ViewId) -> &mut ViewNode {
        &mut self.nodes[view.0 as usize]
    }
}

impl ViewHierarchy for ViewTree {
    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.node(view).parent
    }

    fn frame(&self, view: ViewId) -> Rect {
        self.node(view).frame
    }

    fn remove_from_parent(&mut self, view: ViewId) {
        let Some(parent) = self.node_mut(view).parent.take() else {
            return;
        };
        self.node_mut(view).layout = None;
        self.node_mut(parent).children.retain(|c| *c != view);
    }

    fn add_child(&mut self, parent: ViewId, child: ViewId, layout: OverlayLayout) {
        self.remove_from_parent(child);
        self.link(parent, child);
        self.node_mut(child).layout = Some(layout);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/view.rs"]
mod tests;

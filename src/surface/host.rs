use crate::{
    foundation::core::SurfaceSize,
    layout::view::{ViewHierarchy, ViewId, ViewTree},
};

/// What the overlay surface needs from the windowing/compositing system that hosts it.
///
/// All calls happen on the host's UI thread.
pub trait SurfaceHost {
    /// The surface's own view; auxiliary overlays are attached under it and anchor offsets
    /// are measured relative to it.
    fn root(&self) -> ViewId;

    fn size(&self) -> SurfaceSize;

    fn views(&self) -> &dyn ViewHierarchy;

    fn views_mut(&mut self) -> &mut dyn ViewHierarchy;

    /// Schedule a redraw of the surface on a later frame.
    fn request_redraw(&mut self);

    fn set_visible(&mut self, visible: bool);

    /// While capturing, pointer input must not reach the screen underneath.
    fn set_input_capture(&mut self, capture: bool);
}

/// In-memory host: owns a [`ViewTree`] and records what the surface asked for.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    tree: ViewTree,
    size: SurfaceSize,
    redraw_requests: u64,
    visible: bool,
    capturing_input: bool,
}

impl HeadlessHost {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            tree: ViewTree::new(size.bounds()),
            size,
            redraw_requests: 0,
            visible: false,
            capturing_input: false,
        }
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }

    /// Return and reset the number of redraw requests since the last call.
    pub fn take_redraw_requests(&mut self) -> u64 {
        std::mem::take(&mut self.redraw_requests)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_capturing_input(&self) -> bool {
        self.capturing_input
    }
}

impl SurfaceHost for HeadlessHost {
    fn root(&self) -> ViewId {
        self.tree.root()
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn views(&self) -> &dyn ViewHierarchy {
        &self.tree
    }

    fn views_mut(&mut self) -> &mut dyn ViewHierarchy {
        &mut self.tree
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_input_capture(&mut self, capture: bool) {
        self.capturing_input = capture;
    }
}

use std::{cell::OnceCell, fmt, rc::Rc, time::Duration};

use crate::{
    animation::{
        animator::{AnimationListener, AnimatorState, Repeat, ValueAnimator},
        ease::Ease,
    },
    config::SurfaceConfig,
    draw::canvas::Canvas,
    layout::{
        placement::{OverlayLayout, accumulated_top_offset, place_overlay},
        view::ViewId,
    },
    paint::PaintSet,
    surface::{host::SurfaceHost, target::Target},
};

/// Engine-level state derived from the surface fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfacePhase {
    /// Not started, or fully faded out.
    Idle,
    FadingIn,
    /// Visible with no target on screen.
    Visible,
    /// A target is growing or steady, its effect pulsing.
    TargetActive,
    /// The current target's cut-out is closing.
    TargetShrinking,
    FadingOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FadeDirection {
    In,
    Out,
}

struct Fade {
    direction: FadeDirection,
    animator: ValueAnimator,
    on_complete: Option<Box<dyn FnOnce()>>,
}

/// The full-screen dim layer with an animated cut-out.
///
/// Holds at most one current [`Target`] together with its shape and effect animators. The
/// host feeds frame time through [`on_frame`](Self::on_frame) and repaints through
/// [`draw`](Self::draw) whenever a redraw was requested.
pub struct OverlaySurface<H: SurfaceHost> {
    host: H,
    config: SurfaceConfig,
    paints: OnceCell<PaintSet>,
    alpha: f64,
    shown: bool,
    fade: Option<Fade>,
    target: Option<Rc<Target>>,
    attached_overlay: Option<ViewId>,
    shape_animator: Option<ValueAnimator>,
    effect_animator: Option<ValueAnimator>,
}

impl<H: SurfaceHost> OverlaySurface<H> {
    pub fn new(host: H, config: SurfaceConfig) -> Self {
        Self {
            host,
            config,
            paints: OnceCell::new(),
            alpha: 0.0,
            shown: false,
            fade: None,
            target: None,
            attached_overlay: None,
            shape_animator: None,
            effect_animator: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Surface opacity in `[0, 1]`, applied by the compositor on top of [`draw`](Self::draw).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn current_target(&self) -> Option<&Rc<Target>> {
        self.target.as_ref()
    }

    pub fn shape_animator(&self) -> Option<&ValueAnimator> {
        self.shape_animator.as_ref()
    }

    pub fn effect_animator(&self) -> Option<&ValueAnimator> {
        self.effect_animator.as_ref()
    }

    pub fn shape_progress(&self) -> Option<f64> {
        self.shape_animator.as_ref().map(ValueAnimator::value)
    }

    pub fn effect_progress(&self) -> Option<f64> {
        self.effect_animator.as_ref().map(ValueAnimator::value)
    }

    pub fn phase(&self) -> SurfacePhase {
        if let Some(fade) = &self.fade {
            return match fade.direction {
                FadeDirection::In => SurfacePhase::FadingIn,
                FadeDirection::Out => SurfacePhase::FadingOut,
            };
        }
        if !self.shown {
            return SurfacePhase::Idle;
        }
        match (&self.target, &self.shape_animator, &self.effect_animator) {
            (Some(_), Some(_), Some(_)) => SurfacePhase::TargetActive,
            (Some(_), Some(shape), None) if shape.is_running() => SurfacePhase::TargetShrinking,
            _ => SurfacePhase::Visible,
        }
    }

    /// Fade the surface in. `on_complete` runs once, when the fade reaches its natural end.
    #[tracing::instrument(skip(self, on_complete))]
    pub fn start_engine(
        &mut self,
        duration: Duration,
        ease: Ease,
        on_complete: impl FnOnce() + 'static,
    ) {
        self.shown = true;
        self.alpha = 0.0;
        self.host.set_visible(true);
        self.host.set_input_capture(true);
        self.begin_fade(FadeDirection::In, 0.0, 1.0, duration, ease, Box::new(on_complete));
    }

    /// Fade the surface out from its current opacity. At the natural end the surface is
    /// hidden, releases input, drops its target, and then runs `on_complete`.
    #[tracing::instrument(skip(self, on_complete))]
    pub fn finish_engine(
        &mut self,
        duration: Duration,
        ease: Ease,
        on_complete: impl FnOnce() + 'static,
    ) {
        let from = self.alpha;
        self.begin_fade(FadeDirection::Out, from, 0.0, duration, ease, Box::new(on_complete));
    }

    /// Make `target` current, replacing any previous target and its animators.
    ///
    /// `listener` observes the lifecycle of both the shape and the effect animator.
    #[tracing::instrument(skip_all, fields(anchor = ?target.anchor()))]
    pub fn start_target(&mut self, target: Rc<Target>, listener: Option<AnimationListener>) {
        if !self.shown {
            tracing::warn!("start_target called while the engine is idle");
        }

        self.detach_overlay();
        if let Some(overlay) = target.overlay() {
            let layout = self.placement_for(&target);
            let root = self.host.root();
            let views = self.host.views_mut();
            views.remove_from_parent(overlay);
            views.add_child(root, overlay, layout);
            self.attached_overlay = Some(overlay);
            tracing::debug!(?overlay, ?layout, "attached auxiliary overlay");
        }

        supersede(&mut self.shape_animator);
        supersede(&mut self.effect_animator);

        let shape = target.shape();
        let effect = target.effect();
        let shape_animator = ValueAnimator::new(0.0, 1.0, shape.duration(), shape.ease())
            .with_listener(listener.clone());
        let effect_animator = ValueAnimator::new(0.0, 1.0, effect.duration(), effect.ease())
            .with_repeat(Repeat::infinite(effect.repeat_mode()))
            .with_listener(listener);

        self.target = Some(target);
        self.shape_animator.insert(shape_animator).start();
        self.effect_animator.insert(effect_animator).start();
        self.host.request_redraw();
    }

    /// Close the current target's cut-out from wherever it is now and stop its effect.
    ///
    /// Without a current target, or once its shrink has ended, this does nothing.
    #[tracing::instrument(skip_all)]
    pub fn finish_target(&mut self, listener: Option<AnimationListener>) {
        let Some(target) = &self.target else {
            tracing::debug!("finish_target without a current target");
            return;
        };
        let shrunk = self.effect_animator.is_none()
            && !self
                .shape_animator
                .as_ref()
                .is_some_and(ValueAnimator::is_running);
        if shrunk {
            tracing::debug!("finish_target after the target already closed");
            return;
        }
        let Some(current) = self.shape_progress() else {
            return;
        };

        let shape = target.shape();
        let shrink = ValueAnimator::new(current, 0.0, shape.duration(), shape.ease())
            .with_listener(listener);

        if let Some(mut effect) = self.effect_animator.take() {
            effect.detach_listener();
            effect.cancel();
        }
        supersede(&mut self.shape_animator);
        self.shape_animator.insert(shrink).start();
        tracing::debug!(from = current, "shrinking target");
        self.host.request_redraw();
    }

    /// Advance all animations by one frame. Returns whether a redraw was requested.
    pub fn on_frame(&mut self, dt: Duration) -> bool {
        let mut redraw = false;

        if let Some(fade) = &mut self.fade {
            if fade.animator.advance(dt) {
                self.alpha = fade.animator.value();
                self.host.request_redraw();
                redraw = true;
            }
            if fade.animator.state() == AnimatorState::Ended {
                if let Some(fade) = self.fade.take() {
                    self.complete_fade(fade);
                }
            }
        }

        for animator in [&mut self.shape_animator, &mut self.effect_animator]
            .into_iter()
            .flatten()
        {
            if animator.advance(dt) {
                self.host.request_redraw();
                redraw = true;
            }
        }

        tracing::trace!(?dt, redraw, "frame");
        redraw
    }

    /// Paint one frame: dim layer, then the effect, then the cut-out.
    ///
    /// The cut-out is drawn last so that it clears everything underneath it.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let paints = self
            .paints
            .get_or_init(|| PaintSet::new(self.config.background));

        let bounds = canvas.size().bounds();
        canvas.fill_rect(bounds, &paints.background);

        let Some(target) = &self.target else {
            return;
        };
        if let Some(effect) = &self.effect_animator {
            target
                .effect()
                .draw(canvas, target.anchor(), effect.value(), &paints.effect);
        }
        if let Some(shape) = &self.shape_animator {
            target
                .shape()
                .draw(canvas, target.anchor(), shape.value(), &paints.shape);
        }
    }

    /// Tear the surface down when the host detaches it.
    ///
    /// Running animators are cancelled and report it to their listeners; a pending fade is
    /// dropped without running its completion.
    #[tracing::instrument(skip_all)]
    pub fn detach(&mut self) {
        self.fade = None;
        for mut animator in [self.shape_animator.take(), self.effect_animator.take()]
            .into_iter()
            .flatten()
        {
            animator.cancel();
        }
        self.detach_overlay();
        self.target = None;
        self.shown = false;
        self.alpha = 0.0;
        self.host.set_visible(false);
        self.host.set_input_capture(false);
    }

    fn begin_fade(
        &mut self,
        direction: FadeDirection,
        from: f64,
        to: f64,
        duration: Duration,
        ease: Ease,
        on_complete: Box<dyn FnOnce()>,
    ) {
        if self.fade.take().is_some() {
            tracing::debug!("superseding a running fade");
        }
        let animator = ValueAnimator::new(from, to, duration, ease);
        self.fade.insert(Fade {
            direction,
            animator,
            on_complete: Some(on_complete),
        })
        .animator
        .start();
        self.host.request_redraw();
    }

    fn complete_fade(&mut self, mut fade: Fade) {
        tracing::debug!(direction = ?fade.direction, "fade complete");
        if fade.direction == FadeDirection::Out {
            supersede(&mut self.shape_animator);
            supersede(&mut self.effect_animator);
            self.detach_overlay();
            self.target = None;
            self.shown = false;
            self.host.set_visible(false);
            self.host.set_input_capture(false);
        }
        if let Some(on_complete) = fade.on_complete.take() {
            on_complete();
        }
    }

    fn placement_for(&self, target: &Target) -> OverlayLayout {
        let surface_height = f64::from(self.host.size().height);
        let (offset, view_height) = match target.anchor_view() {
            Some(view) => {
                let views = self.host.views();
                (
                    accumulated_top_offset(views, view, self.host.root()),
                    views.frame(view).height(),
                )
            }
            None => (target.anchor().y, 0.0),
        };
        place_overlay(
            target.anchor(),
            surface_height,
            offset,
            view_height,
            self.config.overlay_margin,
        )
    }

    fn detach_overlay(&mut self) {
        if let Some(overlay) = self.attached_overlay.take() {
            self.host.views_mut().remove_from_parent(overlay);
        }
    }
}

impl<H: SurfaceHost + fmt::Debug> fmt::Debug for OverlaySurface<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlaySurface")
            .field("host", &self.host)
            .field("phase", &self.phase())
            .field("alpha", &self.alpha)
            .field("target", &self.target)
            .field("shape_progress", &self.shape_progress())
            .field("effect_progress", &self.effect_progress())
            .finish_non_exhaustive()
    }
}

/// Drop an animator so that it can never tick or notify again.
fn supersede(slot: &mut Option<ValueAnimator>) {
    if let Some(mut old) = slot.take() {
        old.detach_listener();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/overlay.rs"]
mod tests;

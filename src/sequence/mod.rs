use std::{cell::Cell, fmt, rc::Rc, time::Duration};

use crate::{
    animation::animator::{AnimationEvent, AnimationListener},
    config::SpotlightConfig,
    foundation::error::{SpotlightError, SpotlightResult},
    surface::{host::SurfaceHost, overlay::OverlaySurface, target::Target},
};

/// Session-level hooks for a [`Spotlight`] run.
pub trait SpotlightListener {
    /// The fade-in finished and the first target is about to show.
    fn on_started(&self) {}

    /// The fade-out finished; the surface is hidden.
    fn on_ended(&self) {}
}

/// Where a [`Spotlight`] session is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpotlightState {
    Idle,
    /// Fading in.
    Starting,
    /// The target at this index is on screen.
    Showing(usize),
    /// Target `from` is shrinking; `to` shows next, or the session finishes when `None`.
    Switching { from: usize, to: Option<usize> },
    /// Fading out.
    Finishing,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Signal {
    EngineStarted,
    TargetFinished,
    EngineFinished,
}

/// Walks an [`OverlaySurface`] through an ordered list of targets.
///
/// Completion callbacks from the surface only record a signal; the sequencer reacts to it
/// after the surface has finished its frame, so no surface call ever re-enters the surface.
pub struct Spotlight<H: SurfaceHost> {
    surface: OverlaySurface<H>,
    config: SpotlightConfig,
    targets: Vec<Rc<Target>>,
    state: SpotlightState,
    signal: Rc<Cell<Option<Signal>>>,
    listener: Option<Box<dyn SpotlightListener>>,
}

impl<H: SurfaceHost> Spotlight<H> {
    pub fn new(host: H, config: SpotlightConfig, targets: Vec<Target>) -> SpotlightResult<Self> {
        config.validate()?;
        if targets.is_empty() {
            return Err(SpotlightError::validation(
                "a spotlight needs at least one target",
            ));
        }
        Ok(Self {
            surface: OverlaySurface::new(host, config.surface),
            config,
            targets: targets.into_iter().map(Rc::new).collect(),
            state: SpotlightState::Idle,
            signal: Rc::new(Cell::new(None)),
            listener: None,
        })
    }

    pub fn with_listener(mut self, listener: impl SpotlightListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn surface(&self) -> &OverlaySurface<H> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut OverlaySurface<H> {
        &mut self.surface
    }

    pub fn into_host(self) -> H {
        self.surface.into_host()
    }

    pub fn targets(&self) -> &[Rc<Target>] {
        &self.targets
    }

    pub fn state(&self) -> SpotlightState {
        self.state
    }

    /// Index of the target on screen, if one is steadily showing.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SpotlightState::Showing(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == SpotlightState::Finished
    }

    /// Fade in; the first target shows once the fade completes.
    pub fn start(&mut self) {
        if !matches!(self.state, SpotlightState::Idle | SpotlightState::Finished) {
            tracing::debug!(state = ?self.state, "start ignored");
            return;
        }
        let signal = Rc::clone(&self.signal);
        let fade = self.config.start;
        self.state = SpotlightState::Starting;
        self.surface.start_engine(fade.duration(), fade.ease, move || {
            signal.set(Some(Signal::EngineStarted));
        });
    }

    /// Move to the following target, or finish after the last one.
    pub fn next(&mut self) {
        match self.state {
            SpotlightState::Showing(index) if index + 1 < self.targets.len() => {
                self.switch(index, Some(index + 1));
            }
            SpotlightState::Showing(index) => self.switch(index, None),
            state => tracing::debug!(?state, "next ignored"),
        }
    }

    pub fn previous(&mut self) {
        match self.state {
            SpotlightState::Showing(index) if index > 0 => self.switch(index, Some(index - 1)),
            state => tracing::debug!(?state, "previous ignored"),
        }
    }

    /// Jump to the target at `index`.
    pub fn show(&mut self, index: usize) -> SpotlightResult<()> {
        if index >= self.targets.len() {
            return Err(SpotlightError::validation(format!(
                "target index {index} out of range (len {})",
                self.targets.len()
            )));
        }
        match self.state {
            SpotlightState::Showing(current) if current != index => {
                self.switch(current, Some(index));
            }
            state => tracing::debug!(?state, index, "show ignored"),
        }
        Ok(())
    }

    /// Close the current target and fade out.
    pub fn finish(&mut self) {
        match self.state {
            SpotlightState::Showing(index) => self.switch(index, None),
            state => tracing::debug!(?state, "finish ignored"),
        }
    }

    /// Advance the surface by one frame and react to whatever completed during it.
    pub fn on_frame(&mut self, dt: Duration) -> bool {
        let redraw = self.surface.on_frame(dt);
        while let Some(signal) = self.signal.take() {
            self.handle(signal);
        }
        redraw
    }

    fn handle(&mut self, signal: Signal) {
        tracing::debug!(?signal, state = ?self.state, "spotlight signal");
        match (signal, self.state) {
            (Signal::EngineStarted, SpotlightState::Starting) => {
                if let Some(listener) = &self.listener {
                    listener.on_started();
                }
                self.begin_target(0);
            }
            (Signal::TargetFinished, SpotlightState::Switching { from, to }) => {
                if let Some(listener) = self.targets[from].listener() {
                    listener.on_ended();
                }
                match to {
                    Some(index) => self.begin_target(index),
                    None => self.begin_finish(),
                }
            }
            (Signal::EngineFinished, SpotlightState::Finishing) => {
                self.state = SpotlightState::Finished;
                if let Some(listener) = &self.listener {
                    listener.on_ended();
                }
            }
            (signal, state) => tracing::warn!(?signal, ?state, "unexpected spotlight signal"),
        }
    }

    fn begin_target(&mut self, index: usize) {
        let target = Rc::clone(&self.targets[index]);
        self.state = SpotlightState::Showing(index);
        self.surface.start_target(Rc::clone(&target), None);
        if let Some(listener) = target.listener() {
            listener.on_started();
        }
    }

    fn switch(&mut self, from: usize, to: Option<usize>) {
        let signal = Rc::clone(&self.signal);
        self.state = SpotlightState::Switching { from, to };
        self.surface
            .finish_target(Some(AnimationListener::new(move |event| {
                if event == AnimationEvent::Ended {
                    signal.set(Some(Signal::TargetFinished));
                }
            })));
    }

    fn begin_finish(&mut self) {
        let signal = Rc::clone(&self.signal);
        let fade = self.config.finish;
        self.state = SpotlightState::Finishing;
        self.surface.finish_engine(fade.duration(), fade.ease, move || {
            signal.set(Some(Signal::EngineFinished));
        });
    }
}

impl<H: SurfaceHost + fmt::Debug> fmt::Debug for Spotlight<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spotlight")
            .field("state", &self.state)
            .field("targets", &self.targets.len())
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/mod.rs"]
mod tests;

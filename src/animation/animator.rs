use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use crate::animation::ease::Ease;

/// How a repeating animator replays each iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Every iteration runs `from -> to`.
    #[default]
    Restart,
    /// Odd iterations run backwards (`to -> from`), producing a ping-pong.
    Reverse,
}

/// Number of extra iterations after the first one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    Finite(u32),
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repeat {
    pub count: RepeatCount,
    pub mode: RepeatMode,
}

impl Repeat {
    /// Play once, no repetition.
    pub const NONE: Self = Self {
        count: RepeatCount::Finite(0),
        mode: RepeatMode::Restart,
    };

    pub fn infinite(mode: RepeatMode) -> Self {
        Self {
            count: RepeatCount::Infinite,
            mode,
        }
    }
}

/// Lifecycle notifications emitted by a [`ValueAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEvent {
    Started,
    Repeated,
    /// Natural end of a finite animator.
    Ended,
    /// The animator was cancelled while running. No `Ended` follows.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running,
    Ended,
    Cancelled,
}

/// Shared lifecycle callback.
///
/// Cloning shares the same underlying closure, so one listener can observe several animators.
#[derive(Clone)]
pub struct AnimationListener(Rc<RefCell<dyn FnMut(AnimationEvent)>>);

impl AnimationListener {
    pub fn new(f: impl FnMut(AnimationEvent) + 'static) -> Self {
        Self(Rc::new(RefCell::new(f)))
    }

    pub fn notify(&self, event: AnimationEvent) {
        (&mut *self.0.borrow_mut())(event);
    }
}

impl fmt::Debug for AnimationListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationListener").finish_non_exhaustive()
    }
}

/// Time-based scalar generator driven by an external frame clock.
///
/// The value is recomputed on every [`advance`](Self::advance) from the accumulated elapsed
/// time, so the result only depends on `(elapsed, duration, ease, repeat)`.
#[derive(Debug)]
pub struct ValueAnimator {
    from: f64,
    to: f64,
    duration: Duration,
    ease: Ease,
    repeat: Repeat,
    elapsed: Duration,
    iteration: u64,
    value: f64,
    state: AnimatorState,
    listener: Option<AnimationListener>,
}

impl ValueAnimator {
    pub fn new(from: f64, to: f64, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
            repeat: Repeat::NONE,
            elapsed: Duration::ZERO,
            iteration: 0,
            value: from,
            state: AnimatorState::Idle,
            listener: None,
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_listener(mut self, listener: Option<AnimationListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Current animated value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    /// Start (or restart) from the beginning and emit [`AnimationEvent::Started`].
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.iteration = 0;
        self.value = self.from;
        self.state = AnimatorState::Running;
        self.emit(AnimationEvent::Started);
    }

    /// Advance by one frame. Returns `true` when the value was updated, i.e. a redraw is due.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.state != AnimatorState::Running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);

        if self.duration.is_zero() {
            self.value = self.to;
            if self.repeat.count != RepeatCount::Infinite {
                self.end();
            }
            return true;
        }

        let d = self.duration.as_secs_f64();
        let raw_iter = (self.elapsed.as_secs_f64() / d).floor();

        if let RepeatCount::Finite(extra) = self.repeat.count {
            let total = u64::from(extra) + 1;
            if raw_iter >= total as f64 {
                self.value = self.sample(total - 1, 1.0);
                self.end();
                return true;
            }
        }

        let iter = raw_iter as u64;
        let fraction = (self.elapsed.as_secs_f64() - raw_iter * d) / d;
        self.value = self.sample(iter, fraction);
        if iter != self.iteration {
            self.iteration = iter;
            self.emit(AnimationEvent::Repeated);
        }
        true
    }

    /// Stop a running animator, keeping its current value. Emits [`AnimationEvent::Cancelled`].
    pub fn cancel(&mut self) {
        if self.state != AnimatorState::Running {
            return;
        }
        self.state = AnimatorState::Cancelled;
        self.emit(AnimationEvent::Cancelled);
    }

    /// Remove the listener so that no further events are delivered.
    pub fn detach_listener(&mut self) -> Option<AnimationListener> {
        self.listener.take()
    }

    fn sample(&self, iteration: u64, fraction: f64) -> f64 {
        let fraction = match self.repeat.mode {
            RepeatMode::Reverse if iteration % 2 == 1 => 1.0 - fraction,
            _ => fraction,
        };
        self.from + (self.to - self.from) * self.ease.apply(fraction)
    }

    fn end(&mut self) {
        self.state = AnimatorState::Ended;
        self.emit(AnimationEvent::Ended);
    }

    fn emit(&self, event: AnimationEvent) {
        if let Some(listener) = &self.listener {
            listener.notify(event);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;

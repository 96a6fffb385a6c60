use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};

/// Decides when a build loop should stop. Queried repeatedly with the
/// index of the pass about to run; `reset` rearms any internal baseline.
/// Both operations go through a shared reference so a single terminator
/// can gate every worker of a parallel build.
pub trait Terminator {
    fn is_building_terminated(&self, pass_index: usize) -> bool;

    fn reset(&self);
}

impl<T: Terminator + ?Sized> Terminator for &T {
    fn is_building_terminated(&self, pass_index: usize) -> bool {
        (**self).is_building_terminated(pass_index)
    }

    fn reset(&self) {
        (**self).reset()
    }
}

impl<T: Terminator + ?Sized> Terminator for Arc<T> {
    fn is_building_terminated(&self, pass_index: usize) -> bool {
        (**self).is_building_terminated(pass_index)
    }

    fn reset(&self) {
        (**self).reset()
    }
}

impl<T: Terminator + ?Sized> Terminator for Box<T> {
    fn is_building_terminated(&self, pass_index: usize) -> bool {
        (**self).is_building_terminated(pass_index)
    }

    fn reset(&self) {
        (**self).reset()
    }
}

/// Stops once the pass budget is spent.
#[derive(Clone, Copy, Debug)]
pub struct PassTerminator {
    max_passes: usize,
}

impl PassTerminator {
    pub fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }
}

impl Terminator for PassTerminator {
    fn is_building_terminated(&self, pass_index: usize) -> bool {
        pass_index >= self.max_passes
    }

    fn reset(&self) {}
}

/// Stops once the wall-clock budget is spent. The baseline instant is
/// captured at construction and re-captured on every reset; the clock is
/// injectable so tests can drive it.
pub struct TimeTerminator<C = fn() -> Instant> {
    clock: C,
    started: Mutex<Instant>,
    max_duration: Duration,
}

impl TimeTerminator {
    pub fn new(max_duration: Duration) -> Self {
        Self::with_clock(Instant::now, max_duration)
    }
}

impl<C> TimeTerminator<C>
where
    C: Fn() -> Instant,
{
    pub fn with_clock(clock: C, max_duration: Duration) -> Self {
        let started = Mutex::new(clock());

        Self {
            clock,
            started,
            max_duration,
        }
    }
}

impl<C> Terminator for TimeTerminator<C>
where
    C: Fn() -> Instant,
{
    fn is_building_terminated(&self, _pass_index: usize) -> bool {
        let started = *self.started.lock();

        (self.clock)().duration_since(started) >= self.max_duration
    }

    fn reset(&self) {
        *self.started.lock() = (self.clock)();
    }
}

/// Logical OR over a set of terminators; the first that fires wins.
pub struct GroupTerminator {
    terminators: Vec<Box<dyn Terminator + Send + Sync>>,
}

impl GroupTerminator {
    pub fn new(terminators: Vec<Box<dyn Terminator + Send + Sync>>) -> Self {
        Self { terminators }
    }
}

impl Terminator for GroupTerminator {
    fn is_building_terminated(&self, pass_index: usize) -> bool {
        self.terminators
            .iter()
            .any(|terminator| terminator.is_building_terminated(pass_index))
    }

    fn reset(&self) {
        for terminator in &self.terminators {
            terminator.reset();
        }
    }
}

/// Wraps a terminator for concurrent use: queries share a read lock while
/// a reset takes the write lock, serializing it against every in-flight
/// query.
pub struct ParallelTerminator<T> {
    inner: RwLock<T>,
}

impl<T> ParallelTerminator<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner: RwLock::new(inner),
        }
    }
}

impl<T> Terminator for ParallelTerminator<T>
where
    T: Terminator,
{
    fn is_building_terminated(&self, pass_index: usize) -> bool {
        self.inner.read().is_building_terminated(pass_index)
    }

    fn reset(&self) {
        self.inner.write().reset()
    }
}

//! Dependency tracking for computed cells.
//!
//! Every `Computed` evaluation pushes a frame on a thread-local stack. Reads of
//! `State` and `Computed` cells made while that frame is on top are recorded in
//! it, so the computed cell can later tell whether any of its inputs moved.

use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

thread_local! {
    static STACK: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Allocate an id unique across all reactive cells.
pub(crate) fn next_id() -> usize {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A derived cell that can be brought up to date on demand.
pub(crate) trait Source: Send + Sync {
    /// Version of the last value produced, without re-running anything.
    fn version(&self) -> u64;

    /// Whether a refresh may re-run the computation.
    fn may_be_stale(&self) -> bool;

    /// Re-run the computation if an input moved and return the resulting
    /// version. The version only advances when the output changed.
    fn refresh(&self) -> u64;
}

#[derive(Clone)]
enum Origin {
    State(Arc<AtomicU64>),
    Computed(Arc<dyn Source>),
}

/// A single cell read during an evaluation, with the version it had then.
#[derive(Clone)]
pub(crate) struct Dependency {
    id: usize,
    origin: Origin,
    seen: u64,
}

impl Dependency {
    pub(crate) fn state(id: usize, version: &Arc<AtomicU64>) -> Self {
        Self {
            id,
            origin: Origin::State(Arc::clone(version)),
            seen: version.load(Ordering::SeqCst),
        }
    }

    pub(crate) fn computed(id: usize, source: Arc<dyn Source>, seen: u64) -> Self {
        Self {
            id,
            origin: Origin::Computed(source),
            seen,
        }
    }

    fn has_changed(&self) -> bool {
        match &self.origin {
            Origin::State(version) => version.load(Ordering::SeqCst) != self.seen,
            Origin::Computed(source) => source.refresh() != self.seen,
        }
    }

    fn may_have_changed(&self) -> bool {
        match &self.origin {
            Origin::State(version) => version.load(Ordering::SeqCst) != self.seen,
            Origin::Computed(source) => source.version() != self.seen || source.may_be_stale(),
        }
    }
}

impl std::fmt::Debug for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.origin {
            Origin::State(_) => "state",
            Origin::Computed(_) => "computed",
        };
        f.debug_struct("Dependency")
            .field("id", &self.id)
            .field("kind", &kind)
            .field("seen", &self.seen)
            .finish()
    }
}

/// Everything one evaluation read.
#[derive(Debug, Clone, Default)]
pub(crate) struct Frame {
    deps: Vec<Dependency>,
    /// Set when an opaque accessor was invoked; such reads cannot be tracked.
    volatile: bool,
}

impl Frame {
    /// Whether the evaluation must run again. Nested computed inputs are
    /// refreshed to find out.
    pub(crate) fn is_stale(&self) -> bool {
        self.volatile || self.deps.iter().any(Dependency::has_changed)
    }

    /// Conservative check that never re-runs anything.
    pub(crate) fn may_be_stale(&self) -> bool {
        self.volatile || self.deps.iter().any(Dependency::may_have_changed)
    }

    pub(crate) fn len(&self) -> usize {
        self.deps.len()
    }

    fn push(&mut self, dep: Dependency) {
        if !self.deps.iter().any(|d| d.id == dep.id) {
            self.deps.push(dep);
        }
    }
}

/// Pops the frame even if the evaluation unwinds.
struct FrameGuard;

impl Drop for FrameGuard {
    fn drop(&mut self) {
        STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Run `f` inside a fresh tracking frame and return what it read.
pub(crate) fn track<T>(f: impl FnOnce() -> T) -> (T, Frame) {
    STACK.with(|stack| stack.borrow_mut().push(Frame::default()));
    let guard = FrameGuard;
    let value = f();
    let frame = STACK
        .with(|stack| stack.borrow_mut().last_mut().map(std::mem::take))
        .unwrap_or_default();
    drop(guard);
    (value, frame)
}

/// Record a read in the innermost frame, if any.
pub(crate) fn record(dep: impl FnOnce() -> Dependency) {
    STACK.with(|stack| {
        if let Some(frame) = stack.borrow_mut().last_mut() {
            frame.push(dep());
        }
    });
}

/// Flag the innermost frame as untrackable.
pub(crate) fn mark_volatile() {
    STACK.with(|stack| {
        if let Some(frame) = stack.borrow_mut().last_mut() {
            frame.volatile = true;
        }
    });
}

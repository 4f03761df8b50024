//! Memoized derived cells.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::tracking::{self, Dependency, Frame, Source};

type ComputeFn<T> = Box<dyn Fn() -> T + Send + Sync>;

struct Cached<T> {
    value: T,
    frame: Frame,
}

struct ComputedInner<T> {
    id: usize,
    compute: ComputeFn<T>,
    same: fn(&T, &T) -> bool,
    cache: Mutex<Option<Cached<T>>>,
    /// Advances only when an evaluation produced a different value.
    version: AtomicU64,
    evaluations: AtomicU64,
}

impl<T> ComputedInner<T> {
    fn cache_may_be_stale(&self) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.as_ref().is_none_or(|c| c.frame.may_be_stale()))
            .unwrap_or(true)
    }
}

impl<T: Clone> ComputedInner<T> {
    /// Bring the cache up to date and return the value with its version.
    fn current(&self) -> (T, u64) {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(cached) = cache.as_ref()
            && !cached.frame.is_stale()
        {
            return (cached.value.clone(), self.version.load(Ordering::SeqCst));
        }

        let (value, frame) = tracking::track(|| (self.compute)());
        let n = self.evaluations.fetch_add(1, Ordering::SeqCst) + 1;

        let value = match cache.take() {
            Some(previous) if (self.same)(&previous.value, &value) => previous.value,
            _ => {
                self.version.fetch_add(1, Ordering::SeqCst);
                value
            }
        };
        let version = self.version.load(Ordering::SeqCst);
        log::trace!(
            "Computed evaluated (#{}, {} dependencies, version {})",
            n,
            frame.len(),
            version
        );

        *cache = Some(Cached {
            value: value.clone(),
            frame,
        });
        (value, version)
    }
}

impl<T: Clone + Send + 'static> Source for ComputedInner<T> {
    fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    fn may_be_stale(&self) -> bool {
        self.cache_may_be_stale()
    }

    fn refresh(&self) -> u64 {
        self.current().1
    }
}

/// A read-only cell derived from other cells.
///
/// The closure runs lazily on the first [`get`](Computed::get) and again only
/// when one of the cells it read has changed value since. When a re-run
/// produces a value equal to the previous one, the previous value is kept and
/// computed cells built on top of this one do not re-run. Reading an opaque
/// accessor (see [`MaybeSignal::accessor`](crate::source::MaybeSignal::accessor))
/// makes the cell re-run on every read, since such a read cannot report
/// changes.
///
/// Reading a `Computed` from inside its own closure deadlocks.
///
/// # Example
///
/// ```
/// use accessform::computed::Computed;
/// use accessform::state::State;
///
/// let count = State::new(2);
/// let doubled = {
///     let count = count.clone();
///     Computed::new(move || count.get() * 2)
/// };
/// assert_eq!(doubled.get(), 4);
/// count.set(5);
/// assert_eq!(doubled.get(), 10);
/// ```
pub struct Computed<T> {
    inner: Arc<ComputedInner<T>>,
}

impl<T: Clone + Send + 'static> Computed<T> {
    /// Create a computed cell from a closure
    pub fn new<F>(compute: F) -> Self
    where
        T: PartialEq,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ComputedInner {
                id: tracking::next_id(),
                compute: Box::new(compute),
                same: <T as PartialEq>::eq,
                cache: Mutex::new(None),
                version: AtomicU64::new(0),
                evaluations: AtomicU64::new(0),
            }),
        }
    }

    /// Get the current value, re-running the closure if an input changed
    pub fn get(&self) -> T {
        let (value, version) = self.inner.current();
        tracking::record(|| {
            let source: Arc<dyn Source> = self.inner.clone();
            Dependency::computed(self.inner.id, source, version)
        });
        value
    }
}

impl<T> Computed<T> {
    /// Check whether the next read may re-run the closure.
    ///
    /// Never evaluates anything, so it can report `true` for a nested cell
    /// whose inputs moved but whose output will turn out unchanged.
    pub fn is_stale(&self) -> bool {
        self.inner.cache_may_be_stale()
    }

    /// How many times the closure has run
    pub fn evaluations(&self) -> u64 {
        self.inner.evaluations.load(Ordering::SeqCst)
    }

    /// Number of distinct cells read by the last evaluation
    pub fn dependency_count(&self) -> usize {
        self.inner
            .cache
            .lock()
            .map(|cache| cache.as_ref().map_or(0, |c| c.frame.len()))
            .unwrap_or(0)
    }
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computed")
            .field("evaluations", &self.evaluations())
            .field("stale", &self.is_stale())
            .finish()
    }
}

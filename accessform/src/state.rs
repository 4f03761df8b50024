use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::tracking::{self, Dependency};

/// Unique identifier for a state cell, shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

impl StateId {
    fn new() -> Self {
        Self(tracking::next_id())
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__state_{}", self.0)
    }
}

/// Reactive state cell with interior mutability.
///
/// `State<T>` is the writable reactive cell of the toolkit. It uses
/// `Arc<RwLock<T>>` internally, making it cheap to clone; every clone shares
/// the same value. Each write that changes the value bumps a version counter,
/// and reads made while a
/// [`Computed`](crate::computed::Computed) is evaluating register the cell as
/// one of its dependencies.
///
/// # Example
///
/// ```
/// use accessform::state::State;
///
/// let touched = State::new(false);
/// let handle = touched.clone();
/// handle.set(true);
/// assert!(touched.get());
/// ```
#[derive(Debug)]
pub struct State<T> {
    id: StateId,
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
    version: Arc<AtomicU64>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            id: StateId::new(),
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Identifier shared by all clones of this cell
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.track();
        self.peek()
    }

    /// Get a clone of the current value without registering a dependency
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Borrow the current value for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.track();
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Set a new value.
    ///
    /// Writing a value equal to the current one is a no-op, so dependents are
    /// only invalidated by real changes. Use [`replace`](State::replace) for
    /// types without `PartialEq`.
    pub fn set(&self, value: T)
    where
        T: PartialEq,
    {
        self.replace_if_changed(value);
    }

    /// Overwrite the value unconditionally
    pub fn replace(&self, value: T) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = value;
            self.touch();
        }
    }

    /// Update the value using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard);
            self.touch();
        }
    }

    /// Inspect and modify the value under a single write lock.
    ///
    /// `f` returns whether it changed anything; only then is the version
    /// bumped. No other clone can write between the check and the write.
    pub fn try_update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let changed = f(&mut guard);
        if changed {
            self.touch();
        }
        changed
    }

    /// Set a new value only if it differs from the current one.
    ///
    /// Returns `true` when the value was written. Dependents are not
    /// invalidated by a write that would not change anything.
    pub fn replace_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        if let Ok(mut guard) = self.inner.write()
            && *guard != value
        {
            *guard = value;
            self.touch();
            return true;
        }
        false
    }

    /// Number of changing writes so far
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn touch(&self) {
        self.version.fetch_add(1, Ordering::SeqCst);
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn track(&self) {
        tracking::record(|| Dependency::state(self.id.0, &self.version));
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            version: Arc::clone(&self.version),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

//! Parameters that may be plain values, accessors or reactive cells.

use std::sync::Arc;

use crate::computed::Computed;
use crate::state::State;
use crate::tracking;

/// A value supplied directly, through a zero-argument accessor, or through a
/// reactive cell.
///
/// APIs that accept `impl Into<MaybeSignal<T>>` take any of the three, so a
/// caller can pass a fixed strategy, a closure, or a `State` that changes at
/// runtime without the callee caring which.
pub enum MaybeSignal<T> {
    /// A literal value, returned unchanged.
    Value(T),
    /// A zero-argument function invoked on every read.
    Accessor(Arc<dyn Fn() -> T + Send + Sync>),
    /// A writable reactive cell.
    State(State<T>),
    /// A derived reactive cell.
    Computed(Computed<T>),
}

impl<T> MaybeSignal<T> {
    /// Wrap a literal value
    pub fn value(value: T) -> Self {
        Self::Value(value)
    }

    /// Wrap a zero-argument accessor
    pub fn accessor<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::Accessor(Arc::new(f))
    }

    /// Whether reads can change over time
    pub fn is_reactive(&self) -> bool {
        !matches!(self, Self::Value(_))
    }
}

impl<T: Clone + Send + 'static> MaybeSignal<T> {
    /// Read the current value.
    ///
    /// Cells are read (and tracked, inside a computation), accessors are
    /// invoked, literals are cloned. Nothing is cached.
    pub fn get(&self) -> T {
        match self {
            Self::Value(value) => value.clone(),
            Self::Accessor(f) => {
                tracking::mark_volatile();
                f()
            }
            Self::State(state) => state.get(),
            Self::Computed(computed) => computed.get(),
        }
    }
}

/// Resolve a [`MaybeSignal`] to its current value.
pub fn unwrap_value<T: Clone + Send + 'static>(source: &MaybeSignal<T>) -> T {
    source.get()
}

impl<T> From<T> for MaybeSignal<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<State<T>> for MaybeSignal<T> {
    fn from(state: State<T>) -> Self {
        Self::State(state)
    }
}

impl<T> From<&State<T>> for MaybeSignal<T> {
    fn from(state: &State<T>) -> Self {
        Self::State(state.clone())
    }
}

impl<T> From<Computed<T>> for MaybeSignal<T> {
    fn from(computed: Computed<T>) -> Self {
        Self::Computed(computed)
    }
}

impl<T: Clone> Clone for MaybeSignal<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Accessor(f) => Self::Accessor(Arc::clone(f)),
            Self::State(state) => Self::State(state.clone()),
            Self::Computed(computed) => Self::Computed(computed.clone()),
        }
    }
}

impl<T: Default> Default for MaybeSignal<T> {
    fn default() -> Self {
        Self::Value(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MaybeSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Accessor(_) => f.write_str("Accessor(..)"),
            Self::State(state) => f.debug_tuple("State").field(&state.id()).finish(),
            Self::Computed(computed) => f.debug_tuple("Computed").field(computed).finish(),
        }
    }
}

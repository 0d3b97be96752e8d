//! ## Engine
//! Façade over the two counting phases, owning the one-way mode transition.
//!
//! The engine starts in the exact phase and tracks every distinct key precisely. The insert
//! that pushes the distinct count past the capacity `C` discards the tracker and switches to
//! the register sketch for the rest of the engine's life; only [`NdvEstimator::reset`] returns
//! to the exact phase. Discarded keys are not replayed into the sketch (see the crate docs),
//! so only the overflowing key and later inserts reach it.
//!
//! Modeling the state as `Exact(tracker) | Approximate(sketch)` rather than two co-resident
//! structures makes the discard visible in the type and rules out reads of a cleared map.

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::size_of;

use enum_dispatch::enum_dispatch;

use crate::exact::ExactTracker;
use crate::hash::{combine, pack_tuple, Hash64, WyHash64};
use crate::sketch::RegisterArray;
use crate::source::TupleSource;

/// Counting phases of [`NdvEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every distinct key is tracked precisely; `estimate()` is exact.
    Exact,
    /// Keys are folded into the register sketch; `estimate()` is approximate.
    Approximate,
}

/// Operations shared by both counting phases.
#[enum_dispatch(State<P, C>)]
pub(crate) trait StateTrait {
    fn estimate(&self) -> f64;
    fn size_of(&self) -> usize;
}

/// Engine state: the exact map and the register sketch never coexist.
#[enum_dispatch]
enum State<const P: usize, const C: usize> {
    Exact(ExactTracker<C>),
    Approximate(RegisterArray<P>),
}

/// Bounded-memory distinct-count estimator over `(i32, i32)` tuples, defined by:
/// - `H`: seeded 64-bit hash collaborator feeding the register sketch.
/// - `P`: precision parameter in [4..18] range; the sketch holds `2^P` byte registers.
/// - `C`: exact-phase capacity, the largest distinct-key count tracked precisely.
pub struct NdvEstimator<H: Hash64 = WyHash64, const P: usize = 14, const C: usize = 10_000> {
    state: State<P, C>,
    hasher: PhantomData<H>,
}

impl<H: Hash64, const P: usize, const C: usize> NdvEstimator<H, P, C> {
    /// Ensure that `P` and `C` are in correct range at compile time
    const VALID_PARAMS: () = assert!(P >= 4 && P <= 18 && C >= 1);

    /// Create a new estimator in the exact phase.
    pub fn new() -> Self {
        // compile time check of params
        _ = Self::VALID_PARAMS;

        Self {
            state: State::Exact(ExactTracker::new()),
            hasher: PhantomData,
        }
    }

    /// Add one observation. Never fails; duplicate tuples are counted once.
    #[inline]
    pub fn insert_tuple(&mut self, tuple: (i32, i32)) {
        let key = pack_tuple(tuple);
        match &mut self.state {
            State::Exact(tracker) => {
                if tracker.add(key) {
                    // Tracked keys are gone for good: only the key that overflowed
                    // the budget seeds the fresh sketch.
                    let mut sketch = RegisterArray::new();
                    sketch.observe(combine::<H>(key));
                    self.state = State::Approximate(sketch);
                }
            }
            State::Approximate(sketch) => sketch.observe(combine::<H>(key)),
        }
    }

    /// Drain `source` into the estimator.
    pub fn insert_all<S: TupleSource>(&mut self, source: &mut S) {
        while let Some(tuple) = source.next_tuple() {
            self.insert_tuple(tuple);
        }
    }

    /// Current distinct-count approximation.
    ///
    /// Exact while in [`Mode::Exact`] (0 before any insert); in [`Mode::Approximate`] the
    /// bias-corrected sketch estimate, which is at least 1. Side-effect free.
    #[inline]
    pub fn estimate(&self) -> f64 {
        self.state.estimate()
    }

    /// Current counting phase.
    #[inline]
    pub fn mode(&self) -> Mode {
        match self.state {
            State::Exact(_) => Mode::Exact,
            State::Approximate(_) => Mode::Approximate,
        }
    }

    /// Restore the initial exact phase with zero tracked keys, dropping the
    /// register sketch if one exists.
    pub fn reset(&mut self) {
        match &mut self.state {
            State::Exact(tracker) => tracker.clear(),
            State::Approximate(_) => self.state = State::Exact(ExactTracker::new()),
        }
    }

    /// Alias of [`Self::reset`] under the query-harness hook name.
    pub fn prepare(&mut self) {
        self.reset();
    }

    /// Return memory size of the estimator
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.state.size_of()
    }
}

impl<H: Hash64, const P: usize, const C: usize> Default for NdvEstimator<H, P, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hash64, const P: usize, const C: usize> Debug for NdvEstimator<H, P, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ mode: {:?}, estimate: {}, size: {} }}",
            self.mode(),
            self.estimate(),
            self.size_of()
        )
    }
}

//! `ndv-estimator` estimates the number of distinct `(i32, i32)` tuples observed in a stream,
//! in bounded memory regardless of stream length.
//!
//! It is built for query optimizers that need fast cardinality (NDV, number of distinct
//! values) approximations rather than exact counts: a single pass over the stream, constant
//! per-insert work, and a fixed memory ceiling.
//!
//! # Counting phases
//!
//! The estimator runs through two phases with a one-way transition:
//! - [`Mode::Exact`]: every distinct key is tracked in a bounded map, so `estimate()` is the
//!   exact distinct count while no more than `C` distinct keys (default 10 000) have been seen.
//! - [`Mode::Approximate`]: once the exact budget overflows, the map is discarded and all
//!   subsequent inserts feed a HyperLogLog-style register array of `2^P` byte registers
//!   (default `P = 14`, 16 KiB), whose bias-corrected harmonic estimate serves `estimate()`.
//!
//! Only [`NdvEstimator::reset`] returns the engine to the exact phase.
//!
//! # Accuracy
//!
//! In the exact phase the estimate is exact. In the approximate phase the expected relative
//! error is about `1.04 / sqrt(2^P)`, i.e. roughly 0.81% at the default precision; the test
//! suite holds a 5% band for a million-tuple uniform stream.
//!
//! Note that keys tracked during the exact phase are **not** replayed into the register array
//! when the budget overflows: the sketch starts from the single key that triggered the switch,
//! so the estimate understates the true cardinality until enough of the stream has been seen
//! again. This is a known limitation of the transition, kept deliberately and pinned by tests
//! rather than corrected.
//!
//! # Example
//!
//! ```
//! use ndv_estimator::NdvEstimator;
//!
//! let mut estimator: NdvEstimator = NdvEstimator::new();
//! assert_eq!(estimator.estimate(), 0.0);
//!
//! estimator.insert_tuple((42, 7));
//! estimator.insert_tuple((42, 7));
//! estimator.insert_tuple((7, 42));
//! assert_eq!(estimator.estimate(), 2.0);
//!
//! estimator.reset();
//! assert_eq!(estimator.estimate(), 0.0);
//! ```
mod engine;
mod estimate;
mod exact;
mod hash;
mod sketch;
mod source;

pub use engine::{Mode, NdvEstimator};
pub use hash::{Hash64, WyHash64};
pub use source::TupleSource;

//! Pull interface through which a query harness feeds tuples to the engine.
//!
//! The harness side (row storage, distribution synthesis, exact-count oracles) stays outside
//! this crate; the engine only consumes the iteration surface.

/// A supplier of `(i32, i32)` tuples, exhausted once it yields `None`.
pub trait TupleSource {
    /// Next tuple, or `None` once the source is exhausted.
    fn next_tuple(&mut self) -> Option<(i32, i32)>;
}

/// Every tuple iterator is a source, so harnesses can hand over plain iterators.
impl<I: Iterator<Item = (i32, i32)>> TupleSource for I {
    #[inline]
    fn next_tuple(&mut self) -> Option<(i32, i32)> {
        self.next()
    }
}

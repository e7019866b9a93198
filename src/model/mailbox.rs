//! # Square-indexed storage
//!
//! One slot per square in diagram reading order. The board keeps its
//! occupants in a `Mailbox<Option<Piece>>`; transforms build a fresh one
//! and swap it in.

use std::ops::Index;

use crate::model::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct Mailbox<T>(pub [T; 64]);

impl<T> Mailbox<T> {
    /// Write to a square
    #[inline]
    pub fn set(&mut self, sq: Square, it: T) {
        self.0[sq.ix()] = it
    }

    /// Visit every square in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &T)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(ix, it)| Some((Square::new(ix as i32)?, it)))
    }

    /// Mutable counterpart of [`Mailbox::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Square, &mut T)> {
        self.0
            .iter_mut()
            .enumerate()
            .filter_map(|(ix, it)| Some((Square::new(ix as i32)?, it)))
    }
}

impl<T: Default> Mailbox<T> {
    /// Move the value out of a square, leaving the default behind.
    #[inline]
    pub fn take(&mut self, sq: Square) -> T {
        std::mem::take(&mut self.0[sq.ix()])
    }
}

impl<T: Default> Default for Mailbox<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| T::default()))
    }
}

impl<T> Index<Square> for Mailbox<T> {
    type Output = T;

    #[inline]
    fn index(&self, sq: Square) -> &T {
        &self.0[sq.ix()]
    }
}

#[test]
fn mailbox_take_and_iter() {
    let mut mb = Mailbox::<bool>::default();
    mb.set(Square::a8, true);
    mb.set(Square::h1, true);
    assert_eq!(
        mb.iter().filter(|(_, b)| **b).map(|(sq, _)| sq).collect::<Vec<_>>(),
        vec![Square::a8, Square::h1]
    );
    assert!(mb.take(Square::a8));
    assert!(!mb[Square::a8]);
    assert_eq!(mb.iter().filter(|(_, b)| **b).count(), 1);
}

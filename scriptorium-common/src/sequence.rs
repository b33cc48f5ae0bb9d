//! Monotonic identifier sequences.
//!
//! Every table owns one sequence; identifiers handed out by a sequence are
//! unique and strictly increasing for the lifetime of the process.

use crate::model::Id;
use derive_where::derive_where;
use std::marker::PhantomData;

pub const FIRST_ID: u64 = 1;

#[derive_where(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct IdSequence<Marker> {
    next: u64,
    phantom_data: PhantomData<Marker>,
}

impl<Marker> IdSequence<Marker> {
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: first,
            phantom_data: PhantomData,
        }
    }

    /// Creates a sequence whose first identifier is one past the largest of `ids`.
    #[must_use]
    pub fn following<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Id<Marker>>,
    {
        let next = ids
            .into_iter()
            .map(Id::get)
            .max()
            .map_or(FIRST_ID, |max| max + 1);

        Self::starting_at(next)
    }

    pub fn generate(&mut self) -> Id<Marker> {
        let id = Id::new(self.next);
        self.next = self.next.checked_add(1).expect("Id sequence exhausted.");
        id
    }
}

impl<Marker> Default for IdSequence<Marker> {
    fn default() -> Self {
        Self::starting_at(FIRST_ID)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::Id,
        sequence::{FIRST_ID, IdSequence},
    };

    struct TestMarker;

    #[test]
    fn generates_strictly_increasing_ids() {
        let mut sequence = IdSequence::<TestMarker>::default();

        let first = sequence.generate();
        let second = sequence.generate();
        let third = sequence.generate();

        assert_eq!(first, Id::new(FIRST_ID));
        assert!(first < second);
        assert!(second < third);
        assert_eq!(sequence.generate(), Id::new(FIRST_ID + 3));
    }

    #[test]
    fn following_existing_ids() {
        let mut sequence = IdSequence::<TestMarker>::following([2, 7, 4].map(Id::new));
        assert_eq!(sequence.generate(), Id::new(8));

        let mut empty = IdSequence::<TestMarker>::following([]);
        assert_eq!(empty.generate(), Id::new(FIRST_ID));
    }

    #[test]
    fn copies_advance_independently() {
        let mut sequence = IdSequence::<TestMarker>::starting_at(10);
        let mut copy = sequence;

        assert_eq!(sequence.generate(), Id::new(10));
        assert_eq!(sequence.generate(), Id::new(11));
        assert_eq!(copy.generate(), Id::new(10));
    }
}

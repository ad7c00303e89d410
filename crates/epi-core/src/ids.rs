//! Strongly typed identifier for individuals in the facility.
//!
//! Ids are `Copy + Ord + Hash` so they can be used as map keys and kept in
//! ordered sets without ceremony.  Ordering matters: the contact graph hands
//! out the next admission id as `max_live_id + 1`, so ids grow monotonically
//! over a run.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize`, e.g. for dense per-individual scratch arrays.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id immediately after `self`, or `None` once the inner
            /// integer is exhausted.
            #[inline]
            pub fn checked_next(self) -> Option<$name> {
                self.0.checked_add(1).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of one individual (a node of the contact graph).
    /// Never reused while the individual is live.
    pub struct IndividualId(u32);
}

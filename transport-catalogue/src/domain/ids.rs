//! Stable integer handles for catalogue records.
//!
//! Handles are issued in insertion order by the catalogue and index directly
//! into its append-only arenas. A handle is only meaningful for the catalogue
//! that issued it.

use std::fmt;

macro_rules! impl_handle {
    ($name:ident, $prefix:literal) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position of the record in its arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

impl_handle!(StopId, "stop");
impl_handle!(BusId, "bus");

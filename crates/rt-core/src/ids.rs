//! Strongly typed, zero-cost identifier wrappers.
//!
//! City names are interned to dense `CityId`s when the network is built, so
//! every hot loop (search, walk sampling) indexes `Vec`s instead of hashing
//! strings.  The inner integer is `pub`; prefer the `.index()` helper.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a city in the network, assigned in insertion order.
    pub struct CityId(u32);
}

typed_id! {
    /// Index of a directed rail link.
    pub struct EdgeId(u32);
}

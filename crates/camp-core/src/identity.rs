//! # Identifier Newtypes
//!
//! Each table has its own identifier type. Identifiers are positive
//! integers assigned sequentially by the repository, and serialize as bare
//! JSON integers.

use serde::{Deserialize, Serialize};

macro_rules! integer_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw integer identifier.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Access the underlying integer.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of an [`Activity`](crate::Activity).
    ActivityId
);

integer_id!(
    /// Identifier of a [`Camper`](crate::Camper).
    CamperId
);

integer_id!(
    /// Identifier of a [`Signup`](crate::Signup).
    SignupId
);

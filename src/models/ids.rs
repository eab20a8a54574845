//! Strongly-typed ID wrappers for clients and bills
//!
//! Both ids are plain `i32` on disk, so the newtypes keep a client id from
//! being passed where a bill id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw id
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Get the raw id as stored on disk
            pub const fn get(self) -> i32 {
                self.0
            }

            /// The id following the largest one in `ids`, or 1 when there are none.
            ///
            /// Returns `None` once the largest id is `i32::MAX`.
            pub fn next_after<I>(ids: I) -> Option<Self>
            where
                I: IntoIterator<Item = Self>,
            {
                let max = ids.into_iter().map(|id| id.0).max().unwrap_or(0);
                max.checked_add(1).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(ClientId, "#");
define_id!(BillId, "#");

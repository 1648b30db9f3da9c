//! Store-assigned identifiers.
//!
//! Ids are opaque strings. Each kind gets its own newtype so a `BrandId`
//! cannot stand in for a `ProductId`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an id handed out by the store.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh id, as an in-memory store would.
            pub fn generate() -> Self {
                Self(next_id($prefix))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

define_id!(
    /// Product row id.
    ProductId,
    "prd"
);
define_id!(
    /// Brand row id.
    BrandId,
    "brd"
);

/// `<prefix>_<micros since epoch, hex><sequence, hex>`.
fn next_id(prefix: &str) -> String {
    static SEQUENCE: AtomicU32 = AtomicU32::new(0);

    let micros = chrono::Utc::now().timestamp_micros().max(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xffff;
    format!("{}_{:x}{:04x}", prefix, micros, seq)
}

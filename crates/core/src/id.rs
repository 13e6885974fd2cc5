// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier types.
//!
//! Media and output ids are content-derived: the hex digest of the absolute
//! path, so the same file keeps its id across restarts. Run and activity ids
//! are composed from the owning media id, a kind tag and a Unix second.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Number of hex characters kept from the path digest.
pub const PATH_HASH_LEN: usize = 40;

/// Stable hex digest of a path, truncated to [`PATH_HASH_LEN`] characters.
pub fn path_hash(path: &Path) -> String {
    let digest = format!("{:x}", Sha256::digest(path.to_string_lossy().as_bytes()));
    digest[..PATH_HASH_LEN].to_string()
}

/// Returns a string slice truncated to at most `n` characters.
pub fn short(s: &str, n: usize) -> &str {
    if s.len() <= n {
        s
    } else {
        &s[..n]
    }
}

/// Returns true when `candidate` is a non-empty prefix of `full`.
pub fn prefix_matches(full: &str, candidate: &str) -> bool {
    !candidate.is_empty() && full.starts_with(candidate)
}

/// Define a newtype ID wrapper around `SmolStr`.
///
/// Generates `new()`, `as_str()`, `short()`, `Display`, `From<String>`,
/// `From<&str>`, `PartialEq<str>`, `Borrow<str>`, and `Deref` implementations.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct MediaId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            /// Wrap an existing id string
            pub fn new(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the id truncated to at most `n` characters.
            pub fn short(&self, n: usize) -> &str {
                $crate::id::short(&self.0, n)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Identifier of a tracked media file, derived from its absolute path.
    pub struct MediaId;
}

impl MediaId {
    /// Derive the id for a media file path.
    pub fn for_path(path: &Path) -> Self {
        Self::new(path_hash(path))
    }
}

define_id! {
    /// Identifier of a generated output file, derived from its path.
    pub struct OutputId;
}

impl OutputId {
    pub fn for_path(path: &Path) -> Self {
        Self::new(path_hash(path))
    }
}

define_id! {
    /// Identifier of one processing attempt: `<media>-<type>-<started_at>`.
    pub struct RunId;
}

define_id! {
    /// Identifier of an activity entry: `<media>-<tag>-<created_at>`.
    pub struct ActivityId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

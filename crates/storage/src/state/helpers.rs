// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lookup helpers shared by the state accessors.

use autosub_core::id::prefix_matches;
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Get a value by exact ID or unique prefix.
///
/// Ids shown in the dashboard are often truncated; a prefix resolves only
/// when exactly one key starts with it.
pub(crate) fn find_by_prefix<'a, K, V>(map: &'a BTreeMap<K, V>, id: &str) -> Option<&'a V>
where
    K: Borrow<str> + Ord,
{
    if let Some(val) = map.get(id) {
        return Some(val);
    }
    let mut matches = map.iter().filter(|(k, _)| prefix_matches(Borrow::<str>::borrow(*k), id));
    match (matches.next(), matches.next()) {
        (Some((_, v)), None) => Some(v),
        _ => None,
    }
}

/// Resolve an exact or unique-prefix id to the owned key.
pub(crate) fn resolve_key<K, V>(map: &BTreeMap<K, V>, id: &str) -> Option<K>
where
    K: Borrow<str> + Ord + Clone,
{
    if let Some((k, _)) = map.get_key_value(id) {
        return Some(k.clone());
    }
    let mut matches = map.keys().filter(|k| prefix_matches(Borrow::<str>::borrow(*k), id));
    match (matches.next(), matches.next()) {
        (Some(k), None) => Some(k.clone()),
        _ => None,
    }
}

//! Fixed code tables and the lookups that turn raw codes into states.
//!
//! Two kinds of absence must stay apart: a code that was never reported and a
//! code the table does not know. [`derive`] reports both as `None`, but only
//! after checking for the first one, so callers never map a missing reading.

pub mod climate;
pub mod humidifier;
pub mod select;

/// Table from device code to semantic state.
pub type CodeMap<T> = [(i64, T)];

pub fn lookup<T: Copy>(code: i64, map: &CodeMap<T>) -> Option<T> {
    map.iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, state)| *state)
}

/// Maps a raw reading, `None` when there is no reading or no entry for it.
pub fn derive<T: Copy>(raw: Option<i64>, map: &CodeMap<T>) -> Option<T> {
    let code = raw?;
    lookup(code, map)
}

/// First code mapping to `state`.
pub fn reverse_lookup<T: PartialEq>(state: &T, map: &CodeMap<T>) -> Option<i64> {
    map.iter()
        .find(|(_, candidate)| candidate == state)
        .map(|(code, _)| *code)
}

/// Distinct states of `map` in table order.
pub fn states<T: Copy + PartialEq>(map: &CodeMap<T>) -> Vec<T> {
    let mut states = Vec::with_capacity(map.len());
    for (_, state) in map {
        if !states.contains(state) {
            states.push(*state);
        }
    }
    states
}

//! Multi-valued header collection shared by requests and responses.

use std::collections::{BTreeMap, HashMap};

/// One header line. The name keeps the spelling it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Header lines in arrival order.
///
/// Envelopes deliver single-valued maps, handlers may emit the same name
/// several times, and the two outbound schemas flatten repeats differently.
/// The map therefore keeps every line and leaves merging to
/// [`grouped`](HeaderMap::grouped). Names compare ASCII case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    lines: Vec<Header>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an envelope's single-valued header map.
    ///
    /// Keys are applied in sorted order with [`set`](HeaderMap::set), so keys
    /// that differ only in case collapse to one line deterministically: the
    /// value of the last key in byte order wins.
    pub fn from_single_valued(source: &HashMap<String, String>) -> Self {
        let sorted: BTreeMap<&str, &str> = source
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let mut map = Self::new();
        for (name, value) in sorted {
            map.set(name, value);
        }
        map
    }

    /// Add a line, keeping earlier lines with the same name (cookies).
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.lines.push(Header::new(name, value));
    }

    /// Replace every line for `name` with a single one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.lines.push(Header::new(name, value));
    }

    /// Drop every line for `name`; returns how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|h| !h.name.eq_ignore_ascii_case(name));
        before - self.lines.len()
    }

    fn matching<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.lines
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// First value for `name`. Host, scheme and content-type lookups use this.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.matching(name).next()
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.matching(name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Values grouped by name, in first-seen order.
    ///
    /// Each group is named after its first line's spelling. Both outbound
    /// serializers flatten from this.
    pub fn grouped(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for h in &self.lines {
            match groups
                .iter_mut()
                .find(|(name, _)| name.eq_ignore_ascii_case(&h.name))
            {
                Some((_, values)) => values.push(h.value.as_str()),
                None => groups.push((h.name.as_str(), vec![h.value.as_str()])),
            }
        }
        groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.lines.iter()
    }

    /// Number of lines, counting repeated names separately.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderMap
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.append(name, value);
        }
        map
    }
}

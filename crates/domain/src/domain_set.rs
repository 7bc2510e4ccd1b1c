use std::collections::HashSet;

/// Immutable set of domain suffixes that route through the proxy subnet.
///
/// Entries are stored lower-cased without a trailing dot. Matching is
/// string-suffix matching: `ample.com` matches `www.example.com`.
#[derive(Debug, Clone, Default)]
pub struct DomainSet {
    suffixes: HashSet<Box<str>>,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_suffixes<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = suffixes
            .into_iter()
            .filter_map(|s| {
                let normalized = normalize(s.as_ref());
                (!normalized.is_empty()).then(|| normalized.into_boxed_str())
            })
            .collect();
        Self { suffixes }
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(normalize(suffix).as_str())
    }

    /// True when any entry is a string suffix of `name`.
    ///
    /// `name` must already be normalized. Each tail of the name is probed
    /// once, so the cost depends on the name length, not the set size.
    pub fn matches_suffix(&self, name: &str) -> bool {
        if self.suffixes.is_empty() {
            return false;
        }
        name.char_indices()
            .any(|(i, _)| self.suffixes.contains(&name[i..]))
    }
}

/// Strips surrounding whitespace and the root-label dot, lower-cases ASCII.
pub fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Indices of items containing `query`, case-insensitive
///
/// The query is trimmed first; an empty query matches nothing.
pub fn find_matches<'a>(items: impl Iterator<Item = &'a str>, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    items
        .enumerate()
        .filter(|(_, item)| item.to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Match list with a wrap-around position for next/previous navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCursor {
    query: String,
    matches: Vec<usize>,
    position: usize,
}

impl SearchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a fresh search, returning the first match
    pub fn search<'a>(&mut self, items: impl Iterator<Item = &'a str>, query: &str) -> Option<usize> {
        self.query = query.trim().to_string();
        self.matches = find_matches(items, &self.query);
        self.position = 0;
        self.current()
    }

    /// Move `direction` matches forward (negative for backward), wrapping around
    ///
    /// With no matches the last query is searched again first, so stepping after
    /// new items arrive picks them up.
    pub fn step<'a>(
        &mut self,
        items: impl Iterator<Item = &'a str>,
        direction: isize,
    ) -> Option<usize> {
        if self.matches.is_empty() {
            let query = self.query.clone();
            return self.search(items, &query);
        }

        let len = self.matches.len() as isize;
        self.position = (self.position as isize + direction).rem_euclid(len) as usize;
        self.current()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.position = 0;
    }

    pub fn current(&self) -> Option<usize> {
        self.matches.get(self.position).copied()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}

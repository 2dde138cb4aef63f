//! Free-text tag editor used for comic genres

use serde::Serialize;

/// Ordered list of distinct, trimmed, non-empty tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the trimmed tag; blank input and already-present tags are ignored
    ///
    /// Returns whether the list changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }

        self.tags.push(tag.to_string());
        true
    }

    /// Enter-key commit of a text input: add its contents and clear it on success
    pub fn commit(&mut self, input: &mut String) -> bool {
        let added = self.add(input);
        if added {
            input.clear();
        }
        added
    }

    /// Remove the first entry equal to `value`
    pub fn remove(&mut self, value: &str) -> bool {
        match self.tags.iter().position(|tag| tag == value) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.tags.iter().any(|tag| tag == value)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// JSON array encoding sent as the `genres` form field
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.tags).expect("tag list is always serialisable")
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = TagList::new();
        for tag in iter {
            list.add(tag.as_ref());
        }
        list
    }
}

//! # Ordered header map
//! src/http/headers.rs
//!
//! HTTP headers are a multi-map: a name may repeat and the order of values
//! under one name is significant. Serialization also walks names in the
//! order they were first inserted, so a plain `HashMap` is not enough.
//! Lookups compare names case-insensitively; the stored spelling is kept
//! for serialization.

/// Insertion-ordered, multi-value header map.
///
/// # Example
/// ```
/// use webserver::http::Headers;
///
/// let mut headers = Headers::new();
/// headers.append("Set-Cookie", "a=1");
/// headers.append("Set-Cookie", "b=2");
///
/// assert_eq!(headers.get("set-cookie"), Some("a=1"));
/// assert_eq!(headers.get_all("Set-Cookie"), ["a=1", "b=2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<String>)>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `name`, preserving any existing values.
    pub fn append(&mut self, name: &str, value: &str) {
        match self.entry_mut(name) {
            Some(values) => values.push(value.to_string()),
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    /// First value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entry(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Iterates over `(name, values)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no headers at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Option<&Vec<String>> {
        self.entries
            .iter()
            .find(|(stored, _)| stored.eq_ignore_ascii_case(name))
            .map(|(_, values)| values)
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.entries
            .iter_mut()
            .find(|(stored, _)| stored.eq_ignore_ascii_case(name))
            .map(|(_, values)| values)
    }
}

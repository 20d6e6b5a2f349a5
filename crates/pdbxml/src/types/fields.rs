/// Ordered key -> text mapping.
///
/// Keys keep their first insertion position; inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<K = &'static str> {
    entries: Vec<(K, String)>,
}

impl<K> Default for Fields<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: AsRef<str>> Fields<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: impl Into<String>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.as_ref() == key.as_ref())
        {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_ref() == key)
            .map(|(_, value)| value.as_str())
    }

    /// Case-insensitive lookup. When several keys differ only by case the
    /// most recently inserted one wins.
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(existing, _)| existing.as_ref().eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_ref(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_keeps_position() {
        let mut fields = Fields::new();
        fields.insert("a", "1");
        fields.insert("b", "2");
        fields.insert("a", "3");

        let entries: Vec<_> = fields.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn ignore_case_prefers_latest_key() {
        let mut fields: Fields<String> = Fields::new();
        fields.insert("Voltage".to_string(), "12.6");
        fields.insert("voltage".to_string(), "12.7");

        assert_eq!(fields.get("Voltage"), Some("12.6"));
        assert_eq!(fields.get_ignore_case("VOLTAGE"), Some("12.7"));
        assert_eq!(fields.get_ignore_case("impedence"), None);
    }
}

use std::fmt;

/// Ordered query parameters of a SAS token.
///
/// Parameters are encoded in insertion order, the verifier doesn't sort them
/// for us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    /// Append a parameter only if `present` is set.
    pub fn push_if(&mut self, present: bool, key: &'static str, value: impl fmt::Display) {
        if present {
            self.push(key, value.to_string());
        }
    }

    /// Get the first value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The raw, unencoded parameters.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Encode into a `application/x-www-form-urlencoded` query string.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

//! Query-string construction.

use std::borrow::Cow;
use std::fmt::Display;

/// Ordered query parameters. Absent and empty values are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter unless its rendered value is empty.
    #[must_use]
    pub fn push(mut self, key: &'static str, value: impl Display) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key, value));
        }
        self
    }

    /// Add a parameter only when it is set.
    #[must_use]
    pub fn opt<V: Display>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `?k=v&...` with percent-encoded keys and values, or an empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }

        let joined = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }

    /// Append the query string to an endpoint path.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        format!("{path}{}", self.to_query_string())
    }
}

/// Percent-encode an ID for use as a path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_params_means_no_question_mark() {
        assert_eq!(QueryParams::new().apply("/products"), "/products");
        assert_eq!(
            QueryParams::new()
                .opt::<u32>("page", None)
                .opt("search", Some(""))
                .apply("/products"),
            "/products"
        );
    }

    #[test]
    fn test_only_present_params_in_order() {
        let query = QueryParams::new()
            .opt("page", Some(2))
            .opt("limit", Some(20))
            .opt::<&str>("category", None)
            .opt("search", Some("idol"));
        assert_eq!(query.to_query_string(), "?page=2&limit=20&search=idol");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let query = QueryParams::new().push("search", "ganesh & lakshmi");
        assert_eq!(query.to_query_string(), "?search=ganesh%20%26%20lakshmi");
    }

    #[test]
    fn test_false_is_still_sent() {
        let query = QueryParams::new().opt("featured", Some(false));
        assert_eq!(query.to_query_string(), "?featured=false");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("65f1c0ffee"), "65f1c0ffee");
        assert_eq!(segment("a/b"), "a%2Fb");
    }
}

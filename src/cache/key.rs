//! Cache key derivation.

use std::fmt;

/// Cache lookup discriminator.
///
/// Derived deterministically and solely from the request uri: verb, query,
/// and body do not participate, so two verbs against the same uri share one
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::from_uri(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::from_uri(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_the_uri_and_nothing_else() {
        let key = CacheKey::from_uri("http://svc/widgets/1");
        assert_eq!(key.as_str(), "http://svc/widgets/1");
        assert_eq!(key.to_string(), "http://svc/widgets/1");
        assert_eq!(key, CacheKey::from("http://svc/widgets/1"));
    }
}

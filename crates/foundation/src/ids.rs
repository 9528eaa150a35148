use serde::{Deserialize, Serialize};

/// Stable identifier of a slide; also the key of its dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(String);

impl SlideId {
    pub fn new(id: impl Into<String>) -> Self {
        SlideId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(s: &str) -> Self {
        SlideId(s.to_string())
    }
}

impl From<String> for SlideId {
    fn from(s: String) -> Self {
        SlideId(s)
    }
}

impl PartialEq<str> for SlideId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SlideId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::SlideId;

    #[test]
    fn compares_with_plain_strings() {
        let id = SlideId::new("title-slide");
        assert_eq!(id, "title-slide");
        assert_eq!(id.to_string(), "title-slide");
    }

    #[test]
    fn serializes_as_bare_string() {
        let id: SlideId = serde_json::from_str("\"quakes\"").unwrap();
        assert_eq!(id.as_str(), "quakes");
    }
}

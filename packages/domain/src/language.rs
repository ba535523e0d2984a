//! BCP-47 language tag (e.g. "en-US").
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Create a new language tag.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the underlying language code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Primary subtag, lowercased (`"en"` for `"en-GB"`).
    pub fn primary(&self) -> String {
        self.0
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// English (US)
    pub fn english_us() -> Self {
        Self::new("en-US")
    }

    /// English (UK)
    pub fn english_uk() -> Self {
        Self::new("en-GB")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_subtag() {
        assert_eq!(Language::english_uk().primary(), "en");
        assert_eq!(Language::new("pt_BR").primary(), "pt");
    }
}

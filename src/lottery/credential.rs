use std::fmt;

/// A typed-in key must be longer than this before it can be saved.
pub const MIN_KEY_LEN: usize = 12;

/// Ephemeral OpenAI API key. Lives in memory only; formatting never reveals it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Accepts a typed-in key only when it is long enough to be plausible.
    pub fn from_input(input: &str) -> Option<Self> {
        let key = input.trim();
        (key.chars().count() > MIN_KEY_LEN).then(|| Self(key.to_string()))
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

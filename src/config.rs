use serde::{Deserialize, Serialize};

/// What to do with a source that holds no symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyInput {
    /// Produce an empty frequency map, empty tree and empty output.
    #[default]
    Allow,
    /// Fail with [`HuffmanError::EmptyInput`](crate::HuffmanError::EmptyInput).
    Reject,
}

/// Pipeline options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Policy for a source with no symbols.
    pub empty_input: EmptyInput,
}

impl Config {
    /// Default configuration: empty input is allowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-input policy.
    pub fn with_empty_input(mut self, policy: EmptyInput) -> Self {
        self.empty_input = policy;
        self
    }
}

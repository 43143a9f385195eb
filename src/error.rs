//! Error types shared by every stage of the pipeline.

use thiserror::Error;

/// Errors raised while counting, building, encoding or decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// The source contained no symbols and the configuration rejects that.
    #[error("input contains no symbols")]
    EmptyInput,

    /// Symbol counts add up to more than a `u64` can hold.
    #[error("symbol counts overflow a 64-bit total")]
    WeightOverflow,

    /// A code tree breaks the leaf/symbol or two-children invariant.
    #[error("malformed code tree: {reason}")]
    MalformedTree {
        /// Which invariant was violated.
        reason: &'static str,
    },

    /// The symbol stream holds a symbol the code map has no entry for.
    #[error("symbol at position {position} has no code")]
    SymbolNotInCodeMap {
        /// Index of the offending symbol in the input.
        position: usize,
    },

    /// The bit stream ended part way through a code.
    #[error("bit stream ended mid-code ({dangling} dangling bits)")]
    TruncatedStream {
        /// Bits read since the last complete symbol.
        dangling: usize,
    },
}

/// Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;

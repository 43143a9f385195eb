use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyMap;
use crate::table::CodeMap;
use std::hash::Hash;
use total_float_wrap::TotalF64;

/// Size figures for a code table applied to the source it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeStats {
    /// Encoded length in bits: sum of count times code length.
    pub total_bits: u64,
    /// Mean code length in bits per symbol.
    pub average_len: TotalF64,
    /// Shannon entropy of the distribution in bits per symbol.
    pub entropy: TotalF64,
}

impl CodeStats {
    pub fn new<Symbol>(freq: &FrequencyMap<Symbol>, codes: &CodeMap<Symbol>) -> Result<Self>
    where
        Symbol: Ord + Hash + Eq,
    {
        let total = freq.total();
        let mut total_bits = 0u64;
        let mut entropy = 0.0;

        for (position, (s, &count)) in freq.iter().enumerate() {
            let code = codes
                .get(s)
                .ok_or(HuffmanError::SymbolNotInCodeMap { position })?;
            total_bits = (code.len() as u64)
                .checked_mul(count)
                .and_then(|bits| total_bits.checked_add(bits))
                .ok_or(HuffmanError::WeightOverflow)?;

            let p = count as f64 / total as f64;
            entropy -= p * p.log2();
        }

        let average_len = if total == 0 {
            0.0
        } else {
            total_bits as f64 / total as f64
        };

        Ok(Self {
            total_bits,
            average_len: TotalF64(average_len),
            entropy: TotalF64(entropy),
        })
    }
}

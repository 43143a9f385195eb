//! Huffman coding over arbitrary ordered symbols.
//!
//! The pipeline is: count symbols into a [`FrequencyMap`], build a
//! [`CodeTree`], derive a [`CodeMap`] for the [`Encoder`], and hand the tree
//! itself to the [`Decoder`].
//!
//! ```
//! use huffcode::{huffman, Config};
//!
//! let s = "Hello my name is Sam!";
//! let tree = huffman(s.bytes(), &Config::new())?;
//! let (e, d) = tree.into_encoder_decoder_pair()?;
//!
//! let out = e.encode(s.bytes())?;
//! assert_eq!(d.decode(&out)?, s.as_bytes());
//! # Ok::<(), huffcode::HuffmanError>(())
//! ```
//!
//! The encoded stream carries no header. A decoder needs the same tree,
//! either directly or shipped out-of-band through serde.

pub mod codec;
pub mod config;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod table;
pub mod tree;

pub use codec::{Bits, Decoder, Encoder, PackedBits};
pub use config::{Config, EmptyInput};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyMap;
pub use stats::CodeStats;
pub use table::{Code, CodeMap};
pub use tree::{CodeTree, Node};

/// Counts `symbols` and builds their code tree in one step.
pub fn huffman<Symbol: Ord + Clone>(
    symbols: impl IntoIterator<Item = Symbol>,
    config: &Config,
) -> Result<CodeTree<Symbol>> {
    let freq = FrequencyMap::count_with(symbols, config)?;
    Ok(CodeTree::build(&freq))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(s: &str) -> String {
        let tree = huffman(s.chars(), &Config::new()).unwrap();
        let (e, d) = tree.into_encoder_decoder_pair().unwrap();
        let out = e.encode(s.chars()).unwrap();
        d.decode(&out).unwrap().into_iter().collect()
    }

    #[test]
    fn round_trips() {
        for s in [
            "",
            "a",
            "aaaaaaaaaa",
            "ab",
            "AAAABBBCCD",
            "It was the best of times, it was the worst of times.",
            "unicode: żółć 日本語 🦀🦀",
        ] {
            assert_eq!(round_trip(s), s);
        }
    }

    #[test]
    fn round_trips_every_byte() {
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|b| std::iter::repeat(b).take(b as usize + 1))
            .collect();
        let (e, d) = huffman(data.iter().copied(), &Config::new())
            .unwrap()
            .into_encoder_decoder_pair()
            .unwrap();

        let out = e.encode(data.iter().copied()).unwrap();
        assert!(out.len() < data.len() * 8);
        assert_eq!(d.decode(&out).unwrap(), data);
    }

    #[test]
    fn reject_policy_surfaces_empty_input() {
        let config = Config::new().with_empty_input(EmptyInput::Reject);
        assert_eq!(
            huffman(Vec::<u8>::new(), &config).unwrap_err(),
            HuffmanError::EmptyInput
        );
    }

    #[test]
    fn tree_shipped_out_of_band() {
        let s = "she sells sea shells by the sea shore";
        let tree = huffman(s.bytes(), &Config::new()).unwrap();
        let shipped = rmp_serde::to_vec(&tree).unwrap();

        let (e, _) = tree.into_encoder_decoder_pair().unwrap();
        let packed = PackedBits::from(e.encode(s.bytes()).unwrap());
        let packed = rmp_serde::to_vec(&packed).unwrap();

        let tree: CodeTree<u8> = rmp_serde::from_slice(&shipped).unwrap();
        let d = Decoder::new(tree).unwrap();
        let packed: PackedBits = rmp_serde::from_slice(&packed).unwrap();

        assert_eq!(d.decode(&packed.into_bits().unwrap()).unwrap(), s.as_bytes());
    }
}

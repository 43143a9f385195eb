use crate::error::{HuffmanError, Result};
use crate::table::CodeMap;
use crate::tree::CodeTree;
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use tracing::debug;

/// An encoded bit stream, filled most significant bit first.
pub type Bits = BitVec<u8, Msb0>;

#[derive(Debug, Clone)]
pub struct Encoder<Symbol>
where
    Symbol: Hash + Eq,
{
    codes: CodeMap<Symbol>,
}

impl<Symbol> Encoder<Symbol>
where
    Symbol: Hash + Eq,
{
    pub fn new(codes: CodeMap<Symbol>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &CodeMap<Symbol> {
        &self.codes
    }

    /// Appends the code of every symbol in order.
    ///
    /// Nothing is returned unless every symbol has a code. With a single
    /// symbol table each occurrence still costs one bit.
    pub fn encode(&self, stream: impl IntoIterator<Item = Symbol>) -> Result<Bits> {
        let mut out = Bits::new();
        for (position, s) in stream.into_iter().enumerate() {
            let code = self
                .codes
                .get(&s)
                .ok_or(HuffmanError::SymbolNotInCodeMap { position })?;
            out.extend_from_bitslice(code);
        }

        debug!(bits = out.len(), "encoded stream");
        Ok(out)
    }
}

/// Walks a code tree bit by bit to recover symbols.
#[derive(Debug, Clone)]
pub struct Decoder<Symbol> {
    tree: CodeTree<Symbol>,
}

impl<Symbol> Decoder<Symbol>
where
    Symbol: Clone,
{
    /// Takes ownership of the tree after checking its invariants, so trees
    /// received out-of-band are safe to decode with.
    pub fn new(tree: CodeTree<Symbol>) -> Result<Self> {
        tree.validate()?;
        Ok(Self { tree })
    }

    pub fn tree(&self) -> &CodeTree<Symbol> {
        &self.tree
    }

    /// Decodes a stream made of complete codes.
    ///
    /// A single-leaf tree ignores the stream and replays its symbol as many
    /// times as its weight records. An empty tree yields nothing.
    pub fn decode(&self, input: &BitSlice<u8, Msb0>) -> Result<Vec<Symbol>> {
        let Some(root) = self.tree.root() else {
            debug!(ignored = input.len(), "empty tree, nothing to decode");
            return Ok(Vec::new());
        };

        if let Some(sym) = root.symbol() {
            if input.len() as u64 != root.weight() {
                debug!(
                    bits = input.len(),
                    weight = root.weight(),
                    "single symbol stream length differs from weight, replaying weight"
                );
            }
            let too_large = HuffmanError::MalformedTree {
                reason: "leaf weight too large to replay",
            };
            let n = usize::try_from(root.weight()).map_err(|_| too_large.clone())?;

            let mut out = Vec::new();
            out.try_reserve_exact(n).map_err(|_| too_large)?;
            out.extend(std::iter::repeat(sym).take(n).cloned());
            return Ok(out);
        }

        let mut out = Vec::new();
        let mut cursor = root;
        let mut dangling = 0;
        for b in input.iter().by_vals() {
            let next = if b { cursor.right() } else { cursor.left() };
            cursor = next.ok_or(HuffmanError::MalformedTree {
                reason: "node has exactly one child",
            })?;
            dangling += 1;

            if let Some(sym) = cursor.symbol() {
                out.push(sym.clone());
                cursor = root;
                dangling = 0;
            }
        }

        if dangling > 0 {
            return Err(HuffmanError::TruncatedStream { dangling });
        }

        debug!(symbols = out.len(), "decoded stream");
        Ok(out)
    }
}

/// A bit stream laid out as bytes plus its exact bit length, for storage
/// or transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedBits {
    bit_len: usize,
    bytes: Vec<u8>,
}

impl PackedBits {
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Restores the bit stream, dropping the padding of the final byte.
    pub fn into_bits(self) -> Result<Bits> {
        let available = self.bytes.len() * 8;
        if self.bit_len > available {
            return Err(HuffmanError::TruncatedStream {
                dangling: available,
            });
        }

        let mut bv = Bits::from_vec(self.bytes);
        bv.truncate(self.bit_len);
        Ok(bv)
    }
}

impl From<Bits> for PackedBits {
    fn from(mut bits: Bits) -> Self {
        let bit_len = bits.len();
        // padding in the last byte is written as zeros
        bits.set_uninitialized(false);

        Self {
            bit_len,
            bytes: bits.into_vec(),
        }
    }
}

use crate::error::{HuffmanError, Result};
use crate::tree::CodeTree;
use bitvec::prelude::*;
use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;
use tracing::debug;

/// A single code word, most significant bit first.
pub type Code = BitBox<u8, Msb0>;

/// Symbol to code word table derived from a [`CodeTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMap<Symbol>
where
    Symbol: Hash + Eq,
{
    codes: HashMap<Symbol, Code>,
}

impl<Symbol> CodeMap<Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    /// Walks the tree depth-first, appending 0 going left and 1 going right.
    ///
    /// A tree consisting of one leaf gets the code `0`, since an empty code
    /// cannot be carried in a bit stream.
    pub fn build(tree: &CodeTree<Symbol>) -> Result<Self> {
        let mut codes = HashMap::new();
        let Some(root) = tree.root() else {
            debug!("empty tree, empty code map");
            return Ok(Self { codes });
        };

        let mut prefix = BitVec::<u8, Msb0>::new();
        if root.is_leaf() {
            prefix.push(false);
        }

        // explicit stack: trees may arrive deserialized and arbitrarily deep
        let mut stack = vec![(root, prefix)];
        while let Some((node, mut v)) = stack.pop() {
            match (node.left(), node.right(), node.symbol()) {
                (None, None, Some(sym)) => {
                    codes.insert(sym.clone(), v.into_boxed_bitslice());
                }
                (Some(left), Some(right), None) => {
                    let mut right_code = v.clone();
                    right_code.push(true);
                    v.push(false);

                    stack.push((right, right_code));
                    stack.push((left, v));
                }
                (None, None, None) => {
                    return Err(HuffmanError::MalformedTree {
                        reason: "leaf without a symbol",
                    })
                }
                (Some(_), Some(_), Some(_)) => {
                    return Err(HuffmanError::MalformedTree {
                        reason: "internal node carries a symbol",
                    })
                }
                _ => {
                    return Err(HuffmanError::MalformedTree {
                        reason: "node has exactly one child",
                    })
                }
            }
        }

        debug!(symbols = codes.len(), "built code map");
        Ok(Self { codes })
    }
}

impl<Symbol> CodeMap<Symbol>
where
    Symbol: Hash + Eq,
{
    pub fn get(&self, symbol: &Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol).map(|c| c.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Symbol, Code> {
        self.codes.iter()
    }
}

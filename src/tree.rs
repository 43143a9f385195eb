use crate::codec::{Decoder, Encoder};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyMap;
use crate::table::CodeMap;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// A node of a code tree.
///
/// Leaves carry a symbol and its count; internal nodes carry no symbol and
/// own exactly two children whose weights sum to their own. Nodes compare by
/// weight alone.
#[derive(Debug, Clone, Derivative, Serialize, Deserialize)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
pub struct Node<Symbol> {
    pub(crate) weight: u64,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    pub(crate) symbol: Option<Symbol>,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    pub(crate) left: Option<Box<Node<Symbol>>>,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    pub(crate) right: Option<Box<Node<Symbol>>>,
}

impl<Symbol> Node<Symbol> {
    pub(crate) fn leaf(s: Symbol, weight: u64) -> Self {
        Self {
            weight,
            symbol: Some(s),
            left: None,
            right: None,
        }
    }

    pub(crate) fn from_children(left: Node<Symbol>, right: Node<Symbol>) -> Self {
        Self {
            weight: left.weight + right.weight,
            symbol: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    pub fn left(&self) -> Option<&Node<Symbol>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<Symbol>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Checks the subtree with an explicit stack, so a deep tree from an
    /// untrusted source cannot exhaust the call stack.
    fn check(&self) -> Result<()> {
        let malformed = |reason: &'static str| -> Result<()> {
            Err(HuffmanError::MalformedTree { reason })
        };

        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match (node.left.as_deref(), node.right.as_deref()) {
                (None, None) => {
                    if node.symbol.is_none() {
                        return malformed("leaf without a symbol");
                    }
                    if node.weight == 0 {
                        return malformed("leaf with zero weight");
                    }
                }
                (Some(left), Some(right)) => {
                    if node.symbol.is_some() {
                        return malformed("internal node carries a symbol");
                    }
                    if left.weight.checked_add(right.weight) != Some(node.weight) {
                        return malformed("internal weight is not the sum of its children");
                    }
                    stack.push(right);
                    stack.push(left);
                }
                _ => return malformed("node has exactly one child"),
            }
        }

        Ok(())
    }
}

/// An optimal prefix-code tree, or the empty tree for an empty source.
///
/// The tree is immutable once built. It serializes with serde so it can be
/// handed to a decoder out-of-band; a deserialized tree should be passed
/// through [`validate`](Self::validate) (the [`Decoder`] does this itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeTree<Symbol> {
    root: Option<Node<Symbol>>,
}

impl<Symbol> CodeTree<Symbol>
where
    Symbol: Ord + Clone,
{
    /// Greedily merges the two lightest trees until one remains.
    ///
    /// Ties are broken first-in-first-out: leaves are queued in symbol order,
    /// each merged tree is queued after everything already queued, and among
    /// equal weights the earliest queued tree is extracted first. The first
    /// tree extracted becomes the left child.
    pub fn build(freq: &FrequencyMap<Symbol>) -> Self {
        let mut pq: BinaryHeap<Reverse<(Node<Symbol>, u64)>> = freq
            .iter()
            .enumerate()
            .map(|(i, (s, &count))| Reverse((Node::leaf(s.clone(), count), i as u64)))
            .collect();
        let mut seq = pq.len() as u64;

        loop {
            let Some(Reverse((left, _))) = pq.pop() else {
                debug!("built empty code tree");
                return Self { root: None };
            };
            let Some(Reverse((right, _))) = pq.pop() else {
                debug!(weight = left.weight, "built code tree");
                return Self { root: Some(left) };
            };

            trace!(left = left.weight, right = right.weight, "merging subtrees");
            pq.push(Reverse((Node::from_children(left, right), seq)));
            seq += 1;
        }
    }
}

impl<Symbol> CodeTree<Symbol> {
    #[cfg(test)]
    pub(crate) fn from_root(root: Option<Node<Symbol>>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Node<Symbol>> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total weight of the tree, which is the length of the counted source.
    pub fn weight(&self) -> u64 {
        self.root.as_ref().map_or(0, |r| r.weight)
    }

    /// Checks every structural and weight invariant of the tree.
    pub fn validate(&self) -> Result<()> {
        match &self.root {
            Some(root) => root.check(),
            None => Ok(()),
        }
    }
}

impl<Symbol> CodeTree<Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    pub fn into_encoder_decoder_pair(self) -> Result<(Encoder<Symbol>, Decoder<Symbol>)> {
        let codes = CodeMap::build(&self)?;
        Ok((Encoder::new(codes), Decoder::new(self)?))
    }
}

impl<Symbol> fmt::Display for CodeTree<Symbol>
where
    Symbol: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node<Symbol: fmt::Debug>(
            f: &mut fmt::Formatter<'_>,
            node: &Node<Symbol>,
            depth: usize,
            label: &str,
        ) -> fmt::Result {
            let indent = "  ".repeat(depth);
            match &node.symbol {
                Some(s) => writeln!(f, "{indent}{label}-> Leaf {s:?} [weight: {}]", node.weight)?,
                None => writeln!(f, "{indent}{label}-> Internal [weight: {}]", node.weight)?,
            }
            if let Some(left) = &node.left {
                write_node(f, left, depth + 1, "L")?;
            }
            if let Some(right) = &node.right {
                write_node(f, right, depth + 1, "R")?;
            }
            Ok(())
        }

        match &self.root {
            Some(root) => write_node(f, root, 0, "root"),
            None => writeln!(f, "<empty>"),
        }
    }
}

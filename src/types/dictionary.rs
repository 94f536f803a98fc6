//! The transformed token set handed to formats.

use super::category::{distinct_categories, Category};
use super::token::Token;
use super::tree::TokenGroup;

/// Transformed tokens, both flattened and nested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    /// Every token, depth-first in source order.
    pub all_tokens: Vec<Token>,
    /// The nested tree the flat list was taken from.
    pub tokens: TokenGroup,
}

impl Dictionary {
    /// Build a dictionary from a transformed tree.
    pub fn new(tokens: TokenGroup) -> Self {
        let all_tokens = tokens.tokens().into_iter().cloned().collect();
        Self { all_tokens, tokens }
    }

    /// A dictionary holding only the tokens that match `keep`.
    pub fn filtered(&self, keep: &impl Fn(&Token) -> bool) -> Self {
        Self::new(self.tokens.filter(keep))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        distinct_categories(self.all_tokens.iter().filter_map(|t| t.category()))
    }

    pub fn len(&self) -> usize {
        self.all_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_tokens.is_empty()
    }
}

//! Nested token tree.
//!
//! Mirrors the YAML source: groups map keys to child nodes in source order,
//! leaves are tokens.

use std::path::PathBuf;

use indexmap::IndexMap;

use super::token::Token;

/// A node in the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Group(TokenGroup),
    Token(Token),
}

impl TokenNode {
    /// Get the token if this node is a leaf.
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            TokenNode::Token(token) => Some(token),
            TokenNode::Group(_) => None,
        }
    }

    /// Get the group if this node is not a leaf.
    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenNode::Group(group) => Some(group),
            TokenNode::Token(_) => None,
        }
    }
}

/// An ordered group of child nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroup {
    children: IndexMap<String, TokenNode>,
}

/// A token or group redefined by a later source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// Dot-joined path of the redefined node.
    pub path: String,
    /// File of the definition that was replaced, when known.
    pub previous: Option<PathBuf>,
    /// File of the definition that won, when known.
    pub replacement: Option<PathBuf>,
}

impl TokenGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a child, replacing (in place) any existing child with that key.
    pub fn insert(&mut self, key: impl Into<String>, node: TokenNode) -> Option<TokenNode> {
        self.children.insert(key.into(), node)
    }

    /// Get a direct child.
    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.children.get(key)
    }

    /// Iterate over direct children in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All tokens, depth-first in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        collect_tokens(self, &mut out);
        out
    }

    /// All tokens, mutably, depth-first in source order.
    pub fn tokens_mut(&mut self) -> Vec<&mut Token> {
        let mut out = Vec::new();
        collect_tokens_mut(self, &mut out);
        out
    }

    /// Total number of tokens in the tree.
    pub fn token_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                TokenNode::Token(_) => 1,
                TokenNode::Group(group) => group.token_count(),
            })
            .sum()
    }

    /// Look up a node by path segments.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&TokenNode> {
        let (first, rest) = path.split_first()?;
        let node = self.children.get(first.as_ref())?;
        if rest.is_empty() {
            return Some(node);
        }
        match node {
            TokenNode::Group(group) => group.lookup(rest),
            TokenNode::Token(_) => None,
        }
    }

    /// Find a token by its dot-joined path.
    pub fn find_token(&self, dotted: &str) -> Option<&Token> {
        let segments: Vec<&str> = dotted.split('.').collect();
        self.lookup(&segments).and_then(TokenNode::as_token)
    }

    /// Deep-merge `other` into this group.
    ///
    /// Groups merge recursively. Any other overlap is resolved in favour of
    /// `other`, and the overwritten path is reported in `collisions`.
    pub fn merge(&mut self, other: TokenGroup, collisions: &mut Vec<Collision>) {
        self.merge_at(other, &mut Vec::new(), collisions);
    }

    fn merge_at(
        &mut self,
        other: TokenGroup,
        prefix: &mut Vec<String>,
        collisions: &mut Vec<Collision>,
    ) {
        for (key, incoming) in other.children {
            prefix.push(key.clone());
            match (self.children.get_mut(&key), incoming) {
                (Some(TokenNode::Group(existing)), TokenNode::Group(group)) => {
                    existing.merge_at(group, prefix, collisions);
                }
                (Some(existing), incoming) => {
                    collisions.push(Collision {
                        path: prefix.join("."),
                        previous: first_source(existing),
                        replacement: first_source(&incoming),
                    });
                    *existing = incoming;
                }
                (None, incoming) => {
                    self.children.insert(key, incoming);
                }
            }
            prefix.pop();
        }
    }

    /// Wrap this group one level deeper under `key`.
    pub fn wrap(self, key: impl Into<String>) -> TokenGroup {
        let mut wrapped = TokenGroup::new();
        wrapped.insert(key, TokenNode::Group(self));
        wrapped
    }

    /// Keep only tokens matching `keep`; groups left empty are dropped.
    pub fn filter(&self, keep: &impl Fn(&Token) -> bool) -> TokenGroup {
        let mut filtered = TokenGroup::new();
        for (key, node) in &self.children {
            match node {
                TokenNode::Token(token) if keep(token) => {
                    filtered.insert(key.clone(), node.clone());
                }
                TokenNode::Token(_) => {}
                TokenNode::Group(group) => {
                    let group = group.filter(keep);
                    if !group.is_empty() {
                        filtered.insert(key.clone(), TokenNode::Group(group));
                    }
                }
            }
        }
        filtered
    }
}

fn collect_tokens<'a>(group: &'a TokenGroup, out: &mut Vec<&'a Token>) {
    for node in group.children.values() {
        match node {
            TokenNode::Token(token) => out.push(token),
            TokenNode::Group(child) => collect_tokens(child, out),
        }
    }
}

fn collect_tokens_mut<'a>(group: &'a mut TokenGroup, out: &mut Vec<&'a mut Token>) {
    for node in group.children.values_mut() {
        match node {
            TokenNode::Token(token) => out.push(token),
            TokenNode::Group(child) => collect_tokens_mut(child, out),
        }
    }
}

fn first_source(node: &TokenNode) -> Option<PathBuf> {
    match node {
        TokenNode::Token(token) => token.file_path.clone(),
        TokenNode::Group(group) => group
            .tokens()
            .into_iter()
            .find_map(|token| token.file_path.clone()),
    }
}

//! Semantic token attributes.
//!
//! The six positional slots (category, type, item, theme, subitem, state)
//! are named fields rather than indices, so a path can fill at most six of
//! them. Anything else an author writes under `attributes:` is kept in
//! `extra`.

use std::collections::BTreeMap;

/// Attribute keys in positional order.
pub const CTI_LABELS: [&str; 6] = ["category", "type", "item", "theme", "subitem", "state"];

/// Semantic attributes attached to a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub category: Option<String>,
    /// The `type` slot (renamed: `type` is a keyword).
    pub kind: Option<String>,
    pub item: Option<String>,
    pub theme: Option<String>,
    pub subitem: Option<String>,
    pub state: Option<String>,
    /// Non-positional attributes, sorted by key.
    pub extra: BTreeMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive all six slots from a token path.
    ///
    /// Segments past the sixth are ignored; short paths leave the trailing
    /// slots unset.
    pub fn from_path(path: &[String]) -> Self {
        let mut segments = path.iter().cloned();
        Self {
            category: segments.next(),
            kind: segments.next(),
            item: segments.next(),
            theme: segments.next(),
            subitem: segments.next(),
            state: segments.next(),
            extra: BTreeMap::new(),
        }
    }

    /// Derive the conventional five CTI slots (no theme) from a token path.
    pub fn from_path_cti(path: &[String]) -> Self {
        let mut segments = path.iter().cloned();
        Self {
            category: segments.next(),
            kind: segments.next(),
            item: segments.next(),
            theme: None,
            subitem: segments.next(),
            state: segments.next(),
            extra: BTreeMap::new(),
        }
    }

    /// Overlay `explicit` on top of `self`. Every slot set in `explicit` wins.
    pub fn overlay(self, explicit: &Attributes) -> Self {
        let mut extra = self.extra;
        extra.extend(explicit.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            category: explicit.category.clone().or(self.category),
            kind: explicit.kind.clone().or(self.kind),
            item: explicit.item.clone().or(self.item),
            theme: explicit.theme.clone().or(self.theme),
            subitem: explicit.subitem.clone().or(self.subitem),
            state: explicit.state.clone().or(self.state),
            extra,
        }
    }

    /// Look up an attribute by its key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "category" => self.category.as_deref(),
            "type" => self.kind.as_deref(),
            "item" => self.item.as_deref(),
            "theme" => self.theme.as_deref(),
            "subitem" => self.subitem.as_deref(),
            "state" => self.state.as_deref(),
            other => self.extra.get(other).map(|s| s.as_str()),
        }
    }

    /// Set an attribute by its key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            "category" => self.category = value,
            "type" => self.kind = value,
            "item" => self.item = value,
            "theme" => self.theme = value,
            "subitem" => self.subitem = value,
            "state" => self.state = value,
            other => {
                if let Some(value) = value {
                    self.extra.insert(other.to_string(), value);
                }
            }
        }
    }

    /// Iterate over all set attributes: positional slots first, then extras.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let slots = [
            &self.category,
            &self.kind,
            &self.item,
            &self.theme,
            &self.subitem,
            &self.state,
        ];
        CTI_LABELS
            .into_iter()
            .zip(slots)
            .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Check whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

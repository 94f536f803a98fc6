//! Token transforms.
//!
//! A transform is a pure function applied to every token a platform builds.
//! It produces either new attributes, a new name, or a new value; tokens the
//! transform does not match pass through untouched. Transforms run in chain
//! order, so later transforms see the output of earlier ones (value
//! transforms typically match on attributes set by an attribute transform).

mod attribute;
mod name;
mod value;

use serde_json::Value;

use crate::error::Result;
use crate::types::{Attributes, Token, TokenGroup};

pub use attribute::{AttributeCti, AttributeCtiCustom};
pub use name::{CtiName, NameCase};
pub use value::{ColorFormat, ColorTransform, ContentIcon, SizeTransform, TimeSeconds};

/// What a transform replaces on a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutput {
    Attributes(Attributes),
    Name(String),
    Value(Value),
}

/// A named token transform.
pub trait Transform: Send + Sync {
    /// Registry name, e.g. `name/cti/kebab`.
    fn name(&self) -> &str;

    /// Whether this transform applies to `token`.
    fn matches(&self, _token: &Token) -> bool {
        true
    }

    /// Compute the replacement for a matching token.
    fn transform(&self, token: &Token) -> Result<TransformOutput>;
}

/// Apply a transform chain to a single token in place.
pub fn apply_transforms(token: &mut Token, chain: &[&dyn Transform]) -> Result<()> {
    for transform in chain {
        if !transform.matches(token) {
            continue;
        }
        match transform.transform(token)? {
            TransformOutput::Attributes(attributes) => token.attributes = attributes,
            TransformOutput::Name(name) => token.name = name,
            TransformOutput::Value(value) => token.value = value,
        }
    }
    Ok(())
}

/// Apply a transform chain to every token of a tree, returning a new tree.
pub fn transform_tree(tree: &TokenGroup, chain: &[&dyn Transform]) -> Result<TokenGroup> {
    let mut transformed = tree.clone();
    for token in transformed.tokens_mut() {
        apply_transforms(token, chain)?;
    }
    Ok(transformed)
}

/// All builtin transforms.
pub fn builtin_transforms() -> Vec<Box<dyn Transform>> {
    vec![
        Box::new(AttributeCtiCustom),
        Box::new(AttributeCti),
        Box::new(CtiName::new(NameCase::Kebab)),
        Box::new(CtiName::new(NameCase::Camel)),
        Box::new(CtiName::new(NameCase::Pascal)),
        Box::new(CtiName::new(NameCase::Snake)),
        Box::new(CtiName::new(NameCase::Constant)),
        Box::new(ColorTransform::new(ColorFormat::Css)),
        Box::new(ColorTransform::new(ColorFormat::Hex)),
        Box::new(ColorTransform::new(ColorFormat::Hex8)),
        Box::new(ColorTransform::new(ColorFormat::Rgb)),
        Box::new(SizeTransform::rem()),
        Box::new(SizeTransform::px()),
        Box::new(TimeSeconds),
        Box::new(ContentIcon),
    ]
}

/// Builtin transform groups: name and ordered transform names.
pub fn builtin_groups() -> Vec<(&'static str, Vec<&'static str>)> {
    let css = vec![
        "attribute/cti-custom",
        "name/cti/kebab",
        "time/seconds",
        "content/icon",
        "size/rem",
        "color/css",
    ];
    vec![
        ("scss", css.clone()),
        ("css", css),
        (
            "js",
            vec![
                "attribute/cti-custom",
                "name/cti/pascal",
                "time/seconds",
                "size/rem",
                "color/css",
            ],
        ),
    ]
}

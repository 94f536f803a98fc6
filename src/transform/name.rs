//! Name transforms: build a platform identifier from the token path.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

use crate::error::Result;
use crate::types::Token;

use super::{Transform, TransformOutput};

/// Case convention for generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCase {
    /// `color-brand-primary`
    Kebab,
    /// `colorBrandPrimary`
    Camel,
    /// `ColorBrandPrimary`
    Pascal,
    /// `color_brand_primary`
    Snake,
    /// `COLOR_BRAND_PRIMARY`
    Constant,
}

impl NameCase {
    fn apply(self, words: &str) -> String {
        match self {
            NameCase::Kebab => words.to_kebab_case(),
            NameCase::Camel => words.to_lower_camel_case(),
            NameCase::Pascal => words.to_upper_camel_case(),
            NameCase::Snake => words.to_snake_case(),
            NameCase::Constant => words.to_shouty_snake_case(),
        }
    }

    fn transform_name(self) -> &'static str {
        match self {
            NameCase::Kebab => "name/cti/kebab",
            NameCase::Camel => "name/cti/camel",
            NameCase::Pascal => "name/cti/pascal",
            NameCase::Snake => "name/cti/snake",
            NameCase::Constant => "name/cti/constant",
        }
    }
}

/// `name/cti/<case>`: the full token path in one case convention.
#[derive(Debug, Clone, Copy)]
pub struct CtiName {
    case: NameCase,
}

impl CtiName {
    pub fn new(case: NameCase) -> Self {
        Self { case }
    }
}

impl Transform for CtiName {
    fn name(&self) -> &str {
        self.case.transform_name()
    }

    fn transform(&self, token: &Token) -> Result<TransformOutput> {
        Ok(TransformOutput::Name(self.case.apply(&token.path.join(" "))))
    }
}

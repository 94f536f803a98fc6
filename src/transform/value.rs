//! Value transforms: convert token values to target-platform literals.
//!
//! Each transform matches on attributes, so an attribute transform must run
//! earlier in the chain.

use serde_json::Value;

use crate::error::{DtkError, Result};
use crate::types::{Colour, Token};

use super::{Transform, TransformOutput};

/// Output syntax for colour transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// `#rrggbb` when opaque, `rgba(...)` otherwise
    Css,
    /// `#rrggbb`
    Hex,
    /// `#rrggbbaa`
    Hex8,
    /// `rgb(...)` / `rgba(...)`
    Rgb,
}

/// `color/<format>`: rewrite hex and `rgb()`/`rgba()` colours for tokens in
/// the `color` category.
///
/// Anything else (`transparent`, `currentColor`, named colours) passes
/// through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct ColorTransform {
    format: ColorFormat,
}

impl ColorTransform {
    pub fn new(format: ColorFormat) -> Self {
        Self { format }
    }
}

impl Transform for ColorTransform {
    fn name(&self) -> &str {
        match self.format {
            ColorFormat::Css => "color/css",
            ColorFormat::Hex => "color/hex",
            ColorFormat::Hex8 => "color/hex8",
            ColorFormat::Rgb => "color/rgb",
        }
    }

    fn matches(&self, token: &Token) -> bool {
        token.category() == Some("color")
    }

    fn transform(&self, token: &Token) -> Result<TransformOutput> {
        let colour = match token.value.as_str().map(Colour::parse_css) {
            Some(Ok(colour)) => colour,
            _ => return Ok(TransformOutput::Value(token.value.clone())),
        };

        let out = match self.format {
            ColorFormat::Css => colour.to_css(),
            ColorFormat::Hex => colour.to_hex(),
            ColorFormat::Hex8 => colour.to_hex8(),
            ColorFormat::Rgb => colour.to_rgb_string(),
        };
        Ok(TransformOutput::Value(Value::String(out)))
    }
}

/// `size/<unit>`: append a unit to numeric values in the `size` category.
#[derive(Debug, Clone, Copy)]
pub struct SizeTransform {
    name: &'static str,
    unit: &'static str,
}

impl SizeTransform {
    /// `size/rem`
    pub fn rem() -> Self {
        Self {
            name: "size/rem",
            unit: "rem",
        }
    }

    /// `size/px`
    pub fn px() -> Self {
        Self {
            name: "size/px",
            unit: "px",
        }
    }
}

impl Transform for SizeTransform {
    fn name(&self) -> &str {
        self.name
    }

    fn matches(&self, token: &Token) -> bool {
        token.category() == Some("size")
    }

    fn transform(&self, token: &Token) -> Result<TransformOutput> {
        let n = numeric(self.name, token)?;
        Ok(TransformOutput::Value(Value::String(format!("{}{}", n, self.unit))))
    }
}

/// `time/seconds`: millisecond values in the `time` category to seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeconds;

impl Transform for TimeSeconds {
    fn name(&self) -> &str {
        "time/seconds"
    }

    fn matches(&self, token: &Token) -> bool {
        token.category() == Some("time")
    }

    fn transform(&self, token: &Token) -> Result<TransformOutput> {
        let ms = numeric(self.name(), token)?;
        Ok(TransformOutput::Value(Value::String(format!("{}s", ms / 1000.0))))
    }
}

/// `content/icon`: HTML hex entities (`&#xE001;`) to CSS escapes (`'\E001'`)
/// for `content` tokens of type `icon`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentIcon;

impl Transform for ContentIcon {
    fn name(&self) -> &str {
        "content/icon"
    }

    fn matches(&self, token: &Token) -> bool {
        token.category() == Some("content") && token.attributes.kind.as_deref() == Some("icon")
    }

    fn transform(&self, token: &Token) -> Result<TransformOutput> {
        match &token.value {
            Value::String(s) => Ok(TransformOutput::Value(Value::String(css_escape_entities(s)))),
            other => Ok(TransformOutput::Value(other.clone())),
        }
    }
}

fn css_escape_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("&#x") {
        let after = &rest[start + 3..];
        match after.find(';') {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str("'\\");
                out.push_str(&after[..end]);
                out.push('\'');
                rest = &after[end + 1..];
            }
            _ => break,
        }
    }

    out.push_str(rest);
    out
}

/// Read a numeric value. Strings use their leading number, so `"0.25rem"`
/// reads as `0.25` and `"150ms"` as `150`.
fn numeric(transform: &str, token: &Token) -> Result<f64> {
    let n = match &token.value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    };

    n.filter(|n| n.is_finite()).ok_or_else(|| DtkError::Transform {
        message: format!(
            "{} cannot convert '{}' (token '{}'): not a number",
            transform,
            crate::resolve::value_to_string(&token.value),
            token.dotted_path()
        ),
        help: Some("Start the value with a number, e.g. 0.5 or \"8px\"".to_string()),
    })
}

/// The longest numeric prefix of `s`, after leading whitespace.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .unwrap_or(s.len());
    (1..=end).rev().find_map(|i| s[..i].parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attributes;
    use serde_json::json;

    fn token(category: &str, kind: Option<&str>, value: Value) -> Token {
        let mut attrs = Attributes::new();
        attrs.set("category", category);
        if let Some(kind) = kind {
            attrs.set("type", kind);
        }
        Token::new(vec![category.to_string(), "x".to_string()], value).with_attributes(attrs)
    }

    fn run(transform: &dyn Transform, token: &Token) -> Result<Value> {
        assert!(transform.matches(token));
        match transform.transform(token)? {
            TransformOutput::Value(value) => Ok(value),
            other => panic!("expected value, got {:?}", other),
        }
    }

    #[test]
    fn test_color_formats() {
        let t = token("color", None, json!("#FF000080"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Css), &t).unwrap(), json!("rgba(255, 0, 0, 0.5)"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Hex), &t).unwrap(), json!("#ff0000"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Hex8), &t).unwrap(), json!("#ff000080"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Rgb), &t).unwrap(), json!("rgba(255, 0, 0, 0.5)"));

        let opaque = token("color", None, json!("#F00"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Css), &opaque).unwrap(), json!("#ff0000"));
    }

    #[test]
    fn test_color_converts_functional_notation() {
        let t = token("color", None, json!("rgba(255, 0, 0, 1)"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Css), &t).unwrap(), json!("#ff0000"));

        let translucent = token("color", None, json!("rgb(0 0 0 / 50%)"));
        assert_eq!(
            run(&ColorTransform::new(ColorFormat::Hex8), &translucent).unwrap(),
            json!("#00000080")
        );
    }

    #[test]
    fn test_color_passes_through_non_hex() {
        let t = token("color", None, json!("transparent"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Hex), &t).unwrap(), json!("transparent"));

        let word = token("color", None, json!("cafe"));
        assert_eq!(run(&ColorTransform::new(ColorFormat::Hex), &word).unwrap(), json!("cafe"));
    }

    #[test]
    fn test_color_does_not_match_other_categories() {
        let t = token("size", None, json!("#fff"));
        assert!(!ColorTransform::new(ColorFormat::Css).matches(&t));
    }

    #[test]
    fn test_size_units() {
        let t = token("size", None, json!(1.5));
        assert_eq!(run(&SizeTransform::rem(), &t).unwrap(), json!("1.5rem"));
        assert_eq!(run(&SizeTransform::px(), &t).unwrap(), json!("1.5px"));

        let whole = token("size", None, json!(16));
        assert_eq!(run(&SizeTransform::px(), &whole).unwrap(), json!("16px"));

        let text = token("size", None, json!("2"));
        assert_eq!(run(&SizeTransform::rem(), &text).unwrap(), json!("2rem"));
    }

    #[test]
    fn test_size_reads_leading_number() {
        let rem = token("size", None, json!("0.25rem"));
        assert_eq!(run(&SizeTransform::rem(), &rem).unwrap(), json!("0.25rem"));

        let px = token("size", None, json!(" 16px"));
        assert_eq!(run(&SizeTransform::rem(), &px).unwrap(), json!("16rem"));

        let exponent = token("size", None, json!("1e1em"));
        assert_eq!(run(&SizeTransform::px(), &exponent).unwrap(), json!("10px"));
    }

    #[test]
    fn test_size_rejects_non_numeric() {
        let t = token("size", None, json!("large"));
        let err = run(&SizeTransform::rem(), &t).unwrap_err();
        assert!(err.to_string().contains("size/rem"));

        let bool_value = token("size", None, json!(true));
        assert!(run(&SizeTransform::rem(), &bool_value).is_err());
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("150ms"), Some(150.0));
        assert_eq!(leading_number("-.5rem"), Some(-0.5));
        assert_eq!(leading_number("2e"), Some(2.0));
        assert_eq!(leading_number("em"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_time_seconds() {
        let t = token("time", None, json!(200));
        assert_eq!(run(&TimeSeconds, &t).unwrap(), json!("0.2s"));

        let whole = token("time", None, json!(1000));
        assert_eq!(run(&TimeSeconds, &whole).unwrap(), json!("1s"));

        let with_unit = token("time", None, json!("150ms"));
        assert_eq!(run(&TimeSeconds, &with_unit).unwrap(), json!("0.15s"));
    }

    #[test]
    fn test_content_icon() {
        let t = token("content", Some("icon"), json!("&#xE001;"));
        assert_eq!(run(&ContentIcon, &t).unwrap(), json!("'\\E001'"));

        let pair = token("content", Some("icon"), json!("&#xE001;&#xE002;"));
        assert_eq!(run(&ContentIcon, &pair).unwrap(), json!("'\\E001''\\E002'"));
    }

    #[test]
    fn test_content_icon_requires_icon_type() {
        let t = token("content", Some("text"), json!("&#xE001;"));
        assert!(!ContentIcon.matches(&t));
    }

    #[test]
    fn test_css_escape_leaves_malformed_entities() {
        assert_eq!(css_escape_entities("&#x;"), "&#x;");
        assert_eq!(css_escape_entities("&#xE001"), "&#xE001");
        assert_eq!(css_escape_entities("plain"), "plain");
    }
}

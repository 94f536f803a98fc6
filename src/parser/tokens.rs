//! YAML token file parser.
//!
//! A token file is a nested YAML mapping. Any mapping carrying a `value` key
//! is a token; every other mapping is a group. Scalars and sequences that sit
//! directly inside a group are ignored.
//!
//! ```yaml
//! color:
//!   brand:
//!     primary:
//!       value: "#ff0000"
//!       comment: Brand red
//! ```

use std::path::Path;

use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::{DtkError, Result};
use crate::types::{Attributes, Token, TokenGroup, TokenNode};

/// Key marking a mapping as a token.
pub const VALUE_KEY: &str = "value";

/// Parse a token file into a tree.
///
/// `file` is recorded on every token and used in error messages.
pub fn parse_token_file(source: &str, file: Option<&Path>) -> Result<TokenGroup> {
    let parsed: YamlValue = serde_yaml::from_str(source).map_err(|e| DtkError::Parse {
        message: format!("{}Invalid YAML: {}", location(file), e),
        help: None,
    })?;

    match parsed {
        YamlValue::Mapping(map) => parse_group(&map, &mut Vec::new(), file),
        YamlValue::Null => Ok(TokenGroup::new()),
        _ => Err(DtkError::Parse {
            message: format!("{}Token file must be a YAML mapping", location(file)),
            help: Some("Nest tokens under keys, e.g. color: { red: { value: \"#f00\" } }".to_string()),
        }),
    }
}

fn parse_group(map: &Mapping, path: &mut Vec<String>, file: Option<&Path>) -> Result<TokenGroup> {
    let mut group = TokenGroup::new();

    for (key, child) in map {
        let key = key_to_string(key).ok_or_else(|| DtkError::Parse {
            message: format!(
                "{}Unsupported key under '{}': keys must be strings or numbers",
                location(file),
                path.join(".")
            ),
            help: None,
        })?;

        let YamlValue::Mapping(child) = child else {
            continue;
        };

        path.push(key.clone());
        let node = if child.contains_key(VALUE_KEY) {
            TokenNode::Token(parse_token(path.clone(), child, file)?)
        } else {
            TokenNode::Group(parse_group(child, path, file)?)
        };
        path.pop();

        group.insert(key, node);
    }

    Ok(group)
}

fn parse_token(path: Vec<String>, map: &Mapping, file: Option<&Path>) -> Result<Token> {
    let dotted = path.join(".");
    let err = |message: String| DtkError::Parse {
        message: format!("{}Token '{}': {}", location(file), dotted, message),
        help: None,
    };

    let raw = map.get(VALUE_KEY).unwrap_or(&YamlValue::Null);
    let value = serde_json::to_value(raw).map_err(|e| err(format!("unsupported value: {}", e)))?;

    let mut token = Token::new(path, value);
    token.file_path = file.map(Path::to_path_buf);

    match map.get("comment") {
        None | Some(YamlValue::Null) => {}
        Some(YamlValue::String(comment)) => token.comment = Some(comment.clone()),
        Some(_) => return Err(err("'comment' must be a string".to_string())),
    }

    match map.get("type") {
        None | Some(YamlValue::Null) => {}
        Some(YamlValue::String(kind)) => token.token_type = Some(kind.clone()),
        Some(_) => return Err(err("'type' must be a string".to_string())),
    }

    match map.get("attributes") {
        None | Some(YamlValue::Null) => {}
        Some(YamlValue::Mapping(attrs)) => {
            let mut attributes = Attributes::new();
            for (key, value) in attrs {
                let key = key_to_string(key)
                    .ok_or_else(|| err("attribute keys must be strings".to_string()))?;
                let value = scalar_to_string(value).ok_or_else(|| {
                    err(format!("attribute '{}' must be a scalar", key))
                })?;
                attributes.set(&key, value);
            }
            token.attributes = attributes;
        }
        Some(_) => return Err(err("'attributes' must be a mapping".to_string())),
    }

    Ok(token)
}

fn key_to_string(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn location(file: Option<&Path>) -> String {
    file.map(|f| format!("{}: ", f.display())).unwrap_or_default()
}

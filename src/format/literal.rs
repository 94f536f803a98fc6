//! Structural JavaScript/TypeScript literal emission.
//!
//! Nested formats build a small literal tree and print it, so a leaf is
//! either a JSON value or a bare TypeScript type name. A string value that
//! happens to read `"number"` is still printed quoted.

use serde_json::Value;

use crate::types::TokenNode;

/// A printable object-literal or type-literal node.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A JSON scalar, printed as JSON.
    Json(Value),
    /// A bare TypeScript type, printed unquoted.
    Type(String),
    Array(Vec<Literal>),
    /// Ordered `"key": value` entries.
    Object(Vec<(String, Literal)>),
}

impl Literal {
    /// Convert a JSON value, keeping object key order.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Literal::Array(items.iter().map(Literal::from_value).collect()),
            Value::Object(map) => Literal::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Literal::from_value(v)))
                    .collect(),
            ),
            scalar => Literal::Json(scalar.clone()),
        }
    }

    /// The value tree of a node: leaves become their values.
    pub fn values(node: &TokenNode) -> Self {
        match node {
            TokenNode::Token(token) => Literal::from_value(&token.value),
            TokenNode::Group(group) => Literal::Object(
                group
                    .iter()
                    .map(|(key, child)| (key.to_string(), Literal::values(child)))
                    .collect(),
            ),
        }
    }

    /// The type tree of a node: leaves become their TypeScript types.
    pub fn types(node: &TokenNode) -> Self {
        match node {
            TokenNode::Token(token) => ts_type(&token.value),
            TokenNode::Group(group) => Literal::Object(
                group
                    .iter()
                    .map(|(key, child)| (key.to_string(), Literal::types(child)))
                    .collect(),
            ),
        }
    }

    /// Convert back into a JSON value. Type names become strings.
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Json(value) => value.clone(),
            Literal::Type(name) => Value::String(name.clone()),
            Literal::Array(items) => Value::Array(items.iter().map(Literal::to_value).collect()),
            Literal::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }

    /// Print with two-space indentation, JSON style.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        match self {
            Literal::Json(value) => out.push_str(&value.to_string()),
            Literal::Type(name) => out.push_str(name),
            Literal::Array(items) if items.is_empty() => out.push_str("[]"),
            Literal::Array(items) => {
                out.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    push_indent(out, depth + 1);
                    item.render_into(out, depth + 1);
                    push_separator(out, i, items.len());
                }
                push_indent(out, depth);
                out.push(']');
            }
            Literal::Object(entries) if entries.is_empty() => out.push_str("{}"),
            Literal::Object(entries) => {
                out.push_str("{\n");
                for (i, (key, value)) in entries.iter().enumerate() {
                    push_indent(out, depth + 1);
                    out.push_str(&Value::String(key.clone()).to_string());
                    out.push_str(": ");
                    value.render_into(out, depth + 1);
                    push_separator(out, i, entries.len());
                }
                push_indent(out, depth);
                out.push('}');
            }
        }
    }
}

/// TypeScript type of a JSON value. Objects get a structural type literal.
pub fn ts_type(value: &Value) -> Literal {
    match value {
        Value::String(_) => Literal::Type("string".to_string()),
        Value::Number(_) => Literal::Type("number".to_string()),
        Value::Bool(_) => Literal::Type("boolean".to_string()),
        Value::Null => Literal::Type("null".to_string()),
        Value::Array(_) => Literal::Type("unknown[]".to_string()),
        Value::Object(map) => {
            Literal::Object(map.iter().map(|(k, v)| (k.clone(), ts_type(v))).collect())
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn push_separator(out: &mut String, index: usize, len: usize) {
    if index + 1 < len {
        out.push(',');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_token_file;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_render_scalars() {
        assert_eq!(Literal::Json(json!("a\"b")).render(), r#""a\"b""#);
        assert_eq!(Literal::Json(json!(1.5)).render(), "1.5");
        assert_eq!(Literal::Type("string".into()).render(), "string");
    }

    #[test]
    fn test_render_nested_object() {
        let literal = Literal::from_value(&json!({"brand": {"primary": "#ff0000", "list": [1, 2]}, "empty": {}}));
        let expected = r##"{
  "brand": {
    "primary": "#ff0000",
    "list": [
      1,
      2
    ]
  },
  "empty": {}
}"##;
        assert_eq!(literal.render(), expected);
    }

    #[test]
    fn test_type_names_are_bare_but_type_like_strings_stay_quoted() {
        let tree = parse_token_file(
            r#"
font:
  weight: { value: 400 }
  family: { value: "number" }
"#,
            None,
        )
        .unwrap();
        let font = tree.get("font").unwrap();

        assert_eq!(
            Literal::types(font).render(),
            "{\n  \"weight\": number,\n  \"family\": string\n}"
        );
        assert_eq!(
            Literal::values(font).render(),
            "{\n  \"weight\": 400,\n  \"family\": \"number\"\n}"
        );
    }

    #[test]
    fn test_ts_type_of_structured_values() {
        assert_eq!(
            ts_type(&json!({"x": 1, "color": "#000", "tags": ["a"]})).render(),
            "{\n  \"x\": number,\n  \"color\": string,\n  \"tags\": unknown[]\n}"
        );
        assert_eq!(ts_type(&json!(true)).render(), "boolean");
        assert_eq!(ts_type(&json!(null)).render(), "null");
    }

    #[test]
    fn test_values_reflatten_to_original_tokens() {
        let tree = parse_token_file(
            r##"
color:
  brand:
    primary: { value: "#ff0000" }
    muted: { value: "#999" }
size:
  small: { value: 4 }
shadow:
  card: { value: { y: 2, blur: 4 } }
"##,
            None,
        )
        .unwrap();

        let nested = Literal::values(&TokenNode::Group(tree.clone())).to_value();

        for token in tree.tokens() {
            let mut cursor = &nested;
            for segment in &token.path {
                cursor = &cursor[segment.as_str()];
            }
            assert_eq!(cursor, &token.value, "mismatch at {}", token.dotted_path());
        }
    }
}

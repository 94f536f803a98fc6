//! Registry of named transforms, transform groups and formats.
//!
//! There is no global registration: a `Registry` value is built and handed
//! to the build orchestrator. Most callers want the builtins:
//!
//! ```ignore
//! use dtk::registry::Registry;
//!
//! let mut registry = Registry::with_builtins();
//! registry.register_transform(MyTransform);
//! let chain = registry.resolve_chain(Some("js"), &[])?;
//! ```

use indexmap::IndexMap;

use crate::error::{DtkError, Result};
use crate::format::{builtin_formats, Format};
use crate::transform::{builtin_groups, builtin_transforms, Transform};

/// Named transforms, groups and formats, in registration order.
#[derive(Default)]
pub struct Registry {
    transforms: IndexMap<String, Box<dyn Transform>>,
    groups: IndexMap<String, Vec<String>>,
    formats: IndexMap<String, Box<dyn Format>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("transforms", &self.transforms.keys().collect::<Vec<_>>())
            .field("groups", &self.groups)
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every builtin transform, group and format.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for transform in builtin_transforms() {
            registry.register_boxed_transform(transform);
        }
        for (name, members) in builtin_groups() {
            registry.register_group(name, members);
        }
        for format in builtin_formats() {
            registry.register_boxed_format(format);
        }
        registry
    }

    /// Register a transform. A transform with the same name is replaced.
    pub fn register_transform(&mut self, transform: impl Transform + 'static) -> &mut Self {
        self.register_boxed_transform(Box::new(transform))
    }

    pub fn register_boxed_transform(&mut self, transform: Box<dyn Transform>) -> &mut Self {
        self.transforms.insert(transform.name().to_string(), transform);
        self
    }

    /// Register a named group of transforms. Members are checked when a
    /// chain is resolved, not here.
    pub fn register_group<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.groups
            .insert(name.into(), members.into_iter().map(Into::into).collect());
        self
    }

    /// Register a format. A format with the same name is replaced.
    pub fn register_format(&mut self, format: impl Format + 'static) -> &mut Self {
        self.register_boxed_format(Box::new(format))
    }

    pub fn register_boxed_format(&mut self, format: Box<dyn Format>) -> &mut Self {
        self.formats.insert(format.name().to_string(), format);
        self
    }

    /// Get a transform by name.
    pub fn transform(&self, name: &str) -> Option<&dyn Transform> {
        self.transforms.get(name).map(|t| t.as_ref())
    }

    /// Get a group's member names.
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(|g| g.as_slice())
    }

    /// Get a format by name.
    pub fn format(&self, name: &str) -> Option<&dyn Format> {
        self.formats.get(name).map(|f| f.as_ref())
    }

    /// Look up a format, failing with a config error naming the known ones.
    pub fn require_format(&self, name: &str) -> Result<&dyn Format> {
        self.format(name).ok_or_else(|| DtkError::Config {
            message: format!("Unknown format '{}'", name),
            help: Some(format!("Known formats: {}", join(self.format_names()))),
        })
    }

    /// The transform chain of a platform: the group's members followed by
    /// the explicit transforms.
    pub fn resolve_chain(
        &self,
        group: Option<&str>,
        transforms: &[String],
    ) -> Result<Vec<&dyn Transform>> {
        let mut names: Vec<&str> = Vec::new();

        if let Some(group) = group {
            let members = self.group(group).ok_or_else(|| DtkError::Config {
                message: format!("Unknown transform group '{}'", group),
                help: Some(format!("Known groups: {}", join(self.group_names()))),
            })?;
            names.extend(members.iter().map(String::as_str));
        }
        names.extend(transforms.iter().map(String::as_str));

        names
            .into_iter()
            .map(|name| {
                self.transform(name).ok_or_else(|| DtkError::Config {
                    message: format!("Unknown transform '{}'", name),
                    help: Some(format!("Known transforms: {}", join(self.transform_names()))),
                })
            })
            .collect()
    }

    pub fn transform_names(&self) -> impl Iterator<Item = &str> {
        self.transforms.keys().map(|s| s.as_str())
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(|s| s.as_str())
    }

    pub fn format_names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(|s| s.as_str())
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatContext;
    use crate::transform::TransformOutput;
    use crate::types::Token;

    struct Shout;

    impl Transform for Shout {
        fn name(&self) -> &str {
            "name/shout"
        }

        fn transform(&self, token: &Token) -> Result<TransformOutput> {
            Ok(TransformOutput::Name(token.name.to_uppercase()))
        }
    }

    struct Count;

    impl Format for Count {
        fn name(&self) -> &str {
            "text/count"
        }

        fn format(&self, ctx: &FormatContext<'_>) -> Result<String> {
            Ok(format!("{}\n", ctx.dictionary.len()))
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert_eq!(registry.transform_names().count(), 0);
        assert!(registry.format("scss/variables").is_none());
    }

    #[test]
    fn test_builtins_registered() {
        let registry = Registry::with_builtins();
        assert!(registry.transform("attribute/cti-custom").is_some());
        assert!(registry.transform("color/hex8").is_some());
        assert!(registry.format("typescript/esm-declarations").is_some());
        assert_eq!(registry.group_names().collect::<Vec<_>>(), vec!["scss", "css", "js"]);
    }

    #[test]
    fn test_resolve_chain_group_then_explicit() {
        let mut registry = Registry::with_builtins();
        registry.register_transform(Shout);

        let chain = registry
            .resolve_chain(Some("js"), &["name/shout".to_string()])
            .unwrap();
        let names: Vec<&str> = chain.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "attribute/cti-custom",
                "name/cti/pascal",
                "time/seconds",
                "size/rem",
                "color/css",
                "name/shout"
            ]
        );
    }

    #[test]
    fn test_resolve_chain_without_group() {
        let registry = Registry::with_builtins();
        let chain = registry
            .resolve_chain(None, &["attribute/cti".to_string()])
            .unwrap();
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_unknown_group_is_config_error() {
        let registry = Registry::with_builtins();
        let Err(err) = registry.resolve_chain(Some("android"), &[]) else {
            panic!("unknown group resolved");
        };
        assert!(matches!(err, DtkError::Config { .. }));
        assert!(err.to_string().contains("android"));
    }

    #[test]
    fn test_unknown_transform_in_group() {
        let mut registry = Registry::with_builtins();
        registry.register_group("broken", ["attribute/cti", "color/nope"]);
        let Err(err) = registry.resolve_chain(Some("broken"), &[]) else {
            panic!("group with an unknown member resolved");
        };
        assert!(err.to_string().contains("color/nope"));
    }

    #[test]
    fn test_custom_format_replaces_by_name() {
        let mut registry = Registry::new();
        registry.register_format(Count);
        assert!(registry.require_format("text/count").is_ok());
        assert!(registry.require_format("text/other").is_err());
    }
}

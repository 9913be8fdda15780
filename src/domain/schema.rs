//! Parameter group schemas
//!
//! A schema is an explicit, ordered description of a parameter group: one
//! [`ParamSpec`] per option, each with a public name, a typed default and a
//! short-form flag.

use super::value::{ParamKind, ParamValue};
use crate::error::SchemaError;

/// Leading character of a declared name that requests a one-letter alias.
pub const SHORT_FORM_MARKER: char = '_';

/// One option of a parameter group.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    default: ParamValue,
    short: bool,
    help: Option<String>,
}

impl ParamSpec {
    /// Create a long-only option named exactly `name`.
    pub fn new(name: impl Into<String>, default: impl Into<ParamValue>) -> Self {
        Self { name: name.into(), default: default.into(), short: false, help: None }
    }

    /// Create an option from a declared name, where a leading [`SHORT_FORM_MARKER`]
    /// is stripped and turns on the short form.
    pub fn declared(decl: &str, default: impl Into<ParamValue>) -> Self {
        match decl.strip_prefix(SHORT_FORM_MARKER) {
            Some(name) => Self::new(name, default).with_short(true),
            None => Self::new(decl, default),
        }
    }

    pub fn with_short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Public option name, never carrying the marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> &ParamValue {
        &self.default
    }

    pub fn kind(&self) -> ParamKind {
        self.default.kind()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn is_short(&self) -> bool {
        self.short
    }

    /// The one-character alias: first character of the public name.
    pub fn short_flag(&self) -> Option<char> {
        if self.short {
            self.name.chars().next()
        } else {
            None
        }
    }

    /// Name as it would be declared, with the marker re-added for short-form options.
    pub fn declared_name(&self) -> String {
        if self.short {
            format!("{SHORT_FORM_MARKER}{}", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Whether a parse-result key refers to this option, either directly or once the
    /// short-form marker is put back in front of it.
    pub fn matches_key(&self, key: &str) -> bool {
        let declared = self.declared_name();
        key == declared || format!("{SHORT_FORM_MARKER}{key}") == declared
    }
}

/// A titled, ordered set of options.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSchema {
    title: String,
    params: Vec<ParamSpec>,
}

impl GroupSchema {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), params: Vec::new() }
    }

    /// Append an option using declared-name syntax (`"_source_path"` gets `-s`).
    pub fn param(self, decl: &str, default: impl Into<ParamValue>) -> Self {
        self.push(ParamSpec::declared(decl, default))
    }

    pub fn push(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Find the option a parse-result key belongs to.
    pub fn find(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.matches_key(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Parse groups declared in TOML, one table per group:
    ///
    /// ```toml
    /// ["Logging Parameters"]
    /// _log_dir = "logs"
    /// log_every = 100
    /// ```
    ///
    /// Entries whose value is not a scalar fail with [`SchemaError::UnsupportedType`].
    pub fn from_toml_str(content: &str) -> Result<Vec<GroupSchema>, SchemaError> {
        let doc: toml::Table = toml::from_str(content)?;

        let mut groups = Vec::with_capacity(doc.len());
        for (title, body) in &doc {
            let toml::Value::Table(entries) = body else {
                return Err(SchemaError::InvalidDocument(format!(
                    "top-level key '{}' is a {}, expected a table",
                    title,
                    body.type_str()
                )));
            };

            let mut group = GroupSchema::new(title.as_str());
            for (decl, raw) in entries {
                let default = ParamValue::try_from(raw).map_err(|found| {
                    SchemaError::UnsupportedType {
                        group: title.clone(),
                        name: decl.clone(),
                        found: found.to_string(),
                    }
                })?;
                group = group.param(decl, default);
            }
            groups.push(group);
        }

        Ok(groups)
    }
}

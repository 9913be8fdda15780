//! Option registration on top of a shared `clap::Command`

use crate::domain::{GroupSchema, ParamKind, ParamSpec, ParamValue, ParseResult, ResolvedConfig};
use crate::error::SchemaError;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::collections::HashMap;
use std::ffi::OsString;

const HELP: (&str, char) = ("help", 'h');
const VERSION: (&str, char) = ("version", 'V');

/// An option as it was registered: its spec, owning group and default mode.
#[derive(Debug, Clone)]
pub struct RegisteredParam {
    spec: ParamSpec,
    group: String,
    fill_none: bool,
}

impl RegisteredParam {
    pub fn spec(&self) -> &ParamSpec {
        &self.spec
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Whether the option defaults to "not supplied" instead of its declared default.
    pub fn fill_none(&self) -> bool {
        self.fill_none
    }

    fn read(&self, matches: &ArgMatches) -> Option<ParamValue> {
        let name = self.spec.name();
        let supplied = match self.spec.kind() {
            ParamKind::Bool => matches.get_flag(name).then_some(ParamValue::Bool(true)),
            ParamKind::Int => matches.get_one::<i64>(name).copied().map(ParamValue::Int),
            ParamKind::Float => matches.get_one::<f64>(name).copied().map(ParamValue::Float),
            ParamKind::Str => matches.get_one::<String>(name).cloned().map(ParamValue::Str),
        };
        supplied.or_else(|| (!self.fill_none).then(|| self.spec.default().clone()))
    }
}

/// The shared argument-parsing context every parameter group registers into.
pub struct ArgRegistry {
    command: Command,
    params: Vec<RegisteredParam>,
    groups: Vec<String>,
}

impl ArgRegistry {
    /// Wrap a base command. Options already defined on it count as taken names.
    pub fn new(command: Command) -> Self {
        Self { command: command.args_override_self(true), params: Vec::new(), groups: Vec::new() }
    }

    /// Add one option per schema entry, shown under the group's title.
    ///
    /// With `fill_none`, options that are not passed parse as "not supplied" instead
    /// of their declared default. A rejected group leaves the registry unchanged.
    pub fn register(&mut self, schema: &GroupSchema, fill_none: bool) -> Result<(), SchemaError> {
        self.validate(schema)?;

        let args: Vec<Arg> =
            schema.params().iter().map(|spec| build_arg(spec, schema.title(), fill_none)).collect();
        let command = std::mem::take(&mut self.command);
        self.command = command.args(args);

        self.params.extend(schema.params().iter().map(|spec| RegisteredParam {
            spec: spec.clone(),
            group: schema.title().to_string(),
            fill_none,
        }));
        self.groups.push(schema.title().to_string());

        tracing::debug!(
            group = schema.title(),
            options = schema.params().len(),
            fill_none,
            "Registered parameter group"
        );
        Ok(())
    }

    fn validate(&self, schema: &GroupSchema) -> Result<(), SchemaError> {
        let title = schema.title();
        if self.groups.iter().any(|g| g == title) {
            return Err(SchemaError::DuplicateGroup { title: title.to_string() });
        }

        let mut longs: HashMap<String, String> = HashMap::new();
        let mut shorts: HashMap<char, String> = HashMap::new();
        for arg in self.command.get_arguments() {
            let id = arg.get_id().as_str().to_string();
            if let Some(long) = arg.get_long() {
                longs.insert(long.to_string(), self.command.get_name().to_string());
            }
            longs.insert(id.clone(), self.command.get_name().to_string());
            if let Some(short) = arg.get_short() {
                shorts.insert(short, id);
            }
        }
        for param in &self.params {
            longs.insert(param.spec.name().to_string(), param.group.clone());
        }

        // clap only generates --version when the command carries a version.
        let mut reserved = vec![HELP];
        if self.command.get_version().is_some() || self.command.get_long_version().is_some() {
            reserved.push(VERSION);
        }

        for spec in schema.params() {
            let name = spec.name();
            if !is_valid_name(name) {
                return Err(SchemaError::InvalidName {
                    group: title.to_string(),
                    name: spec.declared_name(),
                });
            }
            if reserved.iter().any(|(long, _)| *long == name) {
                return Err(SchemaError::Reserved { name: name.to_string() });
            }
            if let Some(existing) = longs.get(name) {
                return Err(SchemaError::DuplicateOption {
                    name: name.to_string(),
                    group: title.to_string(),
                    existing: existing.clone(),
                });
            }
            longs.insert(name.to_string(), title.to_string());

            if let Some(short) = spec.short_flag() {
                if reserved.iter().any(|(_, s)| *s == short) {
                    return Err(SchemaError::Reserved { name: format!("{name} (-{short})") });
                }
                if let Some(existing) = shorts.get(&short) {
                    return Err(SchemaError::DuplicateShort {
                        short,
                        name: name.to_string(),
                        existing: existing.clone(),
                    });
                }
                shorts.insert(short, name.to_string());
            }
        }

        Ok(())
    }

    /// Parse arguments (first item is the program name), exiting with clap's usage
    /// message on invalid input.
    pub fn parse_from<I, T>(&self, args: I) -> ParseResult
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().get_matches_from(args);
        self.collect(&matches)
    }

    /// Parse arguments (first item is the program name), returning clap's error.
    pub fn try_parse_from<I, T>(&self, args: I) -> Result<ParseResult, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(args)?;
        Ok(self.collect(&matches))
    }

    fn collect(&self, matches: &ArgMatches) -> ParseResult {
        self.params.iter().map(|p| (p.spec.name().to_string(), p.read(matches))).collect()
    }

    /// Declared defaults of every registered option, regardless of `fill_none`.
    pub fn defaults(&self) -> ResolvedConfig {
        self.params.iter().map(|p| (p.spec.name().to_string(), p.spec.default().clone())).collect()
    }

    pub fn params(&self) -> &[RegisteredParam] {
        &self.params
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn build_arg(spec: &ParamSpec, heading: &str, fill_none: bool) -> Arg {
    let mut arg = Arg::new(spec.name().to_string())
        .long(spec.name().to_string())
        .help_heading(heading.to_string());
    if let Some(short) = spec.short_flag() {
        arg = arg.short(short);
    }

    let mut help = spec.help().unwrap_or_default().to_string();
    if !fill_none && spec.kind() != ParamKind::Bool {
        if !help.is_empty() {
            help.push(' ');
        }
        help.push_str(&format!("[default: {}]", spec.default().to_literal()));
    }
    if !help.is_empty() {
        arg = arg.help(help);
    }

    match spec.kind() {
        ParamKind::Bool => arg.action(ArgAction::SetTrue),
        ParamKind::Int => arg
            .action(ArgAction::Set)
            .value_name("INT")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64)),
        ParamKind::Float => arg
            .action(ArgAction::Set)
            .value_name("FLOAT")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64)),
        ParamKind::Str => arg.action(ArgAction::Set).value_name("STR").value_parser(value_parser!(String)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loading() -> GroupSchema {
        GroupSchema::new("Loading Parameters")
            .param("sh_degree", 3)
            .param("_source_path", "")
            .param("_model_path", "")
            .param("_resolution", -1)
            .param("_white_background", false)
            .param("eval", false)
    }

    fn optimization() -> GroupSchema {
        GroupSchema::new("Optimization Parameters")
            .param("iterations", 30_000)
            .param("feature_lr", 0.0025)
            .param("random_background", false)
    }

    fn registry(fill_none: bool) -> ArgRegistry {
        let mut registry = ArgRegistry::new(Command::new("train"));
        registry.register(&loading(), fill_none).expect("loading");
        registry.register(&optimization(), false).expect("optimization");
        registry
    }

    #[test]
    fn boolean_flags_default_to_declared_value() {
        let parsed = registry(false).try_parse_from(["train"]).expect("parse");
        assert_eq!(parsed.get("eval"), Some(&ParamValue::Bool(false)));
        assert_eq!(parsed.get("white_background"), Some(&ParamValue::Bool(false)));
    }

    #[test]
    fn boolean_flags_become_true_when_present() {
        let parsed = registry(false).try_parse_from(["train", "--eval", "-w"]).expect("parse");
        assert_eq!(parsed.get("eval"), Some(&ParamValue::Bool(true)));
        assert_eq!(parsed.get("white_background"), Some(&ParamValue::Bool(true)));
    }

    #[test]
    fn boolean_flags_never_take_a_value() {
        let err = registry(false).try_parse_from(["train", "--eval", "true"]).expect_err("value");
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);

        assert!(registry(false).try_parse_from(["train", "--eval=true"]).is_err());
    }

    #[test]
    fn value_options_use_the_declared_type() {
        let parsed = registry(false)
            .try_parse_from(["train", "--iterations", "7000", "--feature_lr", "0.01", "-s", "data"])
            .expect("parse");
        assert_eq!(parsed.get("iterations"), Some(&ParamValue::Int(7000)));
        assert_eq!(parsed.get("feature_lr"), Some(&ParamValue::Float(0.01)));
        assert_eq!(parsed.get("source_path"), Some(&ParamValue::from("data")));
    }

    #[test]
    fn float_option_rejects_non_numeric_input() {
        let err = registry(false)
            .try_parse_from(["train", "--feature_lr", "abc"])
            .expect_err("not a float");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn int_option_rejects_fractional_input() {
        let err = registry(false)
            .try_parse_from(["train", "--iterations", "1.5"])
            .expect_err("not an int");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn negative_numbers_are_values() {
        let parsed = registry(false).try_parse_from(["train", "-r", "-2"]).expect("parse");
        assert_eq!(parsed.get("resolution"), Some(&ParamValue::Int(-2)));
    }

    #[test]
    fn short_forms_use_first_character_without_marker() {
        let registry = registry(false);
        let source = registry
            .command()
            .get_arguments()
            .find(|a| a.get_id() == "source_path")
            .expect("source_path registered");
        assert_eq!(source.get_long(), Some("source_path"));
        assert_eq!(source.get_short(), Some('s'));

        let sh_degree = registry
            .command()
            .get_arguments()
            .find(|a| a.get_id() == "sh_degree")
            .expect("sh_degree registered");
        assert_eq!(sh_degree.get_short(), None);
        assert!(registry.command().get_arguments().all(|a| a.get_long() != Some("_source_path")));
    }

    #[test]
    fn fill_none_marks_unsupplied_options() {
        let parsed = registry(true).try_parse_from(["train", "-m", "out"]).expect("parse");
        assert_eq!(parsed.entry("sh_degree"), Some(None));
        assert_eq!(parsed.entry("eval"), Some(None));
        assert_eq!(parsed.get("model_path"), Some(&ParamValue::from("out")));
        // Groups registered without fill_none keep their defaults.
        assert_eq!(parsed.get("iterations"), Some(&ParamValue::Int(30_000)));
    }

    #[test]
    fn repeated_option_keeps_last_value() {
        let parsed = registry(false)
            .try_parse_from(["train", "--iterations", "1", "--iterations", "2"])
            .expect("parse");
        assert_eq!(parsed.get("iterations"), Some(&ParamValue::Int(2)));
    }

    #[test]
    fn duplicate_names_across_groups_are_rejected() {
        let mut registry = registry(false);
        let clash = GroupSchema::new("Pipeline Parameters").param("eval", true);
        let err = registry.register(&clash, false).expect_err("duplicate");
        assert!(matches!(err, SchemaError::DuplicateOption { ref existing, .. } if existing == "Loading Parameters"));
        assert_eq!(registry.groups().len(), 2);
    }

    #[test]
    fn duplicate_short_forms_are_rejected() {
        let mut registry = registry(false);
        let clash = GroupSchema::new("Other").param("_scale", 1.0);
        let err = registry.register(&clash, false).expect_err("duplicate short");
        assert!(matches!(err, SchemaError::DuplicateShort { short: 's', .. }));
    }

    #[test]
    fn rejected_group_leaves_registry_untouched() {
        let mut registry = registry(false);
        let before = registry.params().len();
        let bad = GroupSchema::new("Bad").param("fresh", 1).param("iterations", 5);
        assert!(registry.register(&bad, false).is_err());
        assert_eq!(registry.params().len(), before);
        assert!(registry.command().get_arguments().all(|a| a.get_id() != "fresh"));
    }

    #[test]
    fn reserved_and_invalid_names_are_rejected() {
        let mut registry = ArgRegistry::new(Command::new("t"));
        let err = registry.register(&GroupSchema::new("A").param("help", false), false);
        assert!(matches!(err, Err(SchemaError::Reserved { .. })));

        let err = registry.register(&GroupSchema::new("B").param("_half", 0.5), false);
        assert!(matches!(err, Err(SchemaError::Reserved { .. })));

        let err = registry.register(&GroupSchema::new("C").param("_", 1), false);
        assert!(matches!(err, Err(SchemaError::InvalidName { .. })));

        let err = registry.register(&GroupSchema::new("D").param("two words", 1), false);
        assert!(matches!(err, Err(SchemaError::InvalidName { .. })));
    }

    #[test]
    fn version_is_free_unless_the_command_has_one() {
        let mut registry = ArgRegistry::new(Command::new("t"));
        registry
            .register(&GroupSchema::new("A").param("version", 2).param("_Vmax", 1.0), false)
            .expect("no version on the command");
        let parsed =
            registry.try_parse_from(["t", "--version", "3", "-V", "0.5"]).expect("parse");
        assert_eq!(parsed.get("version"), Some(&ParamValue::Int(3)));
        assert_eq!(parsed.get("Vmax"), Some(&ParamValue::Float(0.5)));

        let mut versioned = ArgRegistry::new(Command::new("t").version("1.0"));
        let err = versioned.register(&GroupSchema::new("A").param("version", 2), false);
        assert!(matches!(err, Err(SchemaError::Reserved { .. })));
        let err = versioned.register(&GroupSchema::new("B").param("_Vmax", 1.0), false);
        assert!(matches!(err, Err(SchemaError::Reserved { .. })));
    }

    #[test]
    fn duplicate_group_titles_are_rejected() {
        let mut registry = registry(false);
        let err = registry.register(&GroupSchema::new("Loading Parameters"), false);
        assert!(matches!(err, Err(SchemaError::DuplicateGroup { .. })));
    }

    #[test]
    fn base_command_options_count_as_taken() {
        let base = Command::new("render").arg(Arg::new("quiet").long("quiet").short('q'));
        let mut registry = ArgRegistry::new(base);
        let err = registry.register(&GroupSchema::new("A").param("quiet", false), false);
        assert!(matches!(err, Err(SchemaError::DuplicateOption { .. })));
        let err = registry.register(&GroupSchema::new("B").param("_quality", 1), false);
        assert!(matches!(err, Err(SchemaError::DuplicateShort { short: 'q', .. })));
    }

    #[test]
    fn help_groups_options_under_titles() {
        let help = registry(false).command().clone().render_help().to_string();
        assert!(help.contains("Loading Parameters"));
        assert!(help.contains("Optimization Parameters"));
        assert!(help.contains("--source_path"));
        assert!(help.contains("[default: 30000]"));
    }

    #[test]
    fn defaults_cover_every_registered_option() {
        let defaults = registry(true).defaults();
        assert_eq!(defaults.get("sh_degree"), Some(&ParamValue::Int(3)));
        assert_eq!(defaults.get("iterations"), Some(&ParamValue::Int(30_000)));
        assert_eq!(defaults.len(), 9);
    }
}

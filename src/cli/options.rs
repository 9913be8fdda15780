//! Options command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::utils::load_group_files;
use super::{render, train, GlobalArgs, OutputFormat};
use crate::domain::{ParamKind, ParamValue};
use crate::schema::RegisteredParam;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entry {
    Train,
    Render,
}

#[derive(Args)]
pub struct OptionsArgs {
    /// Entry point whose options to list
    #[arg(value_enum, default_value_t = Entry::Train)]
    pub entry: Entry,
}

#[derive(Serialize)]
struct OptionRow<'a> {
    group: &'a str,
    long: String,
    short: Option<String>,
    kind: ParamKind,
    /// `None` when the option defaults to "not supplied".
    default: Option<&'a ParamValue>,
}

impl<'a> From<&'a RegisteredParam> for OptionRow<'a> {
    fn from(param: &'a RegisteredParam) -> Self {
        let spec = param.spec();
        Self {
            group: param.group(),
            long: format!("--{}", spec.name()),
            short: spec.short_flag().map(|c| format!("-{c}")),
            kind: spec.kind(),
            default: (!param.fill_none()).then(|| spec.default()),
        }
    }
}

pub fn run(args: OptionsArgs, globals: &GlobalArgs) -> Result<()> {
    let extra = load_group_files(&globals.group_files)?;
    let registry = match args.entry {
        Entry::Train => train::registry(&extra)?,
        Entry::Render => render::registry(&extra)?,
    };
    let rows: Vec<OptionRow<'_>> = registry.params().iter().map(OptionRow::from).collect();

    if globals.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut current_group = "";
    for row in &rows {
        if row.group != current_group {
            if !current_group.is_empty() {
                println!();
            }
            println!("{}:", row.group);
            current_group = row.group;
        }
        let default = row.default.map_or_else(|| "None".to_string(), ParamValue::to_literal);
        println!(
            "  {:<28} {:<3} {:<6} {}",
            row.long,
            row.short.as_deref().unwrap_or(""),
            row.kind,
            default
        );
    }

    Ok(())
}

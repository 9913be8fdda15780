//! Persisted configuration snapshots
//!
//! A snapshot is the textual form of an earlier run's resolved configuration.
//! Two encodings are read:
//!
//! - the keyword-constructor literal `Namespace(sh_degree=3, source_path='/data', eval=False)`
//! - a flat TOML table (`sh_degree = 3`)
//!
//! Literals are parsed, never evaluated. Only scalars are accepted; `None` entries are
//! treated as absent.

use crate::domain::{ParamValue, ResolvedConfig};
use crate::error::SnapshotError;
use rustpython_parser::ast;
use rustpython_parser::Parse;
use std::collections::{BTreeMap, HashSet};

const NAMESPACE: &str = "Namespace";
const SOURCE_NAME: &str = "cfg_args";

/// Parse snapshot text in either supported encoding.
pub fn parse_snapshot(content: &str) -> Result<ResolvedConfig, SnapshotError> {
    if content.trim_start().starts_with(NAMESPACE) {
        parse_namespace(content)
    } else {
        parse_toml(content)
    }
}

/// Parse the `Namespace(key=value, ...)` encoding.
///
/// The text must be a single call expression with keyword arguments only. Every
/// argument must be a scalar literal, optionally signed.
pub fn parse_namespace(content: &str) -> Result<ResolvedConfig, SnapshotError> {
    let leading = content.len() - content.trim_start().len();
    let expr = ast::Expr::parse(content.trim(), SOURCE_NAME).map_err(|err| {
        syntax_error(content, leading + usize::from(err.offset), err.error.to_string())
    })?;

    let ast::Expr::Call(call) = expr else {
        return Err(syntax_error(content, leading, format!("expected a {NAMESPACE}(...) call")));
    };
    if !matches!(&*call.func, ast::Expr::Name(name) if name.id.as_str() == NAMESPACE) {
        return Err(syntax_error(content, leading, format!("expected a {NAMESPACE}(...) call")));
    }
    if !call.args.is_empty() {
        return Err(syntax_error(content, leading, "positional arguments are not allowed".into()));
    }

    let mut seen = HashSet::new();
    let mut values = BTreeMap::new();
    for keyword in &call.keywords {
        let Some(arg) = &keyword.arg else {
            return Err(syntax_error(content, leading, "'**' unpacking is not allowed".into()));
        };
        let key = arg.as_str();
        if !seen.insert(key) {
            return Err(SnapshotError::DuplicateKey { key: key.to_string() });
        }
        if let Some(value) = literal(key, &keyword.value)? {
            values.insert(key.to_string(), value);
        }
    }

    Ok(values.into_iter().collect())
}

/// Parse the flat TOML encoding.
pub fn parse_toml(content: &str) -> Result<ResolvedConfig, SnapshotError> {
    let table: toml::Table = toml::from_str(content)?;
    table
        .iter()
        .map(|(key, raw)| {
            ParamValue::try_from(raw).map(|value| (key.clone(), value)).map_err(|found| {
                SnapshotError::UnsupportedValue { key: key.clone(), found: found.to_string() }
            })
        })
        .collect()
}

/// Scalar value of one keyword argument; `None` for a literal `None`.
fn literal(key: &str, expr: &ast::Expr) -> Result<Option<ParamValue>, SnapshotError> {
    match expr {
        ast::Expr::Constant(constant) => constant_value(key, &constant.value),
        ast::Expr::Name(name) => match name.id.as_str() {
            "inf" => Ok(Some(ParamValue::Float(f64::INFINITY))),
            "nan" => Ok(Some(ParamValue::Float(f64::NAN))),
            _ => Err(unsupported(key, "name")),
        },
        ast::Expr::UnaryOp(unary) => {
            let value = match (&unary.op, literal(key, &unary.operand)?) {
                (ast::UnaryOp::UAdd, Some(value @ ParamValue::Int(_)))
                | (ast::UnaryOp::UAdd, Some(value @ ParamValue::Float(_))) => value,
                (ast::UnaryOp::USub, Some(ParamValue::Int(i))) => ParamValue::Int(-i),
                (ast::UnaryOp::USub, Some(ParamValue::Float(x))) => ParamValue::Float(-x),
                _ => return Err(unsupported(key, "expression")),
            };
            Ok(Some(value))
        }
        other => Err(unsupported(key, node_kind(other))),
    }
}

fn constant_value(key: &str, constant: &ast::Constant) -> Result<Option<ParamValue>, SnapshotError> {
    let value = match constant {
        ast::Constant::None => return Ok(None),
        ast::Constant::Bool(b) => ParamValue::Bool(*b),
        ast::Constant::Str(s) => ParamValue::Str(s.clone()),
        ast::Constant::Float(x) => ParamValue::Float(*x),
        ast::Constant::Int(int) => {
            i64::try_from(int).map(ParamValue::Int).map_err(|_| unsupported(key, "big int"))?
        }
        ast::Constant::Bytes(_) => return Err(unsupported(key, "bytes")),
        ast::Constant::Tuple(_) => return Err(unsupported(key, "tuple")),
        _ => return Err(unsupported(key, "constant")),
    };
    Ok(Some(value))
}

fn node_kind(expr: &ast::Expr) -> &'static str {
    match expr {
        ast::Expr::List(_) | ast::Expr::ListComp(_) => "list",
        ast::Expr::Tuple(_) => "tuple",
        ast::Expr::Dict(_) | ast::Expr::DictComp(_) => "dict",
        ast::Expr::Set(_) | ast::Expr::SetComp(_) => "set",
        ast::Expr::Call(_) => "call",
        ast::Expr::JoinedStr(_) => "f-string",
        _ => "expression",
    }
}

fn unsupported(key: &str, found: &str) -> SnapshotError {
    SnapshotError::UnsupportedValue { key: key.to_string(), found: found.to_string() }
}

/// Syntax error at byte `offset` of `content`, with 1-based line and column.
fn syntax_error(content: &str, offset: usize, message: String) -> SnapshotError {
    let consumed = content.get(..offset).unwrap_or(content);
    let line = consumed.matches('\n').count() + 1;
    let column = consumed.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    SnapshotError::Syntax { line, column, message }
}

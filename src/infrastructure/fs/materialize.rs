//! Auxiliary file materialization
//!
//! App Engine tooling reads its descriptors under fixed names. A user may keep
//! per-environment variants (`stg-app.yaml`) and template placeholders; this
//! module copies the chosen variant into place and renders it.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use minijinja::value::{Value, ValueKind};
use minijinja::{escape_formatter, AutoEscape, Environment, Error, ErrorKind, Output, State, UndefinedBehavior};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::domain::value_objects::AuxFile;

/// Failure while putting an auxiliary file in place
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("error copying {from:?} to {to:?}: {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },

    #[error("error reading template: {0}")]
    Read(#[source] io::Error),

    #[error("error rendering template: {0}")]
    Render(#[source] minijinja::Error),

    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Put the file for `role` in place under `dir`.
///
/// With no `source` configured the directory is left as it is. Otherwise the
/// source is copied to the platform name when the names differ, then the
/// destination is rendered against `vars`. Rendering fails on any undefined
/// variable.
pub fn materialize(
    dir: &Path,
    role: AuxFile,
    source: Option<&str>,
    vars: &BTreeMap<String, serde_json::Value>,
) -> Result<(), MaterializeError> {
    let Some(source) = source else {
        return Ok(());
    };

    let platform_name = role.platform_name();
    let dest = dir.join(platform_name);

    if source != platform_name {
        copy_atomic(&dir.join(source), &dest).map_err(|e| MaterializeError::Copy {
            from: source.to_string(),
            to: platform_name.to_string(),
            source: e,
        })?;
    }

    let template = fs::read_to_string(&dest).map_err(MaterializeError::Read)?;
    let rendered = render(platform_name, &template, vars)?;
    write_atomic(&dest, rendered.as_bytes()).map_err(|e| MaterializeError::Write {
        path: dest.clone(),
        source: e,
    })
}

/// Render `template` with strict undefined handling.
///
/// References may be written `{{ Var }}` or, as in Go templates,
/// `{{ .Var }}`. Scalars print the way Go prints decoded JSON: `true`,
/// `5`, `1.5`, and `<no value>` for null.
pub fn render(
    name: &str,
    template: &str,
    vars: &BTreeMap<String, serde_json::Value>,
) -> Result<String, MaterializeError> {
    let source = strip_dot_references(template);

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_formatter(format_scalar);

    let template = env
        .template_from_named_str(name, &source)
        .map_err(MaterializeError::Render)?;
    template.render(vars).map_err(MaterializeError::Render)
}

fn format_scalar(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    let shown = match value.kind() {
        ValueKind::Bool => Some(if value.is_true() { "true" } else { "false" }.to_string()),
        ValueKind::None => Some("<no value>".to_string()),
        ValueKind::Undefined => return Err(Error::new(ErrorKind::UndefinedError, "undefined value")),
        ValueKind::Number => f64::try_from(value.clone())
            .ok()
            .filter(|n| n.fract() == 0.0 && n.abs() < 1e15)
            .map(|n| format!("{}", n as i64)),
        _ => None,
    };
    match shown {
        Some(text) => out
            .write_str(&text)
            .map_err(|_| Error::new(ErrorKind::WriteFailure, "unable to write rendered value")),
        None => escape_formatter(out, state, value),
    }
}

/// Rewrite Go-style `.Var` references inside `{{ ... }}` actions to `Var`.
fn strip_dot_references(template: &str) -> Cow<'_, str> {
    if !template.contains("{{") {
        return Cow::Borrowed(template);
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let (text, tail) = rest.split_at(start);
        out.push_str(text);
        let end = tail.find("}}").map_or(tail.len(), |i| i + 2);
        let (action, after) = tail.split_at(end);
        strip_in_action(action, &mut out);
        rest = after;
    }
    out.push_str(rest);
    Cow::Owned(out)
}

// A dot starts a field reference only after a delimiter, never after an identifier
fn strip_in_action(action: &str, out: &mut String) {
    let mut prev = '{';
    let mut chars = action.chars().peekable();
    while let Some(c) = chars.next() {
        let starts_field = c == '.'
            && (prev.is_whitespace() || matches!(prev, '{' | '-' | '(' | ',' | '|'))
            && chars.peek().is_some_and(|next| next.is_alphabetic() || *next == '_');
        if !starts_field {
            out.push(c);
        }
        prev = c;
    }
}

/// Copy `src` over `dst` through a temp file in the same directory, keeping
/// `src`'s permissions.
fn copy_atomic(src: &Path, dst: &Path) -> io::Result<()> {
    let mut input = fs::File::open(src)?;
    let permissions = input.metadata()?.permissions();

    let mut tmp = NamedTempFile::new_in(parent_dir(dst))?;
    io::copy(&mut input, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), permissions)?;
    tmp.persist(dst).map_err(|e| e.error)?;
    Ok(())
}

/// Replace `path` with `content`, keeping its permissions if it exists.
fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        fs::set_permissions(tmp.path(), permissions)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

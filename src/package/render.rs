use crate::core::{RepoError, RepoResult};
use crate::package::declaration::Declaration;
use std::fmt::Write;

/// How declarations are printed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    /// `go_repository(...)` calls, for reading rather than merging.
    Starlark,
}

impl OutputFormat {
    pub fn parse(s: &str) -> RepoResult<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            "starlark" | "bzl" => Ok(OutputFormat::Starlark),
            _ => Err(RepoError::Config(format!(
                "Invalid output format '{}'. Must be 'yaml', 'json', or 'starlark'",
                s
            ))),
        }
    }

    pub fn render(&self, declarations: &[Declaration]) -> RepoResult<String> {
        match self {
            OutputFormat::Yaml => Ok(serde_yaml::to_string(declarations)?),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(declarations)?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Starlark => Ok(render_starlark(declarations)),
        }
    }
}

fn render_starlark(declarations: &[Declaration]) -> String {
    let mut out = String::new();

    for (i, decl) in declarations.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("go_repository(\n");
        push_attr(&mut out, "name", &decl.name);
        push_attr(&mut out, "importpath", &decl.importpath);
        if let Some(replace) = &decl.replace {
            push_attr(&mut out, "replace", replace);
        }
        push_attr(&mut out, "sum", &decl.sum);
        push_attr(&mut out, "version", &decl.version);
        out.push_str(")\n");
    }

    out
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    // Debug formatting quotes and escapes the value the way Starlark expects.
    let _ = writeln!(out, "    {} = {:?},", key, value);
}

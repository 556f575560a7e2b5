//! tsconfig-style configuration.
//!
//! Reads the JSX-relevant part of a `tsconfig.json` (comments and trailing
//! commas allowed, `extends` chains followed) and turns it into the option
//! structs the checker and the emitter take.

use anyhow::{Context, Result, anyhow, bail};
use jsxi_checker::CheckerOptions;
use jsxi_common::{JsxEmit, JsxMode, ModuleKind, ScriptTarget};
use jsxi_emitter::PrinterOptions;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Accepts `true` as well as `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub jsx: Option<String>,
    #[serde(default)]
    pub jsx_factory: Option<String>,
    #[serde(default)]
    pub jsx_fragment_factory: Option<String>,
    #[serde(default)]
    pub jsx_import_source: Option<String>,
    #[serde(default)]
    pub react_namespace: Option<String>,
    /// `react` (conventional namespace) or `generic` (intrinsic factory).
    #[serde(default)]
    pub jsx_mode: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub no_implicit_any: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedCompilerOptions {
    pub printer: PrinterOptions,
    pub checker: CheckerOptions,
}

pub fn resolve_compiler_options(options: Option<&CompilerOptions>) -> Result<ResolvedCompilerOptions> {
    let mut resolved = ResolvedCompilerOptions::default();
    let Some(options) = options else {
        return Ok(resolved);
    };

    if let Some(target) = options.target.as_deref() {
        resolved.printer.target = parse_script_target(target)?;
    }

    if let Some(module) = options.module.as_deref() {
        resolved.printer.module = parse_module_kind(module)?;
    }

    if let Some(jsx) = options.jsx.as_deref() {
        let jsx = parse_jsx_emit(jsx)?;
        resolved.printer.jsx = jsx;
        resolved.checker.jsx = jsx;
    }

    if let Some(mode) = options.jsx_mode.as_deref() {
        resolved.checker.jsx_mode = JsxMode::from_config_str(mode)
            .ok_or_else(|| anyhow!("unsupported compilerOptions.jsxMode '{mode}'"))?;
    }

    resolved.checker.jsx_factory = non_empty(options.jsx_factory.as_deref());
    resolved.checker.jsx_fragment_factory = non_empty(options.jsx_fragment_factory.as_deref());
    resolved.checker.react_namespace = non_empty(options.react_namespace.as_deref());

    let import_source = non_empty(options.jsx_import_source.as_deref());
    resolved.checker.jsx_import_source = import_source.clone();
    resolved.printer.jsx_import_source = import_source;

    resolved.checker.no_implicit_any = options
        .no_implicit_any
        .or(options.strict)
        .unwrap_or(false);

    Ok(resolved)
}

/// Load `path` and resolve its options. A relative `jsxImportSource` is
/// anchored at the directory of the config file.
pub fn resolve_project_options(path: &Path) -> Result<ResolvedCompilerOptions> {
    let config = load_tsconfig(path)?;
    let mut resolved = resolve_compiler_options(config.compiler_options.as_ref())
        .with_context(|| format!("invalid compilerOptions in {}", path.display()))?;
    if let Some(dir) = path.parent() {
        resolved.printer.jsx_import_source_base = Some(dir.to_string_lossy().replace('\\', "/"));
    }
    Ok(resolved)
}

pub fn parse_tsconfig(source: &str) -> Result<TsConfig> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    let config = serde_json::from_str(&normalized).context("failed to parse tsconfig JSON")?;
    Ok(config)
}

pub fn load_tsconfig(path: &Path) -> Result<TsConfig> {
    let mut visited = HashSet::new();
    load_tsconfig_inner(path, &mut visited)
}

fn load_tsconfig_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<TsConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("tsconfig extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tsconfig: {}", path.display()))?;
    let mut config = parse_tsconfig(&source)
        .with_context(|| format!("failed to parse tsconfig: {}", path.display()))?;

    if let Some(extends_path) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends_path)?;
        let base_config = load_tsconfig_inner(&base_path, visited)?;
        config = merge_configs(base_config, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("tsconfig has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }

    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

fn merge_configs(base: TsConfig, mut child: TsConfig) -> TsConfig {
    let compiler_options = match (base.compiler_options, child.compiler_options.take()) {
        (Some(base_opts), Some(child_opts)) => Some(merge_compiler_options(base_opts, child_opts)),
        (base_opts, child_opts) => child_opts.or(base_opts),
    };
    TsConfig {
        extends: None,
        compiler_options,
    }
}

fn merge_compiler_options(base: CompilerOptions, child: CompilerOptions) -> CompilerOptions {
    CompilerOptions {
        target: child.target.or(base.target),
        module: child.module.or(base.module),
        jsx: child.jsx.or(base.jsx),
        jsx_factory: child.jsx_factory.or(base.jsx_factory),
        jsx_fragment_factory: child.jsx_fragment_factory.or(base.jsx_fragment_factory),
        jsx_import_source: child.jsx_import_source.or(base.jsx_import_source),
        react_namespace: child.react_namespace.or(base.react_namespace),
        jsx_mode: child.jsx_mode.or(base.jsx_mode),
        strict: child.strict.or(base.strict),
        no_implicit_any: child.no_implicit_any.or(base.no_implicit_any),
    }
}

fn parse_script_target(value: &str) -> Result<ScriptTarget> {
    match ScriptTarget::from_config_str(value.trim()) {
        Some(target) => Ok(target),
        None => bail!("unsupported compilerOptions.target '{}'", value),
    }
}

fn parse_module_kind(value: &str) -> Result<ModuleKind> {
    match ModuleKind::from_config_str(value.trim()) {
        Some(module) => Ok(module),
        None => bail!("unsupported compilerOptions.module '{}'", value),
    }
}

fn parse_jsx_emit(value: &str) -> Result<JsxEmit> {
    match JsxEmit::from_config_str(value.trim()) {
        Some(jsx) => Ok(jsx),
        None => bail!("unsupported compilerOptions.jsx '{}'", value),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }

        if in_block_comment {
            if ch == '*' {
                if let Some('/') = chars.peek().copied() {
                    chars.next();
                    in_block_comment = false;
                }
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }

        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }

        if ch == '/'
            && let Some(&next) = chars.peek()
        {
            if next == '/' {
                chars.next();
                in_line_comment = true;
                continue;
            }
            if next == '*' {
                chars.next();
                in_block_comment = true;
                continue;
            }
        }

        out.push(ch);
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }

        if ch == ',' {
            let next = chars.clone().find(|c| !c.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_options_accept_strings() {
        let opts: CompilerOptions = serde_json::from_str(r#"{"strict": "true"}"#).unwrap();
        assert_eq!(opts.strict, Some(true));
        let opts: CompilerOptions = serde_json::from_str(r#"{"noImplicitAny": false}"#).unwrap();
        assert_eq!(opts.no_implicit_any, Some(false));
    }

    #[test]
    fn invalid_boolean_string_is_rejected() {
        let result: Result<CompilerOptions, _> = serde_json::from_str(r#"{"strict": "sometimes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn comments_and_trailing_commas_are_tolerated() {
        let stripped = strip_jsonc("{ // c\n \"a\": \"//not a comment\", /* b */ \"c\": [1, 2,], }");
        assert_eq!(
            remove_trailing_commas(&stripped),
            "{ \n \"a\": \"//not a comment\",  \"c\": [1, 2] }"
        );
    }
}

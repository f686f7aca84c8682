//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for agents, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config file
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use serde::Serialize;
use sift_core::error::ErrorCode;
use sift_search::SearchError;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (tables, sections, visual framing).
    Pretty,
    /// Token-efficient plain text for agents and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Core resolution logic, separated from I/O for testability.
///
/// `format_flag`: explicit `--format` value if provided.
/// `json_flag`: hidden `--json` alias.
/// `format_env`: the value of `FORMAT` if set.
/// `user_output`: `output` from the user config file, if set.
/// `is_tty`: true if stdout is a TTY.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    user_output: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    // Unknown values fall through to the next source.
    if let Some(mode) = format_env.and_then(OutputMode::parse_loose) {
        return mode;
    }

    if let Some(mode) = user_output.and_then(OutputMode::parse_loose) {
        return mode;
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, user config and
/// TTY defaults.
#[must_use]
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    user_output: Option<&str>,
) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        env_val.as_deref(),
        user_output,
        is_tty,
    )
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_mode(&mut out, mode, value, text_fn, pretty_fn)
}

fn write_mode<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create an error carrying `code` and its standard hint.
    #[must_use]
    pub fn coded(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

impl From<&SearchError> for CliError {
    fn from(err: &SearchError) -> Self {
        Self::coded(err.code(), err.to_string())
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, error)
}

fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            match error.error_code {
                Some(ref code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── resolve_output_mode_inner ───────────────────────────────────────────

    #[test]
    fn resolve_format_flag_wins_over_everything() {
        let mode = resolve_output_mode_inner(
            Some(OutputMode::Text),
            true,
            Some("pretty"),
            Some("json"),
            true,
        );
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), None, true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_format_env_is_case_insensitive() {
        let mode = resolve_output_mode_inner(None, false, Some("TEXT"), None, true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_env_wins_over_user_config() {
        let mode = resolve_output_mode_inner(None, false, Some("json"), Some("pretty"), false);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_user_config_used_when_env_missing_or_unknown() {
        let mode = resolve_output_mode_inner(None, false, None, Some("json"), true);
        assert_eq!(mode, OutputMode::Json);
        let mode = resolve_output_mode_inner(None, false, Some("fancy"), Some("text"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_defaults_follow_tty() {
        assert_eq!(
            resolve_output_mode_inner(None, false, None, None, true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, Some("fancy"), Some("bogus"), false),
            OutputMode::Text
        );
    }

    // ── rendering ───────────────────────────────────────────────────────────

    #[derive(Serialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn sample() -> Sample {
        Sample {
            name: "widget".into(),
            count: 3,
        }
    }

    fn rendered(mode: OutputMode) -> String {
        let mut buf = Vec::new();
        write_mode(
            &mut buf,
            mode,
            &sample(),
            |s, w| writeln!(w, "{}  {}", s.name, s.count),
            |s, w| pretty_kv(w, "Name", &s.name),
        )
        .expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn write_mode_dispatches_per_mode() {
        assert_eq!(rendered(OutputMode::Text), "widget  3\n");
        assert!(rendered(OutputMode::Pretty).starts_with("Name:"));

        let json: serde_json::Value =
            serde_json::from_str(&rendered(OutputMode::Json)).expect("valid json");
        assert_eq!(json["name"], "widget");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn pretty_rule_has_fixed_width() {
        let mut buf = Vec::new();
        pretty_rule(&mut buf).expect("rule");
        assert_eq!(buf.len(), PRETTY_RULE_WIDTH + 1);
    }

    // ── errors ──────────────────────────────────────────────────────────────

    #[test]
    fn coded_error_carries_hint_and_code() {
        let err = CliError::coded(ErrorCode::NotInitialized, "no .sift directory");
        assert_eq!(err.error_code.as_deref(), Some("E1001"));
        assert!(err.suggestion.as_deref().is_some_and(|s| s.contains("sift init")));
    }

    #[test]
    fn search_error_converts_with_its_code() {
        let err = SearchError::InvalidMode {
            value: "foo".into(),
        };
        let cli = CliError::from(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
        assert!(cli.message.contains("foo"));
    }

    #[test]
    fn error_json_is_wrapped() {
        let mut buf = Vec::new();
        let err = CliError::coded(ErrorCode::InvalidPagination, "page 0");
        write_error(&mut buf, OutputMode::Json, &err).expect("render");
        let json: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(json["error"]["error_code"], "E2002");
        assert_eq!(json["error"]["message"], "page 0");
    }

    #[test]
    fn error_text_shows_code_and_suggestion() {
        let mut buf = Vec::new();
        let err = CliError::coded(ErrorCode::InvalidMode, "invalid search mode 'foo'");
        write_error(&mut buf, OutputMode::Text, &err).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("error[E2001]: invalid search mode 'foo'"));
        assert!(text.contains("suggestion:"));
    }

    #[test]
    fn uncoded_error_has_plain_prefix() {
        let mut buf = Vec::new();
        let err = CliError {
            message: "boom".into(),
            suggestion: None,
            error_code: None,
        };
        write_error(&mut buf, OutputMode::Pretty, &err).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "error: boom\n");
    }
}

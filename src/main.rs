//! Purpose: `routedec` CLI entry point and v0.1 command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Decode-stage failures are captured in the stdout report and the
//! process exits 0; only argument and input-file errors fail the process.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint,
    error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod render;

use render::Style;
use routedec::api::{to_exit_code, Error, ErrorKind};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Run `routedec --help` for usage."));
            }
        },
    };

    command_dispatch::dispatch_command(cli.command, cli.color)
}

#[derive(Parser)]
#[command(
    name = "routedec",
    version,
    about = "Decode shareable dungeon route strings into structured JSON",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Route strings are the `!`-prefixed blobs exported by the route planner addon.

Mental model:
  - `decode` turns a route string (or a file holding one) into JSON
  - metadata (sizes, compression ratio) comes first, route data second
"#,
    after_help = r#"EXAMPLES
  $ routedec decode '!fBvtpUjmq0FrbH)aS9X...'
  $ routedec decode exported-route.txt
  $ pbpaste | routedec decode -

LEARN MORE
  $ routedec <command> --help"#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        arg_required_else_help = true,
        about = "Decode a route string and print it as JSON",
        long_about = r#"Decode a route string and print the reconstructed route as JSON.

Accepts the route string inline, a path to a text file holding one, or `-`
to read it from stdin. File contents are trimmed before decoding."#,
        after_help = r#"EXAMPLES
  $ routedec decode '!fBvtpUjmq0FrbH)aS9X...'
  $ routedec decode exported-route.txt
  $ routedec decode route.txt --value-only | jq '.value.pulls'

NOTES
  - INPUT is treated as a file path when it ends in .txt or contains a
    path separator; everything else decodes as a route string
  - A missing leading `!` is tolerated
  - Decode failures are reported inside the JSON output (exit code 0);
    only bad arguments or unreadable files fail the process"#
    )]
    Decode {
        #[arg(
            help = "Route string, path to a file holding one, or - for stdin",
            value_hint = ValueHint::AnyPath
        )]
        input: String,
        #[arg(
            long,
            help = "Emit only the decoded route value (no metadata envelope)"
        )]
        value_only: bool,
        #[arg(long, help = "Emit single-line JSON instead of pretty output")]
        compact: bool,
    },
    #[command(
        about = "Print version info as JSON",
        long_about = r#"Emit version info as JSON (stable, machine-readable)."#,
        after_help = r#"EXAMPLES
  $ routedec version"#
    )]
    Version,
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        long_about = r#"Generate shell completion scripts.

Prints a completion script for the given shell to stdout.
Install the generated file in your shell's completion directory (or source
it) to enable tab completion."#,
        after_help = r#"EXAMPLES
  $ routedec completion bash > ~/.local/share/bash-completion/completions/routedec
  $ routedec completion zsh > ~/.zfunc/_routedec
  $ routedec completion fish > ~/.config/fish/completions/routedec.fish"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
}

fn emit_version_output() {
    if io::stdout().is_terminal() {
        println!("routedec {}", env!("CARGO_PKG_VERSION"));
        return;
    }
    let info = VersionInfo {
        name: "routedec",
        version: env!("CARGO_PKG_VERSION"),
    };
    let json = serde_json::to_string(&info)
        .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn output_style(color_mode: ColorMode, compact: bool) -> Style {
    let is_tty = io::stdout().is_terminal();
    Style {
        color: !compact && color_mode.use_color(is_tty),
        compact,
    }
}

/// Resolves the decode argument into route text. Path-like inputs (a
/// `.txt` extension or any path separator) are read from disk; `-` reads
/// stdin; anything else is the route string itself.
fn resolve_route_input(input: &str) -> Result<String, Error> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read route string from stdin")
                .with_source(err)
        })?;
        return Ok(text.trim().to_string());
    }
    if !looks_like_path(input) {
        return Ok(input.to_string());
    }
    let text = std::fs::read_to_string(input).map_err(|err| {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::Io,
        };
        Error::new(kind)
            .with_message("failed to read route file")
            .with_path(input)
            .with_hint("Pass the route string directly, or check the file path.")
            .with_source(err)
    })?;
    Ok(text.trim().to_string())
}

fn looks_like_path(input: &str) -> bool {
    input.chars().any(std::path::is_separator) || input.ends_with(".txt")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, true));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Decompression => "invalid compressed stream".to_string(),
        ErrorKind::Malformed => "malformed serialized stream".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(offset) = err.offset() {
        lines.push(format!(
            "{} {offset}",
            colorize_label("offset:", use_color, AnsiColor::Yellow)
        ));
    }
    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

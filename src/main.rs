//! Purpose: `jsonutil` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON or raw bytes on stdout.
//! Invariants: `encode` writes exactly one JSON value; `decode` writes only the decoded bytes.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `jsonutil::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;

use color_json::colorize_json;
use jsonutil::{Error, ErrorKind, to_exit_code};

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
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
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
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `jsonutil --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();
    let color_mode = cli.color;
    command_dispatch::dispatch(cli.command, color_mode).map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "jsonutil",
    version,
    about = "Move raw bytes in and out of JSON as strings or integer arrays",
    long_about = None,
    before_help = r#"Two byte encodings:
  - string: bytes are the UTF-8 characters of a JSON string   "lobaro"
  - array:  one integer 0..=255 per byte                      [1,2,3]
"#,
    after_help = r#"EXAMPLES
  $ printf lobaro | jsonutil encode --as string --field Str
  {"Str":"lobaro"}
  $ echo '{"Bytes":[1, 2,3]}' | jsonutil decode --as array --field Bytes | xxd
  $ jsonutil encode --as array --file firmware.bin --pretty"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
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

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Encoding {
    /// JSON string whose UTF-8 bytes are the data.
    String,
    /// JSON array of integers 0..=255.
    Array,
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Encode raw bytes as a JSON value",
        after_help = r#"EXAMPLES
  $ printf lobaro | jsonutil encode --as string
  "lobaro"
  $ printf '\x01\x02\x03' | jsonutil encode --as array --field Bytes
  {"Bytes":[1,2,3]}"#
    )]
    Encode(EncodeArgs),
    #[command(
        about = "Decode a JSON value back to raw bytes",
        after_help = r#"EXAMPLES
  $ echo '"lobaro"' | jsonutil decode --as string
  lobaro
  $ jsonutil decode --as array --field Bytes --file record.json > payload.bin"#
    )]
    Decode(DecodeArgs),
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ jsonutil completion bash > ~/.local/share/bash-completion/completions/jsonutil
  $ jsonutil completion zsh > ~/.zfunc/_jsonutil
  $ jsonutil completion fish > ~/.config/fish/completions/jsonutil.fish"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Args)]
struct EncodeArgs {
    #[arg(long = "as", value_enum, help = "Byte encoding to emit")]
    encoding: Encoding,
    #[arg(long, help = "Wrap the value in an object under this key")]
    field: Option<String>,
    #[arg(
        long,
        short = 'f',
        help = "Input file with raw bytes (default: stdin; use - for stdin)",
        value_hint = ValueHint::FilePath
    )]
    file: Option<PathBuf>,
    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,
}

#[derive(Args)]
struct DecodeArgs {
    #[arg(long = "as", value_enum, help = "Byte encoding to expect")]
    encoding: Encoding,
    #[arg(long, help = "Read the value from this key of a JSON object")]
    field: Option<String>,
    #[arg(
        long,
        short = 'f',
        help = "Input file with a JSON document (default: stdin; use - for stdin)",
        value_hint = ValueHint::FilePath
    )]
    file: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_json(value: Value, pretty: bool, color_mode: ColorMode) -> Result<(), Error> {
    let is_tty = io::stdout().is_terminal();
    let json = if pretty {
        colorize_json(&value, color_mode.use_color(is_tty))
    } else {
        jsonutil::json::to_string(&value)?
    };
    println!("{json}");
    Ok(())
}

#[derive(Copy, Clone)]
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

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
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
        ErrorKind::Syntax => "malformed json".to_string(),
        ErrorKind::TypeMismatch => "unexpected json type".to_string(),
        ErrorKind::Range => "byte value out of range".to_string(),
        ErrorKind::Encoding => "bytes are not valid text".to_string(),
        ErrorKind::Data => "invalid data".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
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
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if let Some(line) = err.line() {
        inner.insert("line".to_string(), json!(line));
    }
    if let Some(column) = err.column() {
        inner.insert("column".to_string(), json!(column));
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
    if let Some(field) = err.field() {
        lines.push(format!(
            "{} {field}",
            colorize_label("field:", use_color, AnsiColor::Yellow)
        ));
    }
    if let (Some(line), Some(column)) = (err.line(), err.column()) {
        lines.push(format!(
            "{} line {line}, column {column}",
            colorize_label("at:", use_color, AnsiColor::Yellow)
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

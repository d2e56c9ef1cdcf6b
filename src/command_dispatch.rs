//! Purpose: Execute parsed CLI commands.
//! Exports: `dispatch`.
//! Role: Glue between clap arguments and the library codecs.
//! Invariants: Input is read fully before any output is written.
//! Invariants: `--field` errors name the field; whole-document decodes keep line/column.
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::CommandFactory;
use serde_json::{Map, Value};

use super::{Cli, ColorMode, Command, Encoding, RunOutcome, emit_json};
use jsonutil::{ByteJsonArray, ByteJsonString, Error, ErrorKind, json};

pub(super) fn dispatch(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Encode(args) => {
            let bytes = read_input(args.file.as_deref())?;
            tracing::debug!(len = bytes.len(), encoding = ?args.encoding, "encoding input");
            let value = encode_bytes(bytes, args.encoding)?;
            let value = match args.field {
                Some(field) => {
                    let mut map = Map::new();
                    map.insert(field, value);
                    Value::Object(map)
                }
                None => value,
            };
            emit_json(value, args.pretty, color_mode)?;
            Ok(RunOutcome::ok())
        }
        Command::Decode(args) => {
            let input = read_input(args.file.as_deref())?;
            let bytes = match args.field.as_deref() {
                Some(field) => {
                    let doc: Value = json::from_slice(&input)?;
                    let value = select_field(doc, field)?;
                    decode_value(value, args.encoding).map_err(|err| err.with_field(field))?
                }
                None => decode_document(&input, args.encoding)?,
            };
            tracing::debug!(len = bytes.len(), encoding = ?args.encoding, "decoded value");
            write_output(&bytes)?;
            Ok(RunOutcome::ok())
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "jsonutil", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
    }
}

fn encode_bytes(bytes: Vec<u8>, encoding: Encoding) -> Result<Value, Error> {
    match encoding {
        Encoding::String => json::to_value(&ByteJsonString::new(bytes)),
        Encoding::Array => json::to_value(&ByteJsonArray::new(bytes)),
    }
}

fn decode_document(input: &[u8], encoding: Encoding) -> Result<Vec<u8>, Error> {
    match encoding {
        Encoding::String => json::from_slice::<ByteJsonString>(input).map(ByteJsonString::into_inner),
        Encoding::Array => json::from_slice::<ByteJsonArray>(input).map(ByteJsonArray::into_inner),
    }
}

fn decode_value(value: Value, encoding: Encoding) -> Result<Vec<u8>, Error> {
    match encoding {
        Encoding::String => json::convert::<ByteJsonString>(value).map(ByteJsonString::into_inner),
        Encoding::Array => json::convert::<ByteJsonArray>(value).map(ByteJsonArray::into_inner),
    }
}

fn select_field(doc: Value, field: &str) -> Result<Value, Error> {
    let Value::Object(mut map) = doc else {
        return Err(Error::new(ErrorKind::TypeMismatch)
            .with_message("expected a JSON object")
            .with_field(field)
            .with_hint("Drop --field to decode the whole document."));
    };
    map.remove(field).ok_or_else(|| {
        Error::new(ErrorKind::Data)
            .with_message(format!("missing field `{field}`"))
            .with_field(field)
    })
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    match path {
        Some(path) if path != Path::new("-") => fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        }),
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(buf)
        }
    }
}

fn write_output(bytes: &[u8]) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write stdout")
                .with_source(err)
        })
}

//! CLI argument definitions for the field-mapping toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fieldmap_model::Direction;

#[derive(Parser)]
#[command(
    name = "fieldmap",
    version,
    about = "Map courier payload fields onto canonical models",
    long_about = "Flatten courier payloads into typed field tables, map each field\n\
                  onto a canonical model leaf, and keep the mapping project on disk\n\
                  across payload revisions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new mapping project file.
    Init(InitArgs),

    /// Flatten a payload file and print the typed field table.
    Flatten(FlattenArgs),

    /// Add a canonical model (DTO) to the project library.
    ImportDto(ImportDtoArgs),

    /// Import endpoints from an API-collection export.
    ImportCollection(ImportCollectionArgs),

    /// Flatten a payload, reconcile it with saved mapping state, save back.
    Sync(SyncArgs),

    /// Render the reconciled mapping table for an endpoint.
    Show(ShowArgs),

    /// Export the mapping table for an endpoint as a spreadsheet.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct InitArgs {
    /// Path of the project file to create.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Name of the courier / source system being mapped.
    #[arg(long = "courier", value_name = "NAME")]
    pub courier: String,

    /// Free-text project notes.
    #[arg(long = "notes", default_value = "")]
    pub notes: String,

    /// Overwrite an existing project file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct FlattenArgs {
    /// Payload file (JSON or XML, sniffed from the leading byte).
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,
}

#[derive(Parser)]
pub struct ImportDtoArgs {
    /// Project file to modify.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Canonical model source: a nested JSON document or a flat
    /// schema-description array.
    #[arg(value_name = "DTO_FILE")]
    pub dto_file: PathBuf,

    /// Name to store the model under. Replaces any previous model with the
    /// same name.
    #[arg(long = "name", value_name = "DTO_NAME")]
    pub name: String,
}

#[derive(Parser)]
pub struct ImportCollectionArgs {
    /// Project file to modify.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// API-collection export (Postman v2.1 style JSON).
    #[arg(value_name = "COLLECTION")]
    pub collection: PathBuf,
}

#[derive(Parser)]
pub struct SyncArgs {
    /// Project file to modify.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Payload file to flatten and reconcile.
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Endpoint the payload belongs to.
    #[arg(long = "endpoint", value_name = "NAME")]
    pub endpoint: String,

    /// Which side of the endpoint the payload is.
    #[arg(long = "direction", value_enum, default_value = "request")]
    pub direction: DirectionArg,

    /// Create the endpoint if it does not exist yet.
    #[arg(long = "create")]
    pub create: bool,

    /// HTTP method recorded when creating a new endpoint.
    #[arg(long = "method", default_value = "GET")]
    pub method: String,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Project file to read.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Endpoint to render.
    #[arg(long = "endpoint", value_name = "NAME")]
    pub endpoint: String,

    /// Which side of the endpoint to render.
    #[arg(long = "direction", value_enum, default_value = "request")]
    pub direction: DirectionArg,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Project file to read.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Endpoint to export.
    #[arg(long = "endpoint", value_name = "NAME")]
    pub endpoint: String,

    /// Which side of the endpoint to export.
    #[arg(long = "direction", value_enum, default_value = "request")]
    pub direction: DirectionArg,

    /// Output file (default: <ENDPOINT>-<DIRECTION>.csv next to the
    /// project file).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Request,
    Response,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Request => Direction::Request,
            DirectionArg::Response => Direction::Response,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

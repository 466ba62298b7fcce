use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::{CycleGuard, TargetLanguage};

#[derive(Parser, Debug)]
#[command(name = "oas3-samples")]
#[command(author, version, about = "Request snippets, bodies and response models from OpenAPI specifications")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI or Swagger specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate request snippets, request bodies and response models
  Generate(GenerateCommand),
  /// Convert a Swagger 2.0 specification to OpenAPI 3.0.3
  Convert {
    /// URL or path of the Swagger 2.0 specification
    #[arg(short, long, value_name = "URL|FILE")]
    input: String,

    /// Path where the converted JSON document will be written
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
  },
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// URL or path of the specification (JSON or YAML)
  #[arg(short, long, value_name = "URL|FILE")]
  pub input: String,

  /// Generate samples for this operationId only
  #[arg(long, value_name = "ID")]
  pub operation: Option<String>,

  /// Directory where the generated samples are written
  #[arg(short, long, value_name = "DIR", default_value = "samples")]
  pub output: PathBuf,

  /// Target languages (comma-separated)
  #[arg(
    short,
    long,
    value_enum,
    value_delimiter = ',',
    default_values_t = TargetLanguage::ALL
  )]
  pub language: Vec<TargetLanguage>,

  /// How recursive schemas are detected
  #[arg(long, value_enum, default_value_t = CycleGuard::Structural)]
  pub cycle_guard: CycleGuard,

  /// Enable verbose output with cycle details and all warnings
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the specification
  Operations {
    /// URL or path of the specification (JSON or YAML)
    #[arg(short, long, value_name = "URL|FILE")]
    input: String,
  },
}

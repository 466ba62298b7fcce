use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::Value;

use crate::{
  generator::{self, CycleGuard, GenerationOutput, SynthesisConfig, TargetLanguage, metrics::GenerationStats},
  spec::SpecificationSource,
  ui::{Colors, GenerateCommand},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub source: SpecificationSource,
  pub operation: Option<String>,
  pub output: PathBuf,
  pub languages: Vec<TargetLanguage>,
  pub cycle_guard: CycleGuard,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      operation,
      output,
      language,
      cycle_guard,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be used together");
    }

    let source = input.parse::<SpecificationSource>()?;

    let operation = match operation.map(|id| id.trim().to_string()) {
      Some(id) if id.is_empty() => anyhow::bail!("--operation requires a non-empty operationId"),
      other => other,
    };

    let mut languages = Vec::with_capacity(language.len());
    for candidate in language {
      if !languages.contains(&candidate) {
        languages.push(candidate);
      }
    }
    if languages.is_empty() {
      anyhow::bail!("at least one --language is required");
    }

    Ok(Self {
      source,
      operation,
      output,
      languages,
      cycle_guard,
      verbose,
      quiet,
    })
  }

  fn synthesis_config(&self) -> SynthesisConfig {
    SynthesisConfig::builder()
      .languages(self.languages.clone())
      .cycle_guard(self.cycle_guard)
      .build()
  }

  async fn write_output(&self, output: &GenerationOutput) -> anyhow::Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(&self.output).await?;

    let mut written = Vec::new();
    for (file_name, contents) in render_files(output, &self.languages, self.operation.is_some())? {
      let path = self.output.join(file_name);
      tokio::fs::write(&path, contents).await?;
      written.push(path);
    }
    Ok(written)
  }
}

/// Output files as `(file name, contents)`, in a stable order.
fn render_files(
  output: &GenerationOutput,
  languages: &[TargetLanguage],
  single_operation: bool,
) -> anyhow::Result<Vec<(String, String)>> {
  let mut files = vec![("output.json".to_string(), serde_json::to_string_pretty(output)?)];

  let bodies: IndexMap<&str, &Value> = output
    .generated
    .iter()
    .filter_map(|operation| Some((operation.operation_id.as_str(), operation.request_body.as_ref()?)))
    .collect();
  files.push(("request_bodies.json".to_string(), serde_json::to_string_pretty(&bodies)?));

  for language in languages {
    files.push((format!("models.{}", language.extension()), models_file(output, *language)));
  }
  for language in languages {
    files.push((
      format!("snippets.{}.txt", language.extension()),
      snippets_file(output, *language),
    ));
  }

  if single_operation {
    files.push(("samples.json".to_string(), serde_json::to_string_pretty(&output.generated)?));
  }

  Ok(files)
}

fn models_file(output: &GenerationOutput, language: TargetLanguage) -> String {
  let strategy = language.strategy();
  let header = strategy.file_header();
  let comment = strategy.line_comment();

  let mut blocks: Vec<String> = header.map(String::from).into_iter().collect();
  for operation in &output.generated {
    let Some(model) = operation.response_model(language) else {
      continue;
    };
    let source = header
      .and_then(|header| model.source.strip_prefix(header))
      .unwrap_or(&model.source)
      .trim();
    blocks.push(format!("{comment} {}\n{source}", operation.operation_id));
  }

  let separator = if header.is_some() { "\n\n\n" } else { "\n\n" };
  let mut file = blocks.join(separator);
  file.push('\n');
  file
}

fn snippets_file(output: &GenerationOutput, language: TargetLanguage) -> String {
  let mut file = output
    .generated
    .iter()
    .filter_map(|operation| operation.snippet(language))
    .map(|snippet| snippet.source.trim_end().to_string())
    .join("\n\n");
  if !file.is_empty() {
    file.push('\n');
  }
  file
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<28} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading specification from: {}", self.config.source)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_loaded(&self, output: &GenerationOutput) {
    let info = &output.api_info;
    let message = if output.base_url.is_empty() {
      format!("Loaded {} {}", info.title, info.version)
    } else {
      format!("Loaded {} {} ({})", info.title, info.version, output.base_url)
    };
    self.info(&message.with(self.colors.info()).to_string());
  }

  fn log_generating(&self) {
    let languages = self
      .config
      .languages
      .iter()
      .map(ToString::to_string)
      .join(", ");
    let message = match &self.config.operation {
      Some(operation) => format!("Generating samples for {operation} ({languages})..."),
      None => format!("Generating samples ({languages})..."),
    };
    self.info(&message.with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, output: &GenerationOutput) {
    if self.config.quiet {
      return;
    }

    let stats = &output.stats;
    self.stat("Operations processed:", stats.operations_processed.to_string());
    self.stat("Request bodies generated:", stats.request_bodies_generated.to_string());
    self.stat("Response models generated:", stats.response_models_generated.to_string());
    self.stat("", format!("{} declarations", stats.declarations_generated));
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);

    if self.config.operation.is_some() && output.generated.is_empty() {
      self.info(&"No operation matched the requested operationId".with(self.colors.accent()).to_string());
    }
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Schema cycles:", stats.cycles_detected.to_string());
    self.stat("", format!("{} recursive fields cut", stats.cycles_cut));

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for warning in &stats.warnings {
      let should_print = warning.is_skipped_item() || self.config.verbose;
      if !should_print {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_written(&self, files: &[PathBuf]) {
    if !self.config.verbose {
      return;
    }
    for file in files {
      self.stat("", file.display().to_string());
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated samples".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_samples(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  logger.log_generating();
  let output = generator::generate(
    config.source.clone(),
    config.operation.as_deref(),
    config.synthesis_config(),
  )
  .await?;
  logger.log_loaded(&output);
  logger.print_statistics(&output);

  logger.log_writing();
  let written = config.write_output(&output).await?;
  logger.log_written(&written);

  logger.log_success();
  Ok(())
}

use std::path::Path;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  spec::{Bundler, SpecLoader, SpecificationSource, convert_swagger2},
  ui::Colors,
};

/// Loads a Swagger 2.0 document, bundles its external references and writes the OpenAPI 3.0.3
/// equivalent as pretty-printed JSON.
pub async fn convert_spec(input: &str, output: &Path, colors: &Colors) -> anyhow::Result<()> {
  let source = input.parse::<SpecificationSource>()?;
  let loader = SpecLoader::new();
  let loaded = loader.load(source).await?;
  let bundled = Bundler::new(&loader).bundle(loaded).await?;

  let converted = convert_swagger2(&bundled)?;

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(output, serde_json::to_string_pretty(&converted)?).await?;

  let now = Local::now();
  println!(
    "{} {}",
    format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second()).with(colors.timestamp()),
    format!("Converted {input} to {}", output.display()).with(colors.success())
  );
  Ok(())
}

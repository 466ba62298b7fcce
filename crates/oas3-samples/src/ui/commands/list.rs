use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::operations::extract_operations,
  spec::{self, SpecificationSource},
  ui::{Colors, colors::IntoComfyColor, term_width},
};

pub async fn list_operations(input: &str, colors: &Colors) -> anyhow::Result<()> {
  let source = input.parse::<SpecificationSource>()?;
  let document = spec::resolve(source).await?;
  let extraction = extract_operations(&document);

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["OPERATION ID", "METHOD", "PATH", "BODY", "MODEL"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for operation in &extraction.operations {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&operation.operation_id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(operation.method.as_upper())
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&operation.path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(presence(operation.request_body.is_some())).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(Cell::new(presence(operation.response.is_some())).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  println!("{table}");

  for skipped in &extraction.skipped {
    eprintln!("skipped {} {}: no operationId", skipped.method.as_upper(), skipped.path);
  }

  Ok(())
}

fn presence(present: bool) -> &'static str {
  if present { "yes" } else { "-" }
}

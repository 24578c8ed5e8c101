use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use genlab_runtime::LabConfig;

#[derive(Serialize)]
struct ParamRow {
    id: String,
    label: String,
    kind: &'static str,
    value: Option<String>,
    range: String,
    tooltip: Option<String>,
}

/// Print the parameters `id` declares with their defaults and bounds.
pub fn run(config: &LabConfig, id: &str, json: bool) -> Result<(), String> {
    let instance = super::instantiate(id, config.width, config.height)?;
    let process = instance.process();

    let rows: Vec<ParamRow> = process
        .parameters()
        .iter()
        .map(|d| ParamRow {
            id: d.id.clone(),
            label: d.label.clone(),
            kind: d.kind.tag(),
            value: process.param_value(&d.id).map(|v| v.to_string()),
            range: super::describe_range(d),
            tooltip: d.tooltip.clone(),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!("  {} {}", process.name().bold(), format!("({id})").dimmed());
    println!();

    if rows.is_empty() {
        println!("  No parameters.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Label", "Kind", "Default", "Range"]);
    for row in &rows {
        let value = row
            .value
            .as_deref()
            .map_or_else(|| "—".to_string(), |v| v.replace('\n', "\\n"));
        table.add_row(vec![
            row.id.clone(),
            row.label.clone(),
            row.kind.to_string(),
            value,
            row.range.clone(),
        ]);
    }
    println!("{table}");

    Ok(())
}

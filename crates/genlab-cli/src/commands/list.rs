use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

#[derive(Serialize)]
struct KindRow<'a> {
    id: &'a str,
    name: &'a str,
}

/// Print every registered kind in selection order.
pub fn run(json: bool) -> Result<(), String> {
    let registry = genlab_systems::registry();
    let rows: Vec<KindRow<'_>> = registry
        .entries()
        .iter()
        .map(|e| KindRow {
            id: &e.id,
            name: &e.name,
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name"]);
    for row in &rows {
        table.add_row(vec![row.id, row.name]);
    }

    println!("{table}");
    println!();
    println!("  {} process kinds", rows.len());

    Ok(())
}

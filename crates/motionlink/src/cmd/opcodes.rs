use serde::Serialize;

use crate::cmd::{OpcodesArgs, TableName};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Serialize)]
struct OpcodeEntry {
    table: &'static str,
    name: &'static str,
    code: u8,
}

pub fn run(args: OpcodesArgs, format: OutputFormat) -> CliResult<i32> {
    let selected: Vec<TableName> = match args.table {
        Some(table) => vec![table],
        None => TableName::ALL.to_vec(),
    };

    let entries: Vec<OpcodeEntry> = selected
        .into_iter()
        .map(TableName::table)
        .flat_map(|table| {
            table.entries().iter().map(move |&(name, code)| OpcodeEntry {
                table: table.name(),
                name,
                code,
            })
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Table => print_table(
            ["TABLE", "NAME", "CODE"],
            entries
                .iter()
                .map(|e| [e.table.to_string(), e.name.to_string(), format!("0x{:02x}", e.code)])
                .collect(),
        ),
        OutputFormat::Pretty | OutputFormat::Raw => {
            for e in &entries {
                println!("{} {} 0x{:02x}", e.table, e.name, e.code);
            }
        }
    }

    Ok(SUCCESS)
}

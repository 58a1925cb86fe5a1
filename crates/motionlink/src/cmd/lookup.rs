use serde::Serialize;

use crate::cmd::LookupArgs;
use crate::exit::{opcode_error, CliResult, SUCCESS};
use crate::output::{parse_byte, print_json, print_table, OutputFormat};

#[derive(Serialize)]
struct LookupOutput {
    table: &'static str,
    name: &'static str,
    code: u8,
}

pub fn run(args: LookupArgs, format: OutputFormat) -> CliResult<i32> {
    let table = args.table.table();
    let key = args.key.trim();

    let (name, code) = if key.starts_with(|c: char| c.is_ascii_digit()) {
        let code = parse_byte(key)?;
        let name = table
            .name_of(code)
            .map_err(|err| opcode_error("lookup failed", err))?;
        (name, code)
    } else {
        let code = table
            .code(key)
            .map_err(|err| opcode_error("lookup failed", err))?;
        // Names come back as the table's own static strings.
        let name = table
            .name_of(code)
            .map_err(|err| opcode_error("lookup failed", err))?;
        (name, code)
    };

    let out = LookupOutput {
        table: table.name(),
        name,
        code,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            ["TABLE", "NAME", "CODE"],
            vec![[
                out.table.to_string(),
                out.name.to_string(),
                format!("0x{:02x}", out.code),
            ]],
        ),
        OutputFormat::Pretty => println!("{} {} 0x{:02x}", out.table, out.name, out.code),
        OutputFormat::Raw => println!("0x{:02x}", out.code),
    }

    Ok(SUCCESS)
}

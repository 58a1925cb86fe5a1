use motionlink_ident::{generate, IdFormat, Identifier};
use serde::Serialize;

use crate::cmd::UuidArgs;
use crate::exit::{ident_error, CliResult, SUCCESS};
use crate::output::{parse_hex, print_json, print_raw, print_table, to_hex, OutputFormat};

#[derive(Serialize)]
struct UuidOutput {
    id: String,
    binary: bool,
    seeded: bool,
}

pub fn run(args: UuidArgs, format: OutputFormat) -> CliResult<i32> {
    let seed = args.seed.as_deref().map(parse_hex).transpose()?;
    let id_format = if args.binary {
        IdFormat::Binary
    } else {
        IdFormat::Text
    };

    let id = generate(seed.as_deref(), id_format).map_err(|err| ident_error("uuid failed", err))?;

    if let (OutputFormat::Raw, Identifier::Binary(bytes)) = (format, &id) {
        print_raw(bytes);
        return Ok(SUCCESS);
    }

    let out = UuidOutput {
        id: match &id {
            Identifier::Binary(bytes) => to_hex(bytes),
            Identifier::Text(text) => text.clone(),
        },
        binary: args.binary,
        seeded: seed.is_some(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(["ID"], vec![[out.id]]),
        OutputFormat::Pretty | OutputFormat::Raw => println!("{}", out.id),
    }

    Ok(SUCCESS)
}

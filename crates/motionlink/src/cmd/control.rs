use motionlink_opcodes::{ControlCode, ControlFamily, SINGLE};
use serde::Serialize;

use crate::cmd::ControlArgs;
use crate::exit::{opcode_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{parse_byte, print_json, print_raw, print_table, OutputFormat};

#[derive(Serialize)]
struct ControlOutput {
    name: &'static str,
    family: &'static str,
    seq: u8,
    code: u8,
}

impl From<ControlCode> for ControlOutput {
    fn from(code: ControlCode) -> Self {
        let (family, seq) = code.parts();
        Self {
            name: code.name(),
            family: family.name(),
            seq,
            code: code.to_byte(),
        }
    }
}

pub fn run(args: ControlArgs, format: OutputFormat) -> CliResult<i32> {
    let code = match (args.value, args.family) {
        (Some(value), _) => resolve_value(&value)?,
        (None, Some(family)) => {
            let family: ControlFamily = family
                .parse()
                .map_err(|err| opcode_error("control failed", err))?;
            let byte = family
                .code(args.seq)
                .map_err(|err| opcode_error("control failed", err))?;
            ControlCode::from_byte(byte).map_err(|err| opcode_error("control failed", err))?
        }
        (None, None) => {
            return Err(CliError::new(
                USAGE,
                "either a control value or --family is required",
            ))
        }
    };

    let out = ControlOutput::from(code);
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            ["NAME", "FAMILY", "SEQ", "CODE"],
            vec![[
                out.name.to_string(),
                out.family.to_string(),
                out.seq.to_string(),
                format!("0x{:02x}", out.code),
            ]],
        ),
        OutputFormat::Pretty => println!(
            "{} family={} seq={} code=0x{:02x}",
            out.name, out.family, out.seq, out.code
        ),
        OutputFormat::Raw => print_raw(&[out.code]),
    }

    Ok(SUCCESS)
}

/// A control value is either a byte (`0x96`, `150`) or a code name (`ACK2`).
fn resolve_value(value: &str) -> CliResult<ControlCode> {
    let value = value.trim();
    let byte = if value.starts_with(|c: char| c.is_ascii_digit()) {
        parse_byte(value)?
    } else {
        SINGLE
            .code(value)
            .map_err(|err| opcode_error("control failed", err))?
    };
    ControlCode::from_byte(byte).map_err(|err| opcode_error("control failed", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::DATA_INVALID;

    #[test]
    fn resolves_bytes_and_names() {
        assert_eq!(
            resolve_value("0x96").unwrap(),
            ControlCode::Ack(motionlink_opcodes::Seq::wrapping(2))
        );
        assert_eq!(resolve_value("ACK2").unwrap(), resolve_value("150").unwrap());
        assert_eq!(resolve_value("STARTUP").unwrap(), ControlCode::Startup);
    }

    #[test]
    fn unknown_values_are_data_invalid() {
        assert_eq!(resolve_value("0x00").unwrap_err().code, DATA_INVALID);
        assert_eq!(resolve_value("PING").unwrap_err().code, DATA_INVALID);
        assert_eq!(resolve_value("0xzz").unwrap_err().code, USAGE);
    }
}

use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::exit::{CliError, CliResult, USAGE};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_table<const N: usize>(header: [&str; N], rows: Vec<[String; N]>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    for row in rows {
        table.add_row(row.to_vec());
    }
    println!("{table}");
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Lowercase hex, no separators.
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse hex bytes, ignoring whitespace, `:` and `-` separators and an
/// optional `0x` prefix.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = trimmed
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':' && *b != b'-')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            format!("hex input has an odd number of digits: {input}"),
        ));
    }

    digits
        .chunks_exact(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).unwrap_or("");
            u8::from_str_radix(text, 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex byte {text:?} in {input}")))
        })
        .collect()
}

/// Parse a single byte written as `0x96` hex or decimal.
pub fn parse_byte(input: &str) -> CliResult<u8> {
    let input = input.trim();
    let parsed = if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        u8::from_str_radix(hex, 16)
    } else {
        input.parse::<u8>()
    };
    parsed.map_err(|_| CliError::new(USAGE, format!("invalid byte value: {input}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let bytes = parse_hex("01 02 03 28").unwrap();
        assert_eq!(bytes, vec![0x01, 0x02, 0x03, 0x28]);
        assert_eq!(to_hex(&bytes), "01020328");
    }

    #[test]
    fn hex_accepts_prefix_and_separators() {
        assert_eq!(parse_hex("0xDEAD:be-ef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert_eq!(parse_hex("abc").unwrap_err().code, USAGE);
        assert_eq!(parse_hex("zz").unwrap_err().code, USAGE);
    }

    #[test]
    fn byte_forms() {
        assert_eq!(parse_byte("0x96").unwrap(), 0x96);
        assert_eq!(parse_byte("27").unwrap(), 27);
        assert!(parse_byte("0x100").is_err());
        assert!(parse_byte("ACK").is_err());
    }
}

use motionlink_packet::{corruption_message, payload_len, verify, DiagnosticSink, TracingSink};
use serde::Serialize;

use crate::cmd::VerifyArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{parse_hex, print_json, print_raw, print_table, to_hex, OutputFormat};

#[derive(Serialize)]
struct VerifyOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(args: VerifyArgs, format: OutputFormat) -> CliResult<i32> {
    let packet = parse_hex(&args.packet)?;
    let payload = &packet[..payload_len(packet.len())];

    let (out, code) = match verify(&packet) {
        Ok(()) => (
            VerifyOutput {
                valid: true,
                payload: Some(to_hex(payload)),
                error: None,
            },
            SUCCESS,
        ),
        Err(err) => {
            TracingSink.emit(&corruption_message(&err, packet.len()));
            (
                VerifyOutput {
                    valid: false,
                    payload: None,
                    error: Some(err.to_string()),
                },
                DATA_INVALID,
            )
        }
    };
    tracing::debug!(packet_len = packet.len(), valid = out.valid, "verified packet");

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            ["VALID", "PAYLOAD", "ERROR"],
            vec![[
                out.valid.to_string(),
                out.payload.clone().unwrap_or_default(),
                out.error.clone().unwrap_or_default(),
            ]],
        ),
        OutputFormat::Pretty => match (&out.payload, &out.error) {
            (Some(payload), _) => println!("valid payload={payload}"),
            (_, Some(error)) => println!("invalid: {error}"),
            _ => {}
        },
        OutputFormat::Raw => {
            if out.valid {
                print_raw(payload);
            }
        }
    }

    Ok(code)
}

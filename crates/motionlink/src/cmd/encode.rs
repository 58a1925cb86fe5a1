use motionlink_packet::{build, build_framed, checksum_len, payload_len, BLOCK_SIZE, MAX_PACKET_LEN};
use serde::Serialize;

use crate::cmd::EncodeArgs;
use crate::exit::{packet_error, CliResult, SUCCESS};
use crate::output::{parse_hex, print_json, print_raw, print_table, to_hex, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    payload: String,
    packet: String,
    blocks: usize,
    unprotected: usize,
    framed: bool,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = parse_hex(&args.payload)?;

    let packet = if args.framed {
        build_framed(&payload, MAX_PACKET_LEN)
            .map_err(|err| packet_error("encode failed", err))?
    } else {
        build(&payload)
    };

    let covered = payload_len(packet.len());
    let blocks = checksum_len(covered);
    tracing::debug!(
        payload_len = payload.len(),
        packet_len = packet.len(),
        blocks,
        framed = args.framed,
        "encoded packet"
    );

    let out = EncodeOutput {
        payload: to_hex(&payload),
        packet: to_hex(&packet),
        blocks,
        unprotected: covered - blocks * BLOCK_SIZE,
        framed: args.framed,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            ["PAYLOAD", "BLOCKS", "UNPROTECTED", "PACKET"],
            vec![[
                out.payload.clone(),
                out.blocks.to_string(),
                out.unprotected.to_string(),
                out.packet.clone(),
            ]],
        ),
        OutputFormat::Pretty => println!(
            "packet={} blocks={} unprotected={}",
            out.packet, out.blocks, out.unprotected
        ),
        OutputFormat::Raw => print_raw(&packet),
    }

    Ok(SUCCESS)
}

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("motionlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: motionlink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("MOTIONLINK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "opcodes: single={}, command={}, reply={}, parsed={}",
        motionlink_opcodes::SINGLE.len(),
        motionlink_opcodes::COMMANDS.len(),
        motionlink_opcodes::REPLIES.len(),
        motionlink_opcodes::PARSED.len()
    );
    println!(
        "max_packet_len: {}",
        motionlink_packet::MAX_PACKET_LEN
    );

    Ok(SUCCESS)
}

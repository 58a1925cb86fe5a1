//! Host → device command opcodes.
//!
//! The first body byte of every packet the host sends.

opcode_table! {
    COMMANDS, "command" {
        /// Store a new device identifier.
        SET_UUID = 0x00,
        /// Request the device identifier.
        GET_UUID = 0x01,
        LINE = 0x02,
        SINGLE = 0x03,
        PROBE = 0x04,
        RUN_FILE = 0x05,
        SLEEP = 0x06,
        SETTEMP = 0x07,
        WAITTEMP = 0x08,
        READTEMP = 0x09,
        READPOWER = 0x0a,
        SETPOS = 0x0b,
        GETPOS = 0x0c,
        READ_GLOBALS = 0x0d,
        WRITE_GLOBALS = 0x0e,
        READ_SPACE_INFO = 0x0f,
        READ_SPACE_AXIS = 0x10,
        READ_SPACE_MOTOR = 0x11,
        WRITE_SPACE_INFO = 0x12,
        WRITE_SPACE_AXIS = 0x13,
        WRITE_SPACE_MOTOR = 0x14,
        READ_TEMP = 0x15,
        WRITE_TEMP = 0x16,
        READ_GPIO = 0x17,
        WRITE_GPIO = 0x18,
        QUEUED = 0x19,
        READPIN = 0x1a,
        /// Home the given axes.
        HOME = 0x1b,
        FORCE_DISCONNECT = 0x1c,
        CONNECT = 0x1d,
        RECONNECT = 0x1e,
        RESUME = 0x1f,
        GETTIME = 0x20,
        SPI = 0x21,
        ADJUSTPROBE = 0x22,
    }
}

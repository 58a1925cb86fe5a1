//! Device → host reply opcodes.

opcode_table! {
    REPLIES, "reply" {
        UUID = 0x40,
        TEMP = 0x41,
        POWER = 0x42,
        POS = 0x43,
        DATA = 0x44,
        PIN = 0x45,
        QUEUE = 0x46,
        HOMED = 0x47,
        TIME = 0x48,
        /// Move callback.
        MOVECB = 0x49,
        /// Temperature callback.
        TEMPCB = 0x4a,
        CONTINUE = 0x4b,
        LIMIT = 0x4c,
        TIMEOUT = 0x4d,
        DISCONNECT = 0x4e,
        PINCHANGE = 0x4f,
        UPDATE_TEMP = 0x50,
        UPDATE_PIN = 0x51,
        CONFIRM = 0x52,
        FILE_DONE = 0x53,
        PARKWAIT = 0x54,
        CONNECTED = 0x55,
        PINNAME = 0x56,
    }
}

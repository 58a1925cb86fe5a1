//! Internal line/segment types of the parsed motion queue.

opcode_table! {
    PARSED, "parsed" {
        SYSTEM = 0,
        PRE_LINE = 1,
        LINE = 2,
        PRE_ARC = 3,
        ARC = 4,
        GPIO = 5,
        SETTEMP = 6,
        WAITTEMP = 7,
        SETPOS = 8,
        WAIT = 9,
        CONFIRM = 10,
        PARK = 11,
    }
}

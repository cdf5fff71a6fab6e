pub const INVALID_INPUT: &str = "invalid_input";
pub const INTERNAL_ERROR: &str = "internal_error";

// JSON-RPC error codes.
pub const RPC_INVALID_PARAMS: i64 = -32602;

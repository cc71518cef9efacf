//! Process exit codes. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const EVAL_FAILED: i32 = 1; // At least one statement could not be scored
pub const CONFIG_ERROR: i32 = 2; // Missing credential, bad flag value, or setup failure

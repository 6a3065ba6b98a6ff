pub mod config_file;
pub mod logging;
pub mod render;
pub mod script;
pub mod seed;

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Version string composed by build.rs (crate version, branch, commit, target).
pub const VERSION_STRING: &str = include_str!(concat!(env!("OUT_DIR"), "/version"));

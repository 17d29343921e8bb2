//! Operator-facing output helpers.
//!
//! Four labeled line kinds: info, success, warning, error. Warnings and
//! info go to stdout; errors to stderr.

pub fn info(msg: impl AsRef<str>) {
    println!("ℹ️  {}", msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    println!("✅ {}", msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    println!("⚠️  {}", msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("❌ {}", msg.as_ref());
}

/// Section header used by the status report.
pub fn heading(msg: impl AsRef<str>) {
    println!();
    println!("── {} ──", msg.as_ref());
}

//! Operator-facing output.
//!
//! Everything the operator reads goes to stdout as `[LEVEL]: message`
//! lines; diagnostic tracing stays on stderr.

pub fn info(message: impl AsRef<str>) {
    println!("[INFO]: {}", message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    println!("[WARN]: {}", message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    println!("[ERROR]: {}", message.as_ref());
}

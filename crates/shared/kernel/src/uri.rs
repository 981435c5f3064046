//! Percent-escaping for single URI path components.
//!
//! Only RFC 3986 unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through; everything
//! else, including `/`, is encoded byte by byte so a component can never split a path.

use std::borrow::Cow;
use std::fmt::Write;

const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// Escapes `component` for embedding as one path segment.
#[must_use]
pub fn escape_path_component(component: &str) -> Cow<'_, str> {
    if component.bytes().all(is_unreserved) {
        return Cow::Borrowed(component);
    }

    let mut out = String::with_capacity(component.len() * 3);
    for byte in component.bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape_path_component`]. Returns `None` for malformed escapes or non-UTF-8 output.
#[must_use]
pub fn unescape_path_component(component: &str) -> Option<Cow<'_, str>> {
    if !component.contains('%') {
        return Some(Cow::Borrowed(component));
    }

    let bytes = component.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok().map(Cow::Owned)
}

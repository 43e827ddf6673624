// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage key derivation for reboot groups

use std::fmt;

/// Group used when a caller does not name one
pub const DEFAULT_GROUP: &str = "default";

const KEY_PREFIX: &str = "/com.coreos.locksmith2/groups/";
const KEY_SUFFIX: &str = "/v1/semaphore";

/// Store key holding one group's semaphore
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    /// Derive the key for `group`; an empty name maps to [`DEFAULT_GROUP`].
    pub fn for_group(group: &str) -> Self {
        let escaped = if group.is_empty() {
            DEFAULT_GROUP.to_string()
        } else {
            escape(group, SpaceEncoding::Plus)
        };
        Self(format!("{}{}{}", KEY_PREFIX, escaped, KEY_SUFFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How [`escape`] writes a space byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpaceEncoding {
    /// `+`, as in a query component. Store keys use this form.
    Plus,
    /// `%20`, as in a URL path segment
    Percent,
}

/// Percent-encode `s`: unreserved bytes (`A-Za-z0-9-_.~`) pass through, a
/// space follows `space`, and every other byte becomes `%XX` with uppercase
/// hex. With [`SpaceEncoding::Plus`] the output matches the keys written by
/// earlier deployments.
pub fn escape(s: &str, space: SpaceEncoding) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' if space == SpaceEncoding::Plus => out.push('+'),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;

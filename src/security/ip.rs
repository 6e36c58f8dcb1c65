//! Private/reserved address classification.
//!
//! Pure functions, no I/O. The rule set errs toward "private": a false positive
//! costs a worse preview, a false negative is an SSRF hole.

use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

const DOTTED_QUAD_PATTERN: &str = r"^(\d+)\.(\d+)\.(\d+)\.(\d+)$";

static DOTTED_QUAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DOTTED_QUAD_PATTERN).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}': {}. This is a programming error.",
            DOTTED_QUAD_PATTERN, e
        )
    })
});

/// Returns `true` if the textual address is private, reserved, loopback,
/// link-local or multicast.
///
/// Well-formed addresses are classified numerically. Text that does not parse
/// as an IP still goes through the textual rules (dotted-quad octets, IPv6
/// prefixes), so a malformed literal cannot slip through as "public".
///
/// # Examples
///
/// ```
/// use link_metadata::security::is_private_address;
///
/// assert!(is_private_address("10.1.2.3"));
/// assert!(is_private_address("FE80::1"));
/// assert!(!is_private_address("8.8.8.8"));
/// ```
pub fn is_private_address(ip: &str) -> bool {
    let trimmed = ip.trim().trim_start_matches('[').trim_end_matches(']');
    match trimmed.parse::<IpAddr>() {
        Ok(addr) => is_private_ip(addr),
        Err(_) => is_private_text(trimmed),
    }
}

/// Classifies a parsed address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_ipv4(v4),
        IpAddr::V6(v6) => is_private_ipv6(v6),
    }
}

/// Checks IPv4 ranges:
/// - 0.0.0.0/8 (this network)
/// - 10.0.0.0/8
/// - 127.0.0.0/8 (loopback)
/// - 169.254.0.0/16 (link-local)
/// - 172.16.0.0/12
/// - 192.168.0.0/16
/// - 224.0.0.0 and above (multicast, reserved, broadcast)
fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    let o = ip.octets();
    is_private_octets(o[0].into(), o[1].into())
}

fn is_private_octets(first: u32, second: u32) -> bool {
    match first {
        0 | 10 | 127 => true,
        169 if second == 254 => true,
        172 if (16..=31).contains(&second) => true,
        192 if second == 168 => true,
        n if n >= 224 => true,
        _ => false,
    }
}

/// Checks IPv6 ranges:
/// - ::1 (loopback) and :: (unspecified)
/// - fc00::/7 (unique local, covers fc00: and fd00:)
/// - fe80::/10 (link-local)
/// - ff00::/8 (multicast)
/// - ::ffff:0:0/96 (IPv4-mapped, classified by the embedded IPv4)
fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_ipv4(v4);
    }
    let s = ip.segments();
    (s[0] & 0xfe00) == 0xfc00 || (s[0] & 0xffc0) == 0xfe80 || (s[0] & 0xff00) == 0xff00
}

/// Fallback rules for text that is not a parseable address.
fn is_private_text(text: &str) -> bool {
    if let Some(caps) = DOTTED_QUAD_RE.captures(text) {
        // Octets above 255 saturate so they land in the reserved range.
        let octet = |i: usize| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(u32::MAX)
        };
        return is_private_octets(octet(1), octet(2));
    }

    let lower = text.to_ascii_lowercase();
    lower == "::1"
        || lower == "::"
        || ["fe80:", "fc00:", "fd00:", "ff00:"]
            .iter()
            .any(|prefix| lower.starts_with(prefix))
}

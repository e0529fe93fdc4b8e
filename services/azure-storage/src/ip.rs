use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use sassy_core::Error;

const IP_RANGE_SEPARATOR: char = '-';

/// Signed IP (`sip`) of an account SAS: a single IPv4 address or an
/// inclusive, ascending IPv4 range.
///
/// IPv6 addresses are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedIp {
    /// A single address, `168.1.5.65`.
    Single(Ipv4Addr),
    /// An address range, `168.1.5.60-168.1.5.70`.
    Range {
        /// First address of the range.
        start: Ipv4Addr,
        /// Last address of the range, never lower than `start`.
        end: Ipv4Addr,
    },
}

impl SignedIp {
    /// Parse an IPv4 address or `start-end` range.
    ///
    /// Returns `None` for anything else, including IPv6, partial addresses,
    /// descending ranges and more than one separator.
    pub fn parse(ips: &str) -> Option<SignedIp> {
        let segments: Vec<&str> = ips.trim().split(IP_RANGE_SEPARATOR).collect();

        match segments.as_slice() {
            [ip] => parse_ipv4(ip).map(SignedIp::Single),
            [start, end] => {
                let start = parse_ipv4(start)?;
                let end = parse_ipv4(end)?;
                if u32::from(start) > u32::from(end) {
                    return None;
                }
                Some(SignedIp::Range { start, end })
            }
            _ => None,
        }
    }

    /// Check whether `ip` falls inside this restriction.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        match self {
            SignedIp::Single(v) => *v == ip,
            SignedIp::Range { start, end } => (*start..=*end).contains(&ip),
        }
    }
}

fn parse_ipv4(ip: &str) -> Option<Ipv4Addr> {
    Ipv4Addr::from_str(ip.trim()).ok()
}

impl FromStr for SignedIp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignedIp::parse(s).ok_or_else(|| {
            Error::invalid_ipv4_format(format!(
                "signed ip {s:?} must be an IPv4 address or an ascending IPv4 range"
            ))
        })
    }
}

impl fmt::Display for SignedIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignedIp::Single(ip) => write!(f, "{ip}"),
            SignedIp::Range { start, end } => write!(f, "{start}{IP_RANGE_SEPARATOR}{end}"),
        }
    }
}

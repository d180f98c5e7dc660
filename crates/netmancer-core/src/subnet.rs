// ── Subnet notation helpers ──
//
// Conversions between dotted netmasks and prefix lengths. Wraps `ipnet`
// so callers get a single error type with readable messages.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubnetError {
    #[error("prefix length must be between 0 and 32, got {0}")]
    PrefixOutOfRange(u32),

    #[error("netmask {0} is not contiguous")]
    NonContiguousMask(Ipv4Addr),

    #[error("expected a prefix length (0-32) or a dotted netmask")]
    Unrecognized,

    #[error("expected format x.x.x.x/prefix")]
    InvalidCidr,
}

/// Convert a prefix length to a dotted netmask (`24` -> `255.255.255.0`).
pub fn prefix_to_mask(prefix: u8) -> Result<Ipv4Addr, SubnetError> {
    Ipv4Net::new(Ipv4Addr::UNSPECIFIED, prefix)
        .map(|net| net.netmask())
        .map_err(|_| SubnetError::PrefixOutOfRange(u32::from(prefix)))
}

/// Convert a dotted netmask to its prefix length. Only contiguous masks are accepted.
pub fn mask_to_prefix(mask: Ipv4Addr) -> Result<u8, SubnetError> {
    ipnet::ipv4_mask_to_prefix(mask).map_err(|_| SubnetError::NonContiguousMask(mask))
}

/// Parse a `subnet` value that is either a prefix length or a dotted netmask.
pub fn parse_subnet(raw: &str) -> Result<u8, SubnetError> {
    let raw = raw.trim();

    if let Ok(prefix) = raw.parse::<u32>() {
        return u8::try_from(prefix)
            .ok()
            .filter(|p| *p <= 32)
            .ok_or(SubnetError::PrefixOutOfRange(prefix));
    }

    let mask: Ipv4Addr = raw.parse().map_err(|_| SubnetError::Unrecognized)?;
    mask_to_prefix(mask)
}

/// Split `a.b.c.d/n` into the address and its dotted netmask.
pub fn split_cidr(raw: &str) -> Result<(Ipv4Addr, Ipv4Addr), SubnetError> {
    let net: Ipv4Net = raw.trim().parse().map_err(|_| SubnetError::InvalidCidr)?;
    Ok((net.addr(), net.netmask()))
}

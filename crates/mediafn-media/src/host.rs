//! Hosts the server must never fetch from on a caller's behalf.
//!
//! Decisions are made on the parsed host, so userinfo prefixes, integer or
//! hex IPv4 spellings and IPv4-mapped IPv6 addresses are all normalized
//! before being judged.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

/// Whether `url` targets a loopback, private, link-local or metadata host.
///
/// URLs without a host count as restricted.
pub fn is_restricted_url(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => is_restricted_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_restricted_ipv6(ip),
        Some(Host::Domain(domain)) => is_restricted_domain(domain),
        None => true,
    }
}

fn is_restricted_ipv4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        // 0.0.0.0/8 "this network"
        || a == 0
        // 100.64.0.0/10 carrier-grade NAT
        || (a == 100 && (b & 0xc0) == 64)
}

fn is_restricted_ipv6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
        // IPv4-mapped and IPv4-compatible forms
        || ip.to_ipv4().is_some_and(is_restricted_ipv4)
}

fn is_restricted_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.');
    domain == "localhost"
        || domain.ends_with(".localhost")
        || domain.starts_with("metadata.")
        || domain.ends_with(".internal")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restricted(url: &str) -> bool {
        is_restricted_url(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_plain_private_addresses() {
        for url in [
            "http://127.0.0.1/v.mp4",
            "http://10.0.0.8/v.mp4",
            "http://172.16.4.4/v.mp4",
            "http://192.168.0.10/v.mp4",
            "http://169.254.169.254/latest/meta-data",
            "http://0.0.0.0/v.mp4",
            "http://100.100.100.200/latest/meta-data",
            "http://[::1]/v.mp4",
            "http://[fd00::1]/v.mp4",
            "http://[fe80::1]/v.mp4",
        ] {
            assert!(restricted(url), "{} should be restricted", url);
        }
    }

    #[test]
    fn test_alternate_spellings_are_normalized() {
        for url in [
            "http://user@127.0.0.1/v.mp4",
            "http://x@169.254.169.254/latest/meta-data",
            "http://2130706433/v.mp4",
            "http://0x7f.0.0.1/v.mp4",
            "http://017700000001/v.mp4",
            "http://[::ffff:127.0.0.1]/v.mp4",
            "http://[::ffff:a9fe:a9fe]/latest/meta-data",
            "http://LOCALHOST./v.mp4",
        ] {
            assert!(restricted(url), "{} should be restricted", url);
        }
    }

    #[test]
    fn test_internal_names() {
        assert!(restricted("http://localhost:3000/v.mp4"));
        assert!(restricted("http://api.localhost/v.mp4"));
        assert!(restricted("http://metadata.google.internal/computeMetadata/v1/"));
        assert!(restricted("http://db.corp.internal/v.mp4"));
    }

    #[test]
    fn test_public_hosts_allowed() {
        for url in [
            "https://storage.googleapis.com/bucket/v.mp4",
            "https://8.8.8.8/v.mp4",
            "http://172.32.0.1/v.mp4",
            "https://[2606:4700::1111]/v.mp4",
            "https://metadata-free.example.com/v.mp4",
        ] {
            assert!(!restricted(url), "{} should be allowed", url);
        }
    }
}

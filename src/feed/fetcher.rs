//! Feed fetcher with security measures.
//!
//! This module provides functionality to fetch and parse RSS/Atom/JSON feeds
//! with SSRF protection and resource limits.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;

use super::types::ParsedItem;
use crate::config::FetcherConfig;
use crate::error::{GazetteError, Result};

/// A source of feed items.
///
/// Implementations must not keep state between calls nor touch the store.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve and parse the document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<ParsedItem>>;
}

/// HTTP feed fetcher with security measures.
pub struct HttpFeedFetcher {
    client: Client,
    max_feed_size: u64,
    max_description_length: usize,
    block_private_hosts: bool,
}

impl HttpFeedFetcher {
    /// Create a new fetcher from configuration.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GazetteError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_feed_size: config.max_feed_size_bytes,
            max_description_length: config.max_description_length,
            block_private_hosts: config.block_private_hosts,
        })
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_feed_size {
            return Err(GazetteError::Fetch(format!(
                "feed too large: {} bytes (max {} bytes)",
                size, self.max_feed_size
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedSource for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<ParsedItem>> {
        if self.block_private_hosts {
            validate_url(url)?;
        } else {
            validate_scheme(url)?;
        }

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GazetteError::Fetch(format!("failed to fetch feed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GazetteError::Fetch(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            self.check_size(content_length)?;
        }

        // Chunked bodies carry no length, so the cap is enforced while reading
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| GazetteError::Fetch(format!("failed to read response: {}", e)))?
        {
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }

        parse_feed(&body, self.max_description_length)
    }
}

fn parse_url(url: &str) -> Result<url::Url> {
    let parsed =
        url::Url::parse(url).map_err(|e| GazetteError::Fetch(format!("invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(GazetteError::Fetch(format!(
            "unsupported URL scheme: {}",
            scheme
        ))),
    }
}

/// Check that a URL parses and uses http or https.
pub fn validate_scheme(url: &str) -> Result<()> {
    parse_url(url).map(|_| ())
}

/// Validate a URL for SSRF protection.
///
/// This function checks that:
/// - The URL uses http or https scheme
/// - The host is not a private/loopback address
/// - The host is not a reserved hostname
pub fn validate_url(url: &str) -> Result<()> {
    let parsed = parse_url(url)?;

    let host = parsed
        .host()
        .ok_or_else(|| GazetteError::Fetch("URL has no host".to_string()))?;

    let ip = match host {
        url::Host::Domain(domain) => {
            if is_forbidden_hostname(domain) {
                return Err(GazetteError::Fetch(format!("forbidden host: {}", domain)));
            }
            return Ok(());
        }
        url::Host::Ipv4(ipv4) => IpAddr::V4(ipv4),
        url::Host::Ipv6(ipv6) => IpAddr::V6(ipv6),
    };

    if is_private_ip(&ip) {
        return Err(GazetteError::Fetch(format!(
            "private IP address not allowed: {}",
            ip
        )));
    }

    Ok(())
}

/// Check if a hostname is forbidden.
fn is_forbidden_hostname(host: &str) -> bool {
    let host_lower = host.to_lowercase();

    if host_lower == "localhost" {
        return true;
    }

    const FORBIDDEN_SUFFIXES: [&str; 7] = [
        ".local",
        ".localhost",
        ".internal",
        ".intranet",
        ".corp",
        ".home",
        ".lan",
    ];

    FORBIDDEN_SUFFIXES
        .iter()
        .any(|suffix| host_lower.ends_with(suffix))
}

/// Check if an IP address is private/reserved.
///
/// IPv4-mapped IPv6 addresses are judged by the IPv4 address they carry.
fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => is_private_ipv4(ipv4),
        IpAddr::V6(ipv6) => {
            if let Some(ipv4) = ipv6.to_ipv4_mapped() {
                return is_private_ipv4(&ipv4);
            }

            let segments = ipv6.segments();

            ipv6.is_loopback()
                || ipv6.is_unspecified()
                || ipv6.is_multicast()
                // Unique local: fc00::/7
                || (segments[0] & 0xfe00) == 0xfc00
                // Link-local: fe80::/10
                || (segments[0] & 0xffc0) == 0xfe80
        }
    }
}

fn is_private_ipv4(ipv4: &Ipv4Addr) -> bool {
    let octets = ipv4.octets();

    ipv4.is_loopback()
        || ipv4.is_private()
        || ipv4.is_link_local()
        || ipv4.is_broadcast()
        || ipv4.is_multicast()
        // "This network": 0.0.0.0/8
        || octets[0] == 0
        // Shared address space (CGNAT): 100.64.0.0/10
        || (octets[0] == 100 && (octets[1] & 0xc0) == 64)
        // Documentation: 192.0.2.0/24, 198.51.100.0/24, 203.0.113.0/24
        || (octets[0] == 192 && octets[1] == 0 && octets[2] == 2)
        || (octets[0] == 198 && octets[1] == 51 && octets[2] == 100)
        || (octets[0] == 203 && octets[1] == 0 && octets[2] == 113)
}

/// Parse feed bytes into normalized items.
///
/// RSS 0.9x/1.0/2.0, Atom and JSON Feed are all accepted.
pub fn parse_feed(bytes: &[u8], max_description_length: usize) -> Result<Vec<ParsedItem>> {
    let feed = parser::parse(bytes)
        .map_err(|e| GazetteError::Fetch(format!("failed to parse feed: {}", e)))?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map(|t| strip_html(&t.content))
                .unwrap_or_default();
            let link = entry.links.first().map(|l| l.href.clone());
            let description = entry
                .summary
                .map(|t| t.content)
                .or(entry.content.and_then(|c| c.body))
                .map(|d| truncate_description(&strip_html(&d), max_description_length));
            let published_at = entry.published.or(entry.updated);

            ParsedItem {
                title,
                link,
                description,
                published_at,
            }
        })
        .collect();

    Ok(items)
}

/// Strip HTML tags from text and decode common entities.
///
/// A `&` that does not start a well-formed entity is kept as literal text.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut entity: Option<String> = None;

    for ch in html.chars() {
        if let Some(name) = entity.as_mut() {
            if ch == ';' {
                decode_entity(name, &mut result);
                entity = None;
                continue;
            }
            if ch.is_ascii_alphanumeric() || (ch == '#' && name.is_empty()) {
                name.push(ch);
                continue;
            }
            result.push('&');
            result.push_str(name);
            entity = None;
        }

        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '&' if !in_tag => entity = Some(String::new()),
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }

    if let Some(name) = entity {
        result.push('&');
        result.push_str(&name);
    }

    result.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn decode_entity(name: &str, out: &mut String) {
    match name {
        "amp" => out.push('&'),
        "lt" => out.push('<'),
        "gt" => out.push('>'),
        "quot" => out.push('"'),
        "apos" => out.push('\''),
        "nbsp" => out.push(' '),
        _ if name.starts_with('#') => {
            if let Some(c) = parse_numeric_entity(name).and_then(char::from_u32) {
                out.push(c);
            }
        }
        _ => {
            // Unknown entity, keep as-is
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
    }
}

/// Parse a numeric HTML entity (e.g., "#123" or "#x7B").
fn parse_numeric_entity(entity: &str) -> Option<u32> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else {
        entity.strip_prefix('#')?.parse().ok()
    }
}

/// Truncate a description to at most `max_chars` characters.
fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

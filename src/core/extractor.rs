//! Sender domain extraction.
//!
//! Picks the address a service would be reached at (`Reply-To` before
//! `From`), parses it as an RFC 5322 mailbox and reduces the host to its
//! registrable domain with the Public Suffix List, so that
//! `mail.example.com` and `noreply.example.com` both become `example.com`.

use crate::domain::model::HeaderSet;
use mailparse::{addrparse, MailAddr};

/// Result of looking at one message's headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub domain: Option<String>,
    pub from: Option<String>,
    pub reply_to: Option<String>,
    pub subject: Option<String>,
}

impl Extraction {
    /// The sender value kept as a sample: `Reply-To` when set, else `From`.
    pub fn sample_sender(&self) -> &str {
        non_empty(self.reply_to.as_deref())
            .or(non_empty(self.from.as_deref()))
            .unwrap_or("")
    }
}

/// `(subdomain, domain, suffix)` split of a host name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl DomainParts {
    pub fn registrable(&self) -> String {
        format!("{}.{}", self.domain, self.suffix)
    }
}

pub fn extract_domain(headers: &HeaderSet) -> Extraction {
    let reply_to = headers.get("Reply-To").map(str::to_string);
    let from = headers.get("From").map(str::to_string);
    let subject = headers.get("Subject").map(str::to_string);

    let domain = non_empty(reply_to.as_deref())
        .or(non_empty(from.as_deref()))
        .and_then(parse_email_address)
        .and_then(|address| {
            let (_, host) = address.rsplit_once('@')?;
            split_domain(&host.to_lowercase())
        })
        .map(|parts| parts.registrable());

    Extraction {
        domain,
        from,
        reply_to,
        subject,
    }
}

/// Returns the address part of a mailbox such as `"Example" <no-reply@example.com>`.
///
/// Anything that does not parse into an address containing `@` yields `None`.
/// For group syntax the first member is used.
pub fn parse_email_address(raw: &str) -> Option<String> {
    let list = addrparse(raw).ok()?;
    let address = match list.first()? {
        MailAddr::Single(info) => info.addr.clone(),
        MailAddr::Group(group) => group.addrs.first()?.addr.clone(),
    };
    address.contains('@').then_some(address)
}

/// Splits a lowercase host against the ICANN section of the Public Suffix List.
///
/// Private entries (`github.io`, `firebaseapp.com`, ...) are treated as
/// ordinary registrable domains. Hosts without a known public suffix (IP
/// literals, single labels, made-up TLDs) and bare suffixes return `None`.
pub fn split_domain(host: &str) -> Option<DomainParts> {
    let host = host.trim().trim_end_matches('.');
    if host.is_empty() {
        return None;
    }

    let suffix = icann_suffix(host)?;
    let prefix = host.strip_suffix(suffix)?.strip_suffix('.')?;
    let (subdomain, domain) = prefix.rsplit_once('.').unwrap_or(("", prefix));

    if domain.is_empty() {
        return None;
    }

    Some(DomainParts {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        suffix: suffix.to_string(),
    })
}

/// Longest ICANN public suffix of `host`, as a tail slice of it.
fn icann_suffix(host: &str) -> Option<&str> {
    let mut name = host;
    loop {
        let suffix = psl::suffix(name.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }
        // psl 返回的都是輸入字串的尾端切片
        let matched = &name[name.len() - suffix.as_bytes().len()..];
        match suffix.typ() {
            // 私有規則去掉最左邊的標籤後再查一次
            Some(psl::Type::Private) => name = matched.split_once('.')?.1,
            _ => return Some(matched),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

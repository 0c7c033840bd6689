//! Netscape cookie file rendering
//!
//! Turns a `Cookie` request header (`a=1; b=2`) into the tab-separated file
//! layout that yt-dlp and curl read with `--cookies`.

use std::fmt;

/// First line of every cookie file.
pub const HEADER: &str = "# Netscape HTTP Cookie File";

/// Domain written for every record. The header form carries no attributes,
/// so domain, path, secure flag and expiry are fixed placeholders.
pub const COOKIE_DOMAIN: &str = ".youtube.com";

const INCLUDE_SUBDOMAINS: &str = "TRUE";
const COOKIE_PATH: &str = "/";
const SECURE: &str = "FALSE";
const EXPIRATION: &str = "0";

/// Separator between pairs in a cookie header.
const PAIR_SEPARATOR: &str = "; ";

/// One `name=value` pair taken from a cookie header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePair {
    pub name: String,
    pub value: String,
}

impl CookiePair {
    /// Render the pair as a seven field Netscape record.
    pub fn to_record(&self) -> String {
        [
            COOKIE_DOMAIN,
            INCLUDE_SUBDOMAINS,
            COOKIE_PATH,
            SECURE,
            EXPIRATION,
            &self.name,
            &self.value,
        ]
        .join("\t")
    }
}

/// A rendered cookie file: the header comment followed by one record per pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetscapeCookieFile {
    pairs: Vec<CookiePair>,
}

impl NetscapeCookieFile {
    /// Pairs that produced a record, in header order.
    pub fn pairs(&self) -> &[CookiePair] {
        &self.pairs
    }

    /// Record lines without the header comment.
    pub fn records(&self) -> Vec<String> {
        self.pairs.iter().map(CookiePair::to_record).collect()
    }

    /// All lines, header first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.pairs.len() + 1);
        lines.push(HEADER.to_string());
        lines.extend(self.records());
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for NetscapeCookieFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Split a cookie header into pairs.
///
/// Pairs are separated by exactly `"; "`. Each pair is split on its first `=`
/// so values such as base64 padding survive intact. Tokens without `=` or with
/// an empty name are dropped.
pub fn parse_header(raw: &str) -> Vec<CookiePair> {
    raw.split(PAIR_SEPARATOR)
        .filter_map(|token| {
            let (name, value) = token.split_once('=')?;
            if name.is_empty() {
                return None;
            }
            Some(CookiePair {
                name: name.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Convert a raw cookie header into a Netscape cookie file.
pub fn convert(raw: &str) -> NetscapeCookieFile {
    NetscapeCookieFile {
        pairs: parse_header(raw),
    }
}

//! `Set-Cookie` parsing.
//!
//! A lean cookie representation for response extraction - no jar, no
//! persistence. Expiry attributes are carried as raw values.

/// A cookie parsed from a `Set-Cookie` response header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// `Domain` attribute, if present.
    pub domain: Option<String>,
    /// `Path` attribute, if present.
    pub path: Option<String>,
    /// `Secure` attribute.
    pub secure: bool,
    /// `HttpOnly` attribute.
    pub http_only: bool,
    /// `Max-Age` attribute in seconds, if present and numeric.
    pub max_age: Option<i64>,
    /// Raw `Expires` attribute, if present.
    pub expires: Option<String>,
    /// `SameSite` attribute, if present.
    pub same_site: Option<String>,
}

impl Cookie {
    /// Create a cookie with just a name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Parse a single `Set-Cookie` header value.
    ///
    /// Returns `None` when the header has no `name=value` pair or an empty
    /// name. Unknown attributes are ignored.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(';').map(str::trim);

        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Self::new(name, value.trim());

        for attr in parts {
            if attr.eq_ignore_ascii_case("secure") {
                cookie.secure = true;
            } else if attr.eq_ignore_ascii_case("httponly") {
                cookie.http_only = true;
            } else if let Some((key, val)) = attr.split_once('=') {
                let val = val.trim();
                match key.trim().to_ascii_lowercase().as_str() {
                    "domain" => cookie.domain = Some(val.to_string()),
                    "path" => cookie.path = Some(val.to_string()),
                    "max-age" => cookie.max_age = val.parse().ok(),
                    "expires" => cookie.expires = Some(val.to_string()),
                    "samesite" => cookie.same_site = Some(val.to_string()),
                    _ => {}
                }
            }
        }

        Some(cookie)
    }
}

impl std::fmt::Display for Cookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

//! Cookie attribute options and their layering rules.

use cookie::{Cookie, SameSite};
use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

use crate::error::{CookieError, Result};

/// Attributes attached to a cookie (domain, path, expiry, flags).
///
/// Every field is optional so that options can be layered: instance defaults
/// at the bottom, per-call options on top. See [`CookieOptions::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Option<OffsetDateTime>,
    pub max_age: Option<Duration>,
    pub secure: Option<bool>,
    pub http_only: Option<bool>,
    pub same_site: Option<SameSite>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_expires(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Returns `true` when no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `over` on top of `self`.
    ///
    /// Any attribute set in `over` wins; attributes `over` leaves unset keep
    /// the value from `self`.
    pub fn merge(&self, over: &CookieOptions) -> CookieOptions {
        CookieOptions {
            domain: over.domain.clone().or_else(|| self.domain.clone()),
            path: over.path.clone().or_else(|| self.path.clone()),
            expires: over.expires.or(self.expires),
            max_age: over.max_age.or(self.max_age),
            secure: over.secure.or(self.secure),
            http_only: over.http_only.or(self.http_only),
            same_site: over.same_site.or(self.same_site),
        }
    }

    /// Build options from `(name, value)` attribute pairs.
    ///
    /// Names are case-insensitive: `domain`, `path`, `expires` (RFC 3339),
    /// `max-age` (seconds), `secure`, `httponly` and `samesite`. Flags accept
    /// an empty value as `true`.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();

        for (name, value) in attributes {
            let value = value.trim();
            match name.trim().to_ascii_lowercase().as_str() {
                "domain" => options.domain = Some(value.to_string()),
                "path" => options.path = Some(value.to_string()),
                "expires" => {
                    let expires = OffsetDateTime::parse(value, &Rfc3339)
                        .map_err(|_| CookieError::InvalidExpires(value.to_string()))?;
                    options.expires = Some(expires);
                }
                "max-age" | "max_age" | "maxage" => {
                    let seconds: i64 = value
                        .parse()
                        .map_err(|_| CookieError::InvalidMaxAge(value.to_string()))?;
                    options.max_age = Some(Duration::seconds(seconds));
                }
                "secure" => options.secure = Some(parse_flag("secure", value)?),
                "httponly" | "http_only" | "http-only" => {
                    options.http_only = Some(parse_flag("httponly", value)?)
                }
                "samesite" | "same_site" | "same-site" => {
                    options.same_site = Some(parse_same_site(value)?)
                }
                other => return Err(CookieError::UnknownAttribute(other.to_string())),
            }
        }

        Ok(options)
    }

    /// Build a `cookie::Cookie` carrying `name=value` and these attributes.
    pub fn to_cookie(&self, name: impl Into<String>, value: impl Into<String>) -> Cookie<'static> {
        let pair: (String, String) = (name.into(), value.into());
        let mut builder = Cookie::build(pair);

        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        if let Some(path) = &self.path {
            builder = builder.path(path.clone());
        }
        if let Some(expires) = self.expires {
            builder = builder.expires(expires);
        }
        if let Some(max_age) = self.max_age {
            builder = builder.max_age(max_age);
        }
        if let Some(secure) = self.secure {
            builder = builder.secure(secure);
        }
        if let Some(http_only) = self.http_only {
            builder = builder.http_only(http_only);
        }
        if let Some(same_site) = self.same_site {
            builder = builder.same_site(same_site);
        }

        builder.build()
    }

    /// Build the cookie that tells a client to drop `name`.
    ///
    /// Expiry is forced into the past and the path falls back to `/` when
    /// these options leave it unset.
    pub fn removal_cookie(&self, name: impl Into<String>) -> Cookie<'static> {
        let mut cookie = self.to_cookie(name, String::new());
        if cookie.path().is_none() {
            cookie.set_path("/");
        }
        cookie.make_removal();
        cookie
    }
}

/// Parse a `SameSite` policy (`strict`, `lax` or `none`, case-insensitive).
pub fn parse_same_site(value: &str) -> Result<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" => Ok(SameSite::None),
        _ => Err(CookieError::InvalidSameSite(value.to_string())),
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(CookieError::InvalidFlag {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

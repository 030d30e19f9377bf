use sharedcookies_core::{parse_same_site, CookieOptions, Result};

/// Cookie settings shared by every request.
#[derive(Debug, Clone, Default)]
pub struct CookieConfig {
    /// Options applied beneath every per-call option.
    pub defaults: CookieOptions,
    /// Domain used to clear cookies whose record carries none.
    pub fallback_domain: Option<String>,
}

impl CookieConfig {
    pub fn new(defaults: CookieOptions) -> Self {
        Self {
            defaults,
            fallback_domain: None,
        }
    }

    pub fn with_fallback_domain(mut self, domain: impl Into<String>) -> Self {
        self.fallback_domain = Some(domain.into());
        self
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `COOKIE_DOMAIN`: Fallback domain for cleared cookies (optional)
    /// - `COOKIE_PATH`: Default path (default: `/`)
    /// - `COOKIE_SECURE`: Whether to set the secure flag (default: true)
    /// - `COOKIE_HTTP_ONLY`: Whether to set the http-only flag (default: false)
    /// - `COOKIE_SAME_SITE`: `strict`, `lax` or `none` (default: `lax`)
    ///
    /// # Errors
    ///
    /// Returns an error if `COOKIE_SAME_SITE` holds an unknown policy.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CookieConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(default)
        };

        let same_site = match lookup("COOKIE_SAME_SITE") {
            Some(value) => parse_same_site(&value)?,
            None => sharedcookies_core::SameSite::Lax,
        };

        let defaults = CookieOptions::new()
            .with_path(lookup("COOKIE_PATH").unwrap_or_else(|| "/".to_string()))
            .with_secure(flag("COOKIE_SECURE", true))
            .with_http_only(flag("COOKIE_HTTP_ONLY", false))
            .with_same_site(same_site);

        Ok(Self {
            defaults,
            fallback_domain: lookup("COOKIE_DOMAIN").filter(|d| !d.is_empty()),
        })
    }
}

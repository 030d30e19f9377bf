//! Turn a buffered cookie bag into response mutations.

use crate::{
    options::CookieOptions,
    record::{CookieBag, CookieRecord, RawCookies},
};

/// Cookie header primitives of an outgoing response.
pub trait ResponseCookies {
    /// Emit a `Set-Cookie` for `name=value` with `options`.
    fn set_cookie(&mut self, name: &str, value: &str, options: &CookieOptions);

    /// Emit an instruction telling the client to drop `name`.
    fn clear_cookie(&mut self, name: &str, options: &CookieOptions);
}

/// One instruction produced by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieMutation {
    Set {
        name: String,
        value: String,
        options: CookieOptions,
    },
    Clear {
        name: String,
        options: CookieOptions,
    },
}

impl CookieMutation {
    pub fn name(&self) -> &str {
        match self {
            Self::Set { name, .. } | Self::Clear { name, .. } => name,
        }
    }

    pub fn apply_to<R: ResponseCookies + ?Sized>(&self, response: &mut R) {
        match self {
            Self::Set {
                name,
                value,
                options,
            } => response.set_cookie(name, value, options),
            Self::Clear { name, options } => response.clear_cookie(name, options),
        }
    }
}

/// Whether `record` must be written given what the request already carried.
///
/// Tombstones always need a write, whatever the request holds.
pub fn needs_mutation(record: &CookieRecord, carried: Option<&str>) -> bool {
    record.is_deleted || carried != Some(record.value.as_str())
}

/// Options used to clear a tombstoned cookie: only the domain is kept.
///
/// The record's own domain wins over `fallback_domain`; with neither, the
/// clear carries no domain constraint.
pub fn clear_options(record: &CookieRecord, fallback_domain: Option<&str>) -> CookieOptions {
    CookieOptions {
        domain: record
            .options
            .domain
            .clone()
            .or_else(|| fallback_domain.map(str::to_owned)),
        ..CookieOptions::default()
    }
}

/// Compute the mutations needed to bring the client in line with `bag`.
///
/// Mutations come out in bag order, one at most per name.
pub fn plan_reconciliation(
    bag: &CookieBag,
    request: &RawCookies,
    fallback_domain: Option<&str>,
) -> Vec<CookieMutation> {
    bag.iter()
        .filter(|(name, record)| needs_mutation(record, request.get(*name).map(String::as_str)))
        .map(|(name, record)| {
            if record.is_deleted {
                CookieMutation::Clear {
                    name: name.clone(),
                    options: clear_options(record, fallback_domain),
                }
            } else {
                CookieMutation::Set {
                    name: name.clone(),
                    value: record.value.clone(),
                    options: record.options.clone(),
                }
            }
        })
        .collect()
}

/// Apply the reconciliation plan for `bag` to `response`.
pub fn reconcile<R: ResponseCookies + ?Sized>(
    bag: &CookieBag,
    request: &RawCookies,
    response: &mut R,
    fallback_domain: Option<&str>,
) {
    let mutations = plan_reconciliation(bag, request, fallback_domain);
    tracing::debug!(
        buffered = bag.len(),
        mutations = mutations.len(),
        "Reconciling cookies"
    );

    for mutation in &mutations {
        match mutation {
            CookieMutation::Set { name, .. } => tracing::debug!(cookie = %name, "set cookie"),
            CookieMutation::Clear { name, .. } => tracing::debug!(cookie = %name, "clear cookie"),
        }
        mutation.apply_to(response);
    }
}

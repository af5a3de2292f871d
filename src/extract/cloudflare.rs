use crate::extract::{EmailStrategy, PageContent};
use once_cell::sync::Lazy;
use scraper::Selector;
use std::collections::BTreeSet;

static CFEMAIL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[data-cfemail]").unwrap());

/// Decodes addresses hidden by Cloudflare email protection
///
/// Cloudflare replaces each address with an element carrying a
/// `data-cfemail` attribute: a hex string whose first byte is an XOR key for
/// every byte after it.
pub struct CloudflareStrategy;

impl EmailStrategy for CloudflareStrategy {
    fn name(&self) -> &'static str {
        "cloudflare"
    }

    fn extract(&self, page: &PageContent<'_>) -> BTreeSet<String> {
        page.document
            .select(&CFEMAIL_SELECTOR)
            .filter_map(|element| element.value().attr("data-cfemail"))
            .filter_map(|payload| {
                let decoded = decode_cf_email(payload);
                if decoded.is_none() {
                    tracing::debug!("Skipping undecodable data-cfemail payload: {}", payload);
                }
                decoded
            })
            .collect()
    }
}

/// Decodes a `data-cfemail` payload
///
/// Returns `None` for payloads that are not valid hex or that decode to
/// nothing. Each decoded byte is taken as one Latin-1 character.
///
/// # Example
///
/// ```
/// use mailsift::extract::decode_cf_email;
///
/// // key 0x01: 'a' ^ 1 = 0x60, '@' ^ 1 = 0x41, ...
/// assert_eq!(decode_cf_email("01604163").as_deref(), Some("a@b"));
/// assert_eq!(decode_cf_email("not-hex"), None);
/// ```
pub fn decode_cf_email(payload: &str) -> Option<String> {
    let bytes = hex::decode(payload.trim()).ok()?;
    let (&key, encoded) = bytes.split_first()?;

    let decoded: String = encoded.iter().map(|byte| (byte ^ key) as char).collect();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

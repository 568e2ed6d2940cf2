//! Browser identity sent with every coin API request.
//!
//! The coin endpoints sit behind the storefront's browser checks, so requests
//! present as desktop Chrome. The User-Agent and the `sec-ch-ua` client hints
//! must name the same browser version.

/// Chrome major version shared by the User-Agent and client hints.
const CHROME_MAJOR_VERSION: u32 = 114;

/// Desktop Chrome User-Agent matching [`client_hint_brands`].
#[must_use]
pub(crate) fn browser_user_agent() -> String {
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/{CHROME_MAJOR_VERSION}.0.0.0 Safari/537.36"
    )
}

/// Value for the `sec-ch-ua` client hint header.
#[must_use]
pub(crate) fn client_hint_brands() -> String {
    format!(
        "\"Not.A/Brand\";v=\"8\", \"Chromium\";v=\"{CHROME_MAJOR_VERSION}\", \"Google Chrome\";v=\"{CHROME_MAJOR_VERSION}\""
    )
}

/// Value for the `sec-ch-ua-platform` client hint header.
pub(crate) const CLIENT_HINT_PLATFORM: &str = "\"Windows\"";

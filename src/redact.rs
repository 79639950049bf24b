//! Secret redaction for sensitive data in logs, serialization, and display.
//!
//! The gateway client carries a private key around in its configuration; wrap
//! it in [`Redacted`] so it never leaks through `Debug`, `Display`, or
//! `Serialize` output.

use std::fmt::{self, Debug, Display};

/// Wrapper that redacts its inner value when formatted or serialized.
///
/// # Example
///
/// ```ignore
/// use gateway_rs::redact::Redacted;
///
/// let key = Redacted("0xac09...".to_string());
/// tracing::info!(private_key = %key, "Loaded signer");
/// // Logs: private_key = <redacted>
/// ```
#[derive(Clone, Copy)]
pub struct Redacted<T>(pub T);

impl<T> Redacted<T> {
    /// Deliberately expose the inner value. Call sites should be the only
    /// places the secret is handed to another API.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> serde::Serialize for Redacted<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        "<redacted>".serialize(serializer)
    }
}

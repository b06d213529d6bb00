//! Shared value types

use std::fmt;

/// A public IP address as reported by a lookup service
///
/// This is an opaque text token: it is compared by exact string equality and
/// never parsed into a numeric address. The empty value means "no prior
/// value" and is what a fresh cache yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PublicIp(String);

impl PublicIp {
    /// Wrap a raw address string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The "no prior value" sentinel
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether this is the "no prior value" sentinel
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PublicIp {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PublicIp {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

use once_cell::sync::Lazy;
use secp256k1::{All, Secp256k1};
use std::fmt;

static GLOBAL_CONTEXT: Lazy<CryptoContext> = Lazy::new(|| {
    log::debug!("Initializing secp256k1 context");
    CryptoContext::new()
});

/// Immutable secp256k1 signing/verification context.
///
/// Building the precomputation tables is expensive, so one instance is shared
/// for the lifetime of the process through [`CryptoContext::global`]. The
/// handle is never mutated after construction and is safe to use from any
/// number of threads.
pub struct CryptoContext {
    secp: Secp256k1<All>,
}

impl CryptoContext {
    /// Build an independent context
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Process-wide context, created on first use
    pub fn global() -> &'static CryptoContext {
        &GLOBAL_CONTEXT
    }

    pub fn secp(&self) -> &Secp256k1<All> {
        &self.secp
    }
}

impl Default for CryptoContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CryptoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoContext")
    }
}

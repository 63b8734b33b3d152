use std::fmt::Write;

use super::Error;

/// Configuration builder for customizing fingerprint generation.
///
/// Fingerprints are stable across processes (FNV-1a, no random seed), which
/// makes them suitable for grouping repeated failures in external tooling.
pub struct FingerprintConfig<'a> {
    pub(crate) error: &'a Error,
    pub(crate) include_title: bool,
    pub(crate) include_code: bool,
    pub(crate) include_message: bool,
    pub(crate) include_identifier: bool,
    pub(crate) extension_keys: Option<&'a [&'a str]>,
}

impl<'a> FingerprintConfig<'a> {
    pub(crate) fn new(error: &'a Error) -> Self {
        Self {
            error,
            include_title: true,
            include_code: true,
            include_message: true,
            include_identifier: false,
            extension_keys: None,
        }
    }

    /// Whether to include the title in the fingerprint (default: true).
    #[must_use]
    pub fn include_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Whether to include the error code in the fingerprint (default: true).
    #[must_use]
    pub fn include_code(mut self, include: bool) -> Self {
        self.include_code = include;
        self
    }

    /// Whether to include the message in the fingerprint (default: true).
    #[must_use]
    pub fn include_message(mut self, include: bool) -> Self {
        self.include_message = include;
        self
    }

    /// Whether to include the identifier in the fingerprint (default: false).
    ///
    /// Identifiers usually correlate a single occurrence, so including them
    /// defeats grouping.
    #[must_use]
    pub fn include_identifier(mut self, include: bool) -> Self {
        self.include_identifier = include;
        self
    }

    /// Includes the rendered values of these extensions, in sorted key order.
    #[must_use]
    pub fn include_extensions(mut self, keys: &'a [&'a str]) -> Self {
        self.extension_keys = Some(keys);
        self
    }

    /// Computes the fingerprint using the configured options.
    #[must_use]
    pub fn compute(&self) -> u64 {
        const FNV_OFFSET: u64 = 0xcbf29ce484222325;
        let mut hash = FNV_OFFSET;

        if self.include_title {
            hash_bytes(&mut hash, b"title:");
            hash_bytes(&mut hash, self.error.title().as_bytes());
        }

        if self.include_code {
            if let Some(code) = self.error.error_code() {
                hash_bytes(&mut hash, b"code:");
                hash_bytes(&mut hash, &code.to_le_bytes());
            }
        }

        if self.include_message {
            hash_bytes(&mut hash, b"msg:");
            hash_bytes(&mut hash, self.error.message().as_bytes());
        }

        if self.include_identifier {
            if let Some(identifier) = self.error.identifier() {
                hash_bytes(&mut hash, b"id:");
                hash_bytes(&mut hash, identifier.as_bytes());
            }
        }

        if let Some(keys) = self.extension_keys {
            let mut selected: Vec<_> = self
                .error
                .extensions()
                .iter()
                .filter(|(key, value)| keys.contains(key) && !value.is_error())
                .collect();
            selected.sort_unstable_by(|a, b| a.0.cmp(b.0));

            for (key, value) in selected {
                hash_bytes(&mut hash, b"ext:");
                hash_bytes(&mut hash, key.as_bytes());
                hash_bytes(&mut hash, b"=");
                let mut hasher = DisplayHasher { hash: &mut hash };
                let _ = write!(hasher, "{value}");
            }
        }

        hash
    }

    /// Computes the fingerprint and returns it as a hex string.
    #[must_use]
    pub fn compute_hex(&self) -> String {
        format!("{:016x}", self.compute())
    }
}

impl Error {
    /// Generates a grouping fingerprint from the title, code and message.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint_config().compute()
    }

    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        self.fingerprint_config().compute_hex()
    }

    /// Creates a fingerprint configuration for customizing fingerprint generation.
    #[must_use]
    pub fn fingerprint_config(&self) -> FingerprintConfig<'_> {
        FingerprintConfig::new(self)
    }
}

/// FNV-1a prime constant for 64-bit hash.
const FNV_PRIME: u64 = 0x100000001b3;

#[inline(always)]
fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for &byte in bytes {
        *hash ^= byte as u64;
        *hash = hash.wrapping_mul(FNV_PRIME);
    }
}

struct DisplayHasher<'a> {
    hash: &'a mut u64,
}

impl Write for DisplayHasher<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        hash_bytes(self.hash, s.as_bytes());
        Ok(())
    }
}

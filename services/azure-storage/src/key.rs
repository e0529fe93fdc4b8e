use std::fmt::{Debug, Formatter};

use sassy_core::hash::{base64_decode, base64_hmac_sha256};
use sassy_core::Error;
use zeroize::Zeroizing;

/// Decoded storage account key.
///
/// The key bytes are wiped from memory when the key is dropped and never
/// show up in `Debug` output.
#[derive(Clone)]
pub struct AccountKey(Zeroizing<Vec<u8>>);

impl AccountKey {
    /// Decode a base64 encoded account key, as shown in the portal.
    pub fn from_base64(account_key: &str) -> sassy_core::Result<Self> {
        let decoded = Zeroizing::new(base64_decode(account_key).map_err(|e| {
            Error::key_decoding("error decoding storage account key, must be base64 encoded")
                .with_source(e)
        })?);

        Ok(Self(decoded))
    }

    /// Wrap raw key bytes.
    pub fn from_bytes(account_key: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(account_key.into()))
    }

    /// Sign `string_to_sign` with HMAC-SHA256, returning the padded base64
    /// signature.
    pub fn sign(&self, string_to_sign: &str) -> String {
        base64_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }
}

impl Debug for AccountKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccountKey")
            .field(&format_args!("<{} bytes redacted>", self.0.len()))
            .finish()
    }
}

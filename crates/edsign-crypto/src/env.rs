//! # Environment Key Loading
//!
//! Container deployments inject secrets as environment variables. This
//! module reads a base64 key from a named variable and hands back the
//! decoded bytes.
//!
//! ```bash
//! export EDSIGN_PRIVATE_KEY="jXuOxIQo...Ux6iog=="   # 64 bytes, base64
//! export EDSIGN_PUBLIC_KEY="etNzO4s9...MeoqI="      # 32 bytes, base64
//! ```

use zeroize::Zeroizing;

use crate::encoding::decode_key;
use crate::error::CryptoError;

/// Default variable holding the base64 private key.
pub const PRIVATE_KEY_VAR: &str = "EDSIGN_PRIVATE_KEY";

/// Default variable holding the base64 public key.
pub const PUBLIC_KEY_VAR: &str = "EDSIGN_PUBLIC_KEY";

/// Read and decode the base64 key stored in `var_name`.
///
/// # Errors
///
/// - [`CryptoError::MissingKey`] if the variable is unset, empty, or not
///   valid unicode.
/// - [`CryptoError::KeyDecode`] if its value is not valid base64.
pub fn read_key_var(var_name: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let text = Zeroizing::new(std::env::var(var_name).map_err(|_| {
        CryptoError::MissingKey(format!("environment variable {var_name} not set"))
    })?);
    if text.trim().is_empty() {
        return Err(CryptoError::MissingKey(format!(
            "environment variable {var_name} is empty"
        )));
    }
    tracing::debug!(var = var_name, "loading key from environment");
    decode_key(&text)
}

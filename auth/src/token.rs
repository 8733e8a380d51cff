//! Session token generation.

use crate::constants::TOKEN_BYTES;
use rand::RngCore;

/// Generate a fresh session token.
///
/// 48 bytes from the thread-local CSPRNG, hex encoded to 96 lowercase
/// characters. Tokens carry no structure and are never derived from user
/// data.
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

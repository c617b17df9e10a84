use blake2::{Blake2b512, Digest};
use pos_common::Secret;

/// The digest under which a restaurant's access token is stored. Tokens themselves are never written to the database.
pub fn token_digest(token: &Secret<String>) -> String {
    hex::encode(Blake2b512::digest(token.reveal().as_bytes()))
}

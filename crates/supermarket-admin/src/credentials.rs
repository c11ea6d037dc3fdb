use md5::{Digest, Md5};

/// Hex MD5 digest of a password, the format the game server compares
/// against `users.password_hash` on login.
pub fn hash_password(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

//! Salted Argon2id credential hashing.
//!
//! Hashes are PHC strings carrying their own algorithm, parameters and salt,
//! so verification needs nothing but the stored string.

pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;

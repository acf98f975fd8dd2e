use thiserror::Error;

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building trust-declaration value types.
#[derive(Debug, Error)]
pub enum Error {
    /// The address is not a valid IPv4 or IPv6 literal.
    #[error("not a valid IPv4 or IPv6 address literal: {address}")]
    InvalidAddress {
        /// The rejected input.
        address: String,
    },
}

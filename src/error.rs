//! Error types for the XNO-core library.

use core::fmt;

/// Result type alias for XNO-core operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types that can occur in XNO-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid seed format or length.
    InvalidSeed,
    /// Invalid private key format or length.
    InvalidPrivateKey,
    /// Invalid public key format, length, or curve point.
    InvalidPublicKey,
    /// Invalid account address format or checksum.
    InvalidAccount(AccountError),
    /// Invalid block structure or missing fields.
    InvalidBlock(BlockError),
    /// Invalid signature format, or the signing key does not match the
    /// block's account.
    InvalidSignature,
    /// Invalid work value or insufficient difficulty.
    InvalidWork,
    /// Difficulty threshold of zero, or a non-positive work multiplier.
    InvalidDifficulty,
    /// Base32 or hex decoding error.
    BadEncoding(EncodingError),
    /// Work generation was cancelled before a nonce was found.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSeed => write!(f, "invalid seed: must be 32 bytes"),
            Error::InvalidPrivateKey => write!(f, "invalid private key: must be 32 bytes"),
            Error::InvalidPublicKey => write!(f, "invalid public key: must be 32 bytes"),
            Error::InvalidAccount(e) => write!(f, "invalid account: {}", e),
            Error::InvalidBlock(e) => write!(f, "invalid block: {}", e),
            Error::InvalidSignature => write!(f, "invalid signature"),
            Error::InvalidWork => write!(f, "invalid work: insufficient difficulty"),
            Error::InvalidDifficulty => write!(f, "invalid difficulty"),
            Error::BadEncoding(e) => write!(f, "bad encoding: {}", e),
            Error::Cancelled => write!(f, "work generation cancelled"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidAccount(e) => Some(e),
            Error::InvalidBlock(e) => Some(e),
            Error::BadEncoding(e) => Some(e),
            _ => None,
        }
    }
}

/// Account-specific error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    /// Invalid prefix (must be "nano_" or "xrb_").
    InvalidPrefix,
    /// Invalid length for account string.
    InvalidLength,
    /// Invalid base32 encoding.
    InvalidEncoding,
    /// Checksum mismatch.
    ChecksumMismatch,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::InvalidPrefix => write!(f, "invalid prefix (expected 'nano_' or 'xrb_')"),
            AccountError::InvalidLength => write!(f, "invalid length"),
            AccountError::InvalidEncoding => write!(f, "invalid base32 encoding"),
            AccountError::ChecksumMismatch => write!(f, "checksum mismatch"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AccountError {}

/// Block-specific error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockError {
    /// Missing required field.
    MissingField(&'static str),
    /// The field is not carried by this block variant.
    NoSuchField(&'static str),
    /// Balance is not a valid 128-bit unsigned decimal.
    InvalidBalance,
    /// Unknown block type string.
    UnknownVariant,
    /// The JSON document does not describe a block.
    Malformed,
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::MissingField(field) => write!(f, "missing required field: {}", field),
            BlockError::NoSuchField(field) => {
                write!(f, "field not present on this block variant: {}", field)
            }
            BlockError::InvalidBalance => write!(f, "invalid balance"),
            BlockError::UnknownVariant => write!(f, "unknown block type"),
            BlockError::Malformed => write!(f, "malformed block"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BlockError {}

/// Encoding error details, shared by the hex and base32 codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// Invalid character in the encoded string.
    InvalidCharacter,
    /// Invalid length for the encoded string.
    InvalidLength,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidCharacter => write!(f, "invalid character"),
            EncodingError::InvalidLength => write!(f, "invalid length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodingError {}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        match e {
            hex::FromHexError::InvalidHexCharacter { .. } => {
                Error::BadEncoding(EncodingError::InvalidCharacter)
            }
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                Error::BadEncoding(EncodingError::InvalidLength)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvalidSeed.to_string(),
            "invalid seed: must be 32 bytes"
        );
        assert_eq!(
            Error::InvalidAccount(AccountError::ChecksumMismatch).to_string(),
            "invalid account: checksum mismatch"
        );
        assert_eq!(
            Error::InvalidBlock(BlockError::MissingField("balance")).to_string(),
            "invalid block: missing required field: balance"
        );
        assert_eq!(Error::Cancelled.to_string(), "work generation cancelled");
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert_eq!(err, Error::BadEncoding(EncodingError::InvalidCharacter));

        let err: Error = hex::decode("abc").unwrap_err().into();
        assert_eq!(err, Error::BadEncoding(EncodingError::InvalidLength));
    }

    #[test]
    fn test_encoding_error_display() {
        assert_eq!(EncodingError::InvalidCharacter.to_string(), "invalid character");
        assert_eq!(EncodingError::InvalidLength.to_string(), "invalid length");
    }
}

//! Signing keys.
//!
//! Nano's signature scheme is Ed25519 with one substitution: every internal
//! hash is Blake2b-512 rather than SHA-512. A standard Ed25519 library will
//! therefore derive the wrong public keys and produce signatures the network
//! rejects; the group arithmetic here runs directly on curve25519.

use alloc::string::String;
use blake2::{Blake2b512, Digest};
use core::fmt;
use curve25519_dalek_ng::{
    constants::ED25519_BASEPOINT_TABLE, edwards::CompressedEdwardsY, scalar::Scalar,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::types::{Account, BlockHash, PublicKey, Signature};

/// Secret key (32 bytes).
///
/// Signs blocks on behalf of one account. Automatically zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        SecretKey(bytes)
    }

    /// Get as raw bytes.
    ///
    /// Note: handle with care, this exposes the secret key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from hex string (64 characters, either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidPrivateKey)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| Error::InvalidPrivateKey)?;
        Ok(SecretKey(arr))
    }

    /// Convert to hex string (64 characters, uppercase).
    ///
    /// Note: handle with care, this exposes the secret key.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        *KeyPair::from_secret_key(self.clone()).public_key()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

/// Ed25519-Blake2b keypair.
///
/// Holds the secret key together with the derived public key and the
/// expanded signing state, so repeated signing does not re-run the key
/// expansion.
#[derive(Clone)]
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
    /// The clamped signing scalar.
    scalar: Scalar,
    /// The expansion's second half, used for deterministic nonces.
    nonce_seed: [u8; 32],
}

impl KeyPair {
    /// Create a keypair from secret key bytes.
    pub fn from_private_key(private_key: [u8; 32]) -> Self {
        Self::from_secret_key(SecretKey(private_key))
    }

    /// Create a keypair from a secret key.
    ///
    /// The 64-byte Blake2b digest of the key is split in half: the first 32
    /// bytes, clamped, become the signing scalar; the second half seeds the
    /// deterministic signature nonce.
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let digest: [u8; 64] = Blake2b512::digest(secret_key.as_bytes()).into();

        let mut scalar_bytes: [u8; 32] = [0u8; 32];
        scalar_bytes.copy_from_slice(&digest[0..32]);
        scalar_bytes[0] &= 248;
        scalar_bytes[31] &= 127;
        scalar_bytes[31] |= 64;

        let mut nonce_seed = [0u8; 32];
        nonce_seed.copy_from_slice(&digest[32..64]);

        // The clamped bytes are used as-is, without reduction mod the group
        // order.
        let scalar = Scalar::from_bits(scalar_bytes);

        let public_point = &scalar * &ED25519_BASEPOINT_TABLE;
        let public_key = PublicKey::from_bytes(public_point.compress().to_bytes());

        KeyPair {
            secret_key,
            public_key,
            scalar,
            nonce_seed,
        }
    }

    /// Get the secret key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Get the account address for this keypair.
    pub fn account(&self) -> Account {
        self.public_key.to_account()
    }

    /// Sign a block hash.
    pub fn sign(&self, hash: &BlockHash) -> Signature {
        self.sign_message(hash.as_bytes())
    }

    /// Sign arbitrary data.
    ///
    /// Standard Ed25519 signing with Blake2b-512 in place of SHA-512:
    /// `r = H(nonce_seed || m)`, `R = rG`, `k = H(R || A || m)`,
    /// `s = r + k·a`, signature `(R, s)`.
    pub fn sign_message(&self, message: &[u8]) -> Signature {
        let mut hasher = Blake2b512::new();
        hasher.update(self.nonce_seed);
        hasher.update(message);
        let r_digest: [u8; 64] = hasher.finalize().into();
        let r = Scalar::from_bytes_mod_order_wide(&r_digest);

        let big_r = (&r * &ED25519_BASEPOINT_TABLE).compress().to_bytes();

        let mut hasher = Blake2b512::new();
        hasher.update(big_r);
        hasher.update(self.public_key.as_bytes());
        hasher.update(message);
        let k_digest: [u8; 64] = hasher.finalize().into();
        let k = Scalar::from_bytes_mod_order_wide(&k_digest);

        let s = r + k * self.scalar;

        let mut sig_bytes = [0u8; 64];
        sig_bytes[..32].copy_from_slice(&big_r);
        sig_bytes[32..].copy_from_slice(&s.to_bytes());
        Signature::from_bytes(sig_bytes)
    }

    /// Verify a signature made by this keypair's account.
    pub fn verify(&self, hash: &BlockHash, signature: &Signature) -> bool {
        Self::verify_with_public_key(&self.public_key, hash, signature)
    }

    /// Verify a signature over a block hash against a public key.
    ///
    /// Malformed signatures (non-canonical scalar, undecodable points) and
    /// honest mismatches both return `false`; the two cases are not
    /// distinguished.
    pub fn verify_with_public_key(
        public_key: &PublicKey,
        hash: &BlockHash,
        signature: &Signature,
    ) -> bool {
        Self::verify_message_with_public_key(public_key, hash.as_bytes(), signature)
    }

    /// Verify a signature over arbitrary data against a public key.
    pub fn verify_message_with_public_key(
        public_key: &PublicKey,
        message: &[u8],
        signature: &Signature,
    ) -> bool {
        let sig_bytes = signature.as_bytes();

        let mut r_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&sig_bytes[..32]);
        let r_point = match CompressedEdwardsY(r_bytes).decompress() {
            Some(p) => p,
            None => return false,
        };

        let mut s_bytes = [0u8; 32];
        s_bytes.copy_from_slice(&sig_bytes[32..]);
        // s must be a canonical scalar, reduced mod the group order.
        let s = Scalar::from_canonical_bytes(s_bytes);
        if s.is_none().into() {
            return false;
        }
        let s = s.unwrap();

        let a_point = match CompressedEdwardsY(*public_key.as_bytes()).decompress() {
            Some(p) => p,
            None => return false,
        };

        let mut hasher = Blake2b512::new();
        hasher.update(r_bytes);
        hasher.update(public_key.as_bytes());
        hasher.update(message);
        let k_digest: [u8; 64] = hasher.finalize().into();
        let k = Scalar::from_bytes_mod_order_wide(&k_digest);

        // s·G == R + k·A
        &s * &ED25519_BASEPOINT_TABLE == r_point + k * a_point
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl Zeroize for KeyPair {
    fn zeroize(&mut self) {
        self.secret_key.zeroize();
        self.nonce_seed.zeroize();
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

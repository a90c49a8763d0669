//! Accounts: a private key with its cached address

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sui_crypto::{
    CryptoError, IntentScope, PrivateKey, PublicKey, SerializedSignature, Signature,
    SignatureScheme,
};
use sui_primitives::SuiAddress;
use zeroize::{Zeroize, Zeroizing};

use crate::SdkError;

/// Signing account
///
/// Note: Clone is intentionally not implemented to prevent accidental key duplication.
/// Use `from_private_key` to create a new account with the same key if needed.
pub struct Account {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: SuiAddress,
}

impl Account {
    /// Create a new random account
    pub fn generate(scheme: SignatureScheme) -> Result<Self, SdkError> {
        Ok(Self::from_private_key(PrivateKey::generate(scheme)?))
    }

    /// Wrap an existing private key
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let address = public_key.address();
        Self {
            private_key,
            public_key,
            address,
        }
    }

    /// Create an account from 32 raw key bytes
    pub fn from_bytes(scheme: SignatureScheme, key: &[u8]) -> Result<Self, SdkError> {
        Ok(Self::from_private_key(PrivateKey::from_bytes(scheme, key)?))
    }

    /// Create an account from a hex-encoded private key
    ///
    /// Accepts "0x", "0X" or no prefix.
    pub fn from_hex(scheme: SignatureScheme, hex: &str) -> Result<Self, SdkError> {
        PrivateKey::from_hex(scheme, hex)
            .map(Self::from_private_key)
            .map_err(|e| match e {
                CryptoError::InvalidEncoding(msg) => SdkError::InvalidHex(msg),
                other => other.into(),
            })
    }

    /// Create an account from a base64-encoded private key
    pub fn from_base64(scheme: SignatureScheme, b64: &str) -> Result<Self, SdkError> {
        let bytes = Zeroizing::new(BASE64.decode(b64.trim())?);
        Self::from_bytes(scheme, &bytes)
    }

    /// The account's address
    pub fn address(&self) -> SuiAddress {
        self.address
    }

    /// The account's public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Signature scheme of the key
    pub fn scheme(&self) -> SignatureScheme {
        self.private_key.scheme()
    }

    /// Sign raw bytes, without intent wrapping
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.private_key.sign(message)
    }

    /// Sign BCS transaction bytes under the `TransactionData` intent
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> Result<SerializedSignature, SdkError> {
        let signature = self
            .private_key
            .sign_with_intent(IntentScope::TransactionData, tx_bytes);
        self.envelope(signature)
    }

    /// Sign a personal message under the `PersonalMessage` intent
    pub fn sign_personal_message(&self, message: &[u8]) -> Result<SerializedSignature, SdkError> {
        self.envelope(self.private_key.sign_personal_message(message))
    }

    fn envelope(&self, signature: Signature) -> Result<SerializedSignature, SdkError> {
        SerializedSignature::new(signature, &self.public_key)
            .map_err(|e| SdkError::SigningFailed(e.to_string()))
    }

    /// Verify a raw signature against this account's public key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(message, signature)
    }

    /// Export the private key as `0x` hex
    ///
    /// Never log, print, or transmit private keys in plaintext.
    pub fn export_private_key_hex(&self) -> Zeroizing<String> {
        self.private_key.to_hex()
    }

    /// Export the private key as base64
    pub fn export_private_key_base64(&self) -> Zeroizing<String> {
        self.private_key.to_base64()
    }

    /// Export the public key as `0x` hex
    pub fn export_public_key_hex(&self) -> String {
        self.public_key.to_hex()
    }

    /// Export the public key as base64
    pub fn export_public_key_base64(&self) -> String {
        self.public_key.to_base64()
    }

    /// Export as `flag || public key` base64, the form `sui keytool` prints
    pub fn export_sui_public_key(&self) -> String {
        self.public_key.to_sui_public_key()
    }

    /// Public description of the account. The private key is left out.
    pub fn export(&self) -> AccountExport {
        AccountExport {
            scheme: self.scheme().name().to_string(),
            private_key: None,
            public_key: self.export_public_key_hex(),
            address: self.address,
        }
    }

    /// Like [`export`](Self::export) but carrying the private key as hex.
    ///
    /// Only for writing to secure storage.
    pub fn export_with_private_key(&self) -> AccountExport {
        let mut export = self.export();
        export.private_key = Some(self.export_private_key_hex().to_string());
        export
    }

    /// Rebuild an account from an export that carries the private key.
    ///
    /// A present `address` must match the one the key derives.
    pub fn from_export(export: &AccountExport) -> Result<Self, SdkError> {
        let scheme: SignatureScheme = export
            .scheme
            .parse()
            .map_err(|e: CryptoError| SdkError::InvalidArgument(e.to_string()))?;
        let key = export
            .private_key
            .as_deref()
            .ok_or(SdkError::MissingField("private_key"))?;
        let account = Self::from_hex(scheme, key)?;
        if export.address != SuiAddress::ZERO && export.address != account.address {
            return Err(SdkError::InvalidArgument(format!(
                "exported address {} does not match the key",
                export.address
            )));
        }
        Ok(account)
    }
}

/// Serializable account record
///
/// `private_key` is only present when produced by
/// [`Account::export_with_private_key`]. It is wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountExport {
    /// Scheme name, e.g. `ed25519`
    pub scheme: String,
    /// `0x` hex private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// `0x` hex public key
    pub public_key: String,
    /// Derived address
    #[serde(default)]
    pub address: SuiAddress,
}

impl Drop for AccountExport {
    fn drop(&mut self) {
        if let Some(key) = self.private_key.as_mut() {
            key.zeroize();
        }
    }
}

impl std::fmt::Debug for AccountExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountExport")
            .field("scheme", &self.scheme)
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("scheme", &self.scheme())
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

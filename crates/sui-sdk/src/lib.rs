//! # sui-sdk
//!
//! Rust client SDK for the Sui blockchain.
//!
//! ## Features
//!
//! - **SuiClient**: JSON-RPC client (execute, dry run, object queries, wait for effects)
//! - **Account**: key management, transaction and personal-message signing
//! - **TransactionBuilder**: programmable transaction blocks with canonical BCS output
//! - **BuildSink**: injectable diagnostics for the builder
//! - **ClientConfig**: TOML configuration with network presets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sui_sdk::{Account, SuiClient, TransactionBuilder};
//! use sui_sdk::types::TransactionBlockResponseOptions;
//! use sui_crypto::SignatureScheme;
//! use sui_primitives::{ObjectRef, SuiAddress};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SuiClient::connect("https://fullnode.testnet.sui.io:443").await?;
//!     let account = Account::generate(SignatureScheme::Ed25519)?;
//!     let gas_coin = ObjectRef::parse(
//!         "0x5877400000000000000000000000000000000000000000000000000000000000",
//!         3619,
//!         "1thX6LZfHDZZGkq4tt1q2yRAPVfCTpX99XN4RHFsxM",
//!     )?;
//!
//!     // Split 1000 MIST off the gas coin and send it away
//!     let mut tx = TransactionBuilder::new();
//!     let coins = tx.split_coin_amounts(tx.gas_coin(), &[1000])?;
//!     tx.transfer_to(&[coins.nested(0)], SuiAddress::from_hex("0x2")?)?;
//!     tx.set_sender(account.address())
//!         .set_gas_budget(10_000_000)
//!         .set_gas_price(client.get_reference_gas_price().await?)
//!         .set_gas_payment(vec![gas_coin]);
//!
//!     let response = client
//!         .sign_and_execute(&tx, &account, TransactionBlockResponseOptions::with_effects())
//!         .await?;
//!     client
//!         .wait_for_transaction(&response.digest, Duration::from_secs(30), Duration::from_secs(1))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Signing a Personal Message
//!
//! ```rust
//! use sui_sdk::Account;
//! use sui_crypto::{hash_intent_message, personal_message_with_intent, SignatureScheme};
//!
//! let account = Account::from_hex(SignatureScheme::Ed25519, &"11".repeat(32)).unwrap();
//! let signature = account.sign_personal_message(b"hello").unwrap();
//! let digest = hash_intent_message(&personal_message_with_intent(b"hello"));
//! assert!(signature.verify(&digest));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod account;
mod client;
pub mod config;
pub mod diagnostics;
mod error;
pub mod pure;
pub mod telemetry;
mod transport;
mod tx_builder;
pub mod types;

// Re-export main types
pub use account::{Account, AccountExport};
pub use client::SuiClient;
pub use config::{ClientConfig, LogConfig, Network};
pub use diagnostics::{BuildEvent, BuildSink, RecordingSink, TracingSink};
pub use error::SdkError;
pub use pure::PureValue;
pub use transport::{MockTransport, MOCK_CHAIN_IDENTIFIER, MOCK_REFERENCE_GAS_PRICE};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use tx_builder::{BuilderInput, ObjectInput, ResultHandle, TransactionBuilder};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export the types callers need most
pub use sui_crypto::{PrivateKey, PublicKey, SerializedSignature, Signature, SignatureScheme};
pub use sui_primitives::{ObjectDigest, ObjectID, ObjectRef, SuiAddress, TransactionDigest, U256};
pub use sui_types::{Argument, Command, TransactionData};

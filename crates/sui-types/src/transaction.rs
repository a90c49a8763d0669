//! Transaction data and its canonical BCS layout

use serde::{Deserialize, Serialize};
use sui_bcs::BcsError;
use sui_crypto::blake2b256_concat;
use sui_primitives::{EpochId, ObjectID, ObjectRef, SuiAddress, TransactionDigest};

use crate::{CallArg, Command};

/// Domain separator hashed in front of transaction bytes
pub const TRANSACTION_DATA_DIGEST_PREFIX: &[u8] = b"TransactionData::";

/// Ordered inputs and commands
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    /// Inputs referenced by `Argument::Input`
    pub inputs: Vec<CallArg>,
    /// Commands, executed in order
    pub commands: Vec<Command>,
}

/// Kind of transaction; only programmable transactions are built here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Programmable transaction block
    ProgrammableTransaction(ProgrammableTransaction),
}

/// Gas configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    /// Coins paying for gas
    pub payment: Vec<ObjectRef>,
    /// Owner of the gas coins
    pub owner: SuiAddress,
    /// Gas price
    pub price: u64,
    /// Gas budget
    pub budget: u64,
}

/// When a transaction stops being valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionExpiration {
    /// Never expires
    #[default]
    None,
    /// Invalid after the given epoch
    Epoch(EpochId),
}

/// Version 1 transaction data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    /// What the transaction does
    pub kind: TransactionKind,
    /// Signer
    pub sender: SuiAddress,
    /// Gas configuration
    pub gas_data: GasData,
    /// Expiration
    pub expiration: TransactionExpiration,
}

/// Versioned transaction data, the unit that gets signed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    /// Version 1
    V1(TransactionDataV1),
}

impl TransactionData {
    /// Programmable transaction whose gas is owned by the sender
    pub fn new_programmable(
        sender: SuiAddress,
        payment: Vec<ObjectRef>,
        pt: ProgrammableTransaction,
        budget: u64,
        price: u64,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(pt),
            sender,
            gas_data: GasData {
                payment,
                owner: sender,
                price,
                budget,
            },
            expiration: TransactionExpiration::None,
        })
    }

    fn v1(&self) -> &TransactionDataV1 {
        match self {
            TransactionData::V1(v1) => v1,
        }
    }

    /// Sender
    pub fn sender(&self) -> SuiAddress {
        self.v1().sender
    }

    /// Gas configuration
    pub fn gas_data(&self) -> &GasData {
        &self.v1().gas_data
    }

    /// Expiration
    pub fn expiration(&self) -> TransactionExpiration {
        self.v1().expiration
    }

    /// The programmable transaction body
    pub fn programmable(&self) -> &ProgrammableTransaction {
        match &self.v1().kind {
            TransactionKind::ProgrammableTransaction(pt) => pt,
        }
    }

    /// Object ids of every object input
    pub fn input_objects(&self) -> Vec<ObjectID> {
        self.programmable()
            .inputs
            .iter()
            .filter_map(CallArg::object_id)
            .collect()
    }

    /// Canonical BCS bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, BcsError> {
        sui_bcs::to_bytes(self)
    }

    /// Decode canonical BCS bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BcsError> {
        sui_bcs::from_bytes(bytes)
    }

    /// BLAKE2b-256 of `"TransactionData::" || bcs`
    pub fn digest(&self) -> Result<TransactionDigest, BcsError> {
        Ok(digest_of_bytes(&self.to_bytes()?))
    }
}

/// Digest of already serialized transaction bytes
pub fn digest_of_bytes(tx_bytes: &[u8]) -> TransactionDigest {
    TransactionDigest::from_bytes(blake2b256_concat(&[TRANSACTION_DATA_DIGEST_PREFIX, tx_bytes]))
}

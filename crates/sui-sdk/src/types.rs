//! JSON-RPC request options and response types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sui_primitives::{ObjectDigest, ObjectID, ObjectRef, SequenceNumber, SuiAddress, TransactionDigest};

/// Sui encodes u64 values as decimal strings; accept numbers too.
pub(crate) fn u64_from_str_or_num<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(u64),
        Str(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(n) => Ok(n),
        Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn opt_u64_from_str_or_num<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "u64_from_str_or_num")] u64);

    Ok(Option::<Wrap>::deserialize(deserializer)?.map(|Wrap(n)| n))
}

// ==================== Options ====================

/// What a transaction response should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionBlockResponseOptions {
    /// Transaction input
    pub show_input: bool,
    /// BCS input bytes
    pub show_raw_input: bool,
    /// Effects
    pub show_effects: bool,
    /// Events
    pub show_events: bool,
    /// Object changes
    pub show_object_changes: bool,
    /// Balance changes
    pub show_balance_changes: bool,
    /// BCS effects bytes
    pub show_raw_effects: bool,
}

impl TransactionBlockResponseOptions {
    /// Nothing beyond the digest
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects only
    pub fn with_effects() -> Self {
        Self {
            show_effects: true,
            ..Self::default()
        }
    }

    /// Everything except raw bytes
    pub fn full() -> Self {
        Self {
            show_input: true,
            show_effects: true,
            show_events: true,
            show_object_changes: true,
            show_balance_changes: true,
            ..Self::default()
        }
    }
}

/// What an object response should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectDataOptions {
    /// Move type
    pub show_type: bool,
    /// Owner
    pub show_owner: bool,
    /// Last transaction that touched the object
    pub show_previous_transaction: bool,
    /// Display metadata
    pub show_display: bool,
    /// Parsed Move content
    pub show_content: bool,
    /// BCS bytes
    pub show_bcs: bool,
    /// Storage rebate
    pub show_storage_rebate: bool,
}

impl ObjectDataOptions {
    /// Only id, version and digest
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the owner
    pub fn with_owner(mut self) -> Self {
        self.show_owner = true;
        self
    }

    /// Include the Move type
    pub fn with_type(mut self) -> Self {
        self.show_type = true;
        self
    }

    /// Include the parsed content
    pub fn with_content(mut self) -> Self {
        self.show_content = true;
        self
    }
}

// ==================== Objects ====================

/// Object ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Owned by an address
    AddressOwner(SuiAddress),
    /// Owned by another object
    ObjectOwner(SuiAddress),
    /// Shared, sequenced by consensus
    Shared {
        /// Version at which the object became shared
        #[serde(deserialize_with = "u64_from_str_or_num")]
        initial_shared_version: SequenceNumber,
    },
    /// Frozen
    Immutable,
}

/// Object as returned by `sui_getObject`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    /// Object id
    pub object_id: ObjectID,
    /// Current version
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: SequenceNumber,
    /// Current digest
    pub digest: ObjectDigest,
    /// Move type
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    /// Owner
    #[serde(default)]
    pub owner: Option<Owner>,
    /// Last transaction that touched the object
    #[serde(default)]
    pub previous_transaction: Option<TransactionDigest>,
    /// Storage rebate
    #[serde(default, deserialize_with = "opt_u64_from_str_or_num")]
    pub storage_rebate: Option<u64>,
    /// Parsed Move content
    #[serde(default)]
    pub content: Option<Value>,
}

impl ObjectData {
    /// Reference at the current version
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef::new(self.object_id, self.version, self.digest)
    }
}

/// Why an object could not be returned
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectResponseError {
    /// Error code such as `notExists` or `deleted`
    pub code: String,
    /// Object id, when the node reports it
    #[serde(default)]
    pub object_id: Option<ObjectID>,
}

/// One entry of an object query
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectResponse {
    /// Object, if found
    #[serde(default)]
    pub data: Option<ObjectData>,
    /// Error, if not found
    #[serde(default)]
    pub error: Option<ObjectResponseError>,
}

// ==================== Transactions ====================

/// Execution status inside effects
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionStatus {
    /// `success` or `failure`
    pub status: String,
    /// Abort reason on failure
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecutionStatus {
    /// True if the transaction executed successfully
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Gas charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    /// Computation cost
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub computation_cost: u64,
    /// Storage cost
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_cost: u64,
    /// Storage rebate
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_rebate: u64,
    /// Non-refundable storage fee
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub non_refundable_storage_fee: u64,
}

impl GasCostSummary {
    /// Net gas paid
    pub fn net_gas_usage(&self) -> i128 {
        i128::from(self.computation_cost) + i128::from(self.storage_cost)
            - i128::from(self.storage_rebate)
    }
}

/// Transaction effects
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    /// Execution status
    pub status: ExecutionStatus,
    /// Gas charged
    #[serde(default)]
    pub gas_used: Option<GasCostSummary>,
    /// Digest of the transaction
    #[serde(default)]
    pub transaction_digest: Option<TransactionDigest>,
    /// Executed epoch
    #[serde(default, deserialize_with = "opt_u64_from_str_or_num")]
    pub executed_epoch: Option<u64>,
    /// Created objects
    #[serde(default)]
    pub created: Vec<Value>,
    /// Mutated objects
    #[serde(default)]
    pub mutated: Vec<Value>,
    /// Deleted objects
    #[serde(default)]
    pub deleted: Vec<Value>,
    /// Transactions this one depends on
    #[serde(default)]
    pub dependencies: Vec<TransactionDigest>,
}

/// Change to a coin balance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    /// Owner, in the node's owner encoding
    pub owner: Value,
    /// Coin type
    pub coin_type: String,
    /// Signed amount as a decimal string
    pub amount: String,
}

/// Change to an object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    /// `created`, `mutated`, `deleted`, `published`, ...
    #[serde(rename = "type")]
    pub change_type: String,
    /// Transaction sender
    #[serde(default)]
    pub sender: Option<SuiAddress>,
    /// Object id
    #[serde(default)]
    pub object_id: Option<ObjectID>,
    /// Move type
    #[serde(default)]
    pub object_type: Option<String>,
    /// New version
    #[serde(default, deserialize_with = "opt_u64_from_str_or_num")]
    pub version: Option<u64>,
    /// New digest
    #[serde(default)]
    pub digest: Option<ObjectDigest>,
}

/// Response of `sui_executeTransactionBlock` and `sui_getTransactionBlock`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    /// Transaction digest
    pub digest: TransactionDigest,
    /// Effects, once executed and requested
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
    /// Events
    #[serde(default)]
    pub events: Option<Vec<Value>>,
    /// Object changes
    #[serde(default)]
    pub object_changes: Option<Vec<ObjectChange>>,
    /// Balance changes
    #[serde(default)]
    pub balance_changes: Option<Vec<BalanceChange>>,
    /// Checkpoint timestamp
    #[serde(default, deserialize_with = "opt_u64_from_str_or_num")]
    pub timestamp_ms: Option<u64>,
    /// Checkpoint sequence number
    #[serde(default, deserialize_with = "opt_u64_from_str_or_num")]
    pub checkpoint: Option<u64>,
    /// Whether the node executed locally before answering
    #[serde(default)]
    pub confirmed_local_execution: Option<bool>,
    /// Errors reported alongside the response
    #[serde(default)]
    pub errors: Vec<String>,
}

impl TransactionBlockResponse {
    /// True if effects are present and report success
    pub fn is_success(&self) -> bool {
        self.effects
            .as_ref()
            .is_some_and(|effects| effects.status.is_success())
    }
}

/// Response of `sui_dryRunTransactionBlock`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunTransactionBlockResponse {
    /// Simulated effects
    pub effects: TransactionEffects,
    /// Simulated events
    #[serde(default)]
    pub events: Vec<Value>,
    /// Decoded input
    #[serde(default)]
    pub input: Option<Value>,
    /// Object changes
    #[serde(default)]
    pub object_changes: Vec<ObjectChange>,
    /// Balance changes
    #[serde(default)]
    pub balance_changes: Vec<BalanceChange>,
}

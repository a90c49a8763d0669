//! Transaction inputs as they appear on the wire

use serde::{Deserialize, Serialize};
use sui_primitives::{ObjectID, ObjectRef, SequenceNumber};

/// A resolved transaction input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallArg {
    /// BCS bytes of a pure value
    Pure(Vec<u8>),
    /// Object input
    Object(ObjectArg),
}

/// How an object is passed to a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectArg {
    /// Owned or immutable object at an exact version
    ImmOrOwnedObject(ObjectRef),
    /// Shared object, sequenced by consensus
    SharedObject {
        /// Object id
        id: ObjectID,
        /// Version at which the object became shared
        initial_shared_version: SequenceNumber,
        /// Whether the transaction takes it by `&mut`
        mutable: bool,
    },
    /// Object sent to another object, to be received
    Receiving(ObjectRef),
}

impl ObjectArg {
    /// Id of the referenced object
    pub fn id(&self) -> ObjectID {
        match self {
            ObjectArg::ImmOrOwnedObject(r) | ObjectArg::Receiving(r) => r.object_id,
            ObjectArg::SharedObject { id, .. } => *id,
        }
    }
}

impl CallArg {
    /// Object id, if this is an object input
    pub fn object_id(&self) -> Option<ObjectID> {
        match self {
            CallArg::Pure(_) => None,
            CallArg::Object(obj) => Some(obj.id()),
        }
    }
}

//! # sui-types
//!
//! Programmable transaction types for the Sui SDK.
//!
//! This crate provides:
//! - [`TypeTag`] - Move type tags, parsed from strings
//! - [`Argument`], [`CallArg`] and [`Command`] - the pieces of a programmable transaction
//! - [`TransactionData`] - the signed unit, with its canonical BCS layout and digest

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod argument;
pub mod call_arg;
pub mod command;
mod error;
pub mod identifier;
pub mod transaction;
pub mod type_tag;

// Re-export commonly used types
pub use argument::Argument;
pub use call_arg::{CallArg, ObjectArg};
pub use command::{parse_move_target, Command, ProgrammableMoveCall};
pub use error::TypesError;
pub use transaction::{
    digest_of_bytes, GasData, ProgrammableTransaction, TransactionData, TransactionDataV1, TransactionExpiration,
    TransactionKind,
};
pub use type_tag::{StructTag, TypeTag};

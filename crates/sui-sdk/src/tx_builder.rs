//! Programmable transaction builder
//!
//! Inputs and commands accumulate in declaration order. Every argument is
//! checked against what already exists when a command is added, so forward
//! references never get in. Gas fields and object references are checked
//! once more by [`TransactionBuilder::build`], which leaves the builder
//! untouched on failure.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sui_primitives::{ObjectDigest, ObjectID, ObjectRef, SequenceNumber, SuiAddress};
use sui_types::{
    Argument, CallArg, Command, GasData, ObjectArg, ProgrammableMoveCall,
    ProgrammableTransaction, TransactionData, TransactionDataV1, TransactionExpiration,
    TransactionKind, TypeTag,
};

use crate::diagnostics::{BuildEvent, BuildSink, TracingSink};
use crate::pure::PureValue;
use crate::types::{ObjectDataOptions, Owner};
use crate::{SdkError, SuiClient};

/// Object input as tracked by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectInput {
    /// Only the id is known
    Unresolved(ObjectID),
    /// Ready to serialize
    Resolved(ObjectArg),
}

impl ObjectInput {
    /// Object id
    pub fn id(&self) -> ObjectID {
        match self {
            ObjectInput::Unresolved(id) => *id,
            ObjectInput::Resolved(arg) => arg.id(),
        }
    }

    /// True once version and digest (or the shared version) are known
    pub fn is_resolved(&self) -> bool {
        matches!(self, ObjectInput::Resolved(_))
    }
}

/// One transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderInput {
    /// Serialized pure value
    Pure {
        /// BCS bytes
        bytes: Vec<u8>,
        /// Move type, unknown for inputs decoded from bytes
        type_name: Option<String>,
    },
    /// Object reference
    Object(ObjectInput),
}

impl BuilderInput {
    fn to_call_arg(&self, index: u16) -> Result<CallArg, SdkError> {
        match self {
            BuilderInput::Pure { bytes, .. } => Ok(CallArg::Pure(bytes.clone())),
            BuilderInput::Object(ObjectInput::Resolved(arg)) => Ok(CallArg::Object(*arg)),
            BuilderInput::Object(ObjectInput::Unresolved(object_id)) => {
                Err(SdkError::UnresolvedObject {
                    index,
                    object_id: *object_id,
                })
            }
        }
    }
}

/// Handle to the result of an added command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultHandle(u16);

impl ResultHandle {
    /// Index of the command
    pub fn index(&self) -> u16 {
        self.0
    }

    /// The whole result
    pub fn single(&self) -> Argument {
        Argument::Result(self.0)
    }

    /// One value of a multi-value result. The arity is only known on chain.
    pub fn nested(&self, index: u16) -> Argument {
        Argument::NestedResult(self.0, index)
    }
}

impl From<ResultHandle> for Argument {
    fn from(handle: ResultHandle) -> Self {
        handle.single()
    }
}

enum Merge {
    Keep,
    Replace(ObjectInput),
    Conflict,
}

// Decide what happens when `incoming` names an object that is already an input.
fn merge_object(existing: &ObjectInput, incoming: &ObjectInput) -> Merge {
    use ObjectArg::*;

    let (existing, incoming) = match (existing, incoming) {
        (_, ObjectInput::Unresolved(_)) => return Merge::Keep,
        (ObjectInput::Unresolved(_), resolved) => return Merge::Replace(*resolved),
        (ObjectInput::Resolved(a), ObjectInput::Resolved(b)) => (a, b),
    };

    match (existing, incoming) {
        (ImmOrOwnedObject(a) | Receiving(a), ImmOrOwnedObject(b) | Receiving(b)) if a == b => {
            Merge::Keep
        }
        (
            SharedObject {
                id,
                initial_shared_version: v1,
                mutable: m1,
            },
            SharedObject {
                initial_shared_version: v2,
                mutable: m2,
                ..
            },
        ) if v1 == v2 => {
            if *m1 || !*m2 {
                Merge::Keep
            } else {
                Merge::Replace(ObjectInput::Resolved(SharedObject {
                    id: *id,
                    initial_shared_version: *v1,
                    mutable: true,
                }))
            }
        }
        _ => Merge::Conflict,
    }
}

/// Programmable transaction builder
///
/// ```rust
/// use sui_sdk::TransactionBuilder;
/// use sui_primitives::{ObjectRef, SuiAddress};
///
/// # fn main() -> Result<(), sui_sdk::SdkError> {
/// let sender = SuiAddress::from_hex("0x1")?;
/// let coin = ObjectRef::parse(
///     "0x5877400000000000000000000000000000000000000000000000000000000000",
///     3619,
///     "1thX6LZfHDZZGkq4tt1q2yRAPVfCTpX99XN4RHFsxM",
/// )?;
///
/// let mut tx = TransactionBuilder::new();
/// let amount = tx.pure(1000u64)?;
/// let coin_arg = tx.gas_coin();
/// let split = tx.split_coins(coin_arg, &[amount])?;
/// let recipient = tx.pure(sender)?;
/// tx.transfer_objects(&[split.nested(0)], recipient)?;
/// tx.set_sender(sender)
///     .set_gas_budget(10_000_000)
///     .set_gas_price(1000)
///     .set_gas_payment(vec![coin]);
///
/// let bytes = tx.build()?;
/// assert_eq!(bytes[0], 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TransactionBuilder {
    inputs: Vec<BuilderInput>,
    commands: Vec<Command>,
    pure_index: HashMap<(Vec<u8>, Option<String>), u16>,
    object_index: HashMap<ObjectID, u16>,
    strict: bool,
    sender: Option<SuiAddress>,
    gas_budget: Option<u64>,
    gas_price: Option<u64>,
    gas_payment: Option<Vec<ObjectRef>>,
    gas_owner: Option<SuiAddress>,
    expiration: Option<TransactionExpiration>,
    sink: Arc<dyn BuildSink>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    /// Create an empty builder that logs diagnostics through `tracing`
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            commands: Vec::new(),
            pure_index: HashMap::new(),
            object_index: HashMap::new(),
            strict: false,
            sender: None,
            gas_budget: None,
            gas_price: None,
            gas_payment: None,
            gas_owner: None,
            expiration: None,
            sink: Arc::new(TracingSink),
        }
    }

    /// Create a builder that refuses to build a transaction with no commands
    pub fn new_strict() -> Self {
        Self {
            strict: true,
            ..Self::new()
        }
    }

    /// Report diagnostics to `sink` instead of `tracing`
    pub fn with_sink(mut self, sink: Arc<dyn BuildSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Turn strict mode on or off
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Rebuild a builder from serialized `TransactionData`
    ///
    /// Pure inputs come back without their Move type names.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SdkError> {
        let data = TransactionData::from_bytes(bytes)?;
        Self::from_data(data)
    }

    /// Rebuild a builder from typed transaction data
    pub fn from_data(data: TransactionData) -> Result<Self, SdkError> {
        let TransactionData::V1(v1) = data;
        let TransactionKind::ProgrammableTransaction(pt) = v1.kind;

        // Inputs are taken as-is so indices survive even if the encoder
        // did not deduplicate.
        let mut builder = Self::new();
        for input in pt.inputs {
            let index = builder.next_input_index()?;
            match input {
                CallArg::Pure(bytes) => {
                    builder.pure_index.entry((bytes.clone(), None)).or_insert(index);
                    builder.inputs.push(BuilderInput::Pure {
                        bytes,
                        type_name: None,
                    });
                }
                CallArg::Object(arg) => {
                    builder.object_index.entry(arg.id()).or_insert(index);
                    builder
                        .inputs
                        .push(BuilderInput::Object(ObjectInput::Resolved(arg)));
                }
            }
        }
        for command in pt.commands {
            builder.command(command)?;
        }

        builder.sender = Some(v1.sender);
        builder.gas_budget = Some(v1.gas_data.budget);
        builder.gas_price = Some(v1.gas_data.price);
        builder.gas_payment = Some(v1.gas_data.payment);
        if v1.gas_data.owner != v1.sender {
            builder.gas_owner = Some(v1.gas_data.owner);
        }
        builder.expiration = Some(v1.expiration);
        Ok(builder)
    }

    // ==================== Accessors ====================

    /// Inputs in declaration order
    pub fn inputs(&self) -> &[BuilderInput] {
        &self.inputs
    }

    /// Commands in declaration order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Sender, if set
    pub fn sender(&self) -> Option<SuiAddress> {
        self.sender
    }

    /// Whether an empty transaction is an error
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Object inputs still missing a version and digest, with their input index
    pub fn unresolved_objects(&self) -> Vec<(u16, ObjectID)> {
        self.inputs
            .iter()
            .enumerate()
            .filter_map(|(i, input)| match input {
                BuilderInput::Object(ObjectInput::Unresolved(id)) => Some((i as u16, *id)),
                _ => None,
            })
            .collect()
    }

    // ==================== Setters ====================

    fn note_overwrite(&self, field: &'static str, was_set: bool) {
        if was_set {
            self.sink.emit(BuildEvent::FieldOverwritten { field });
        }
    }

    /// Set the sender
    pub fn set_sender(&mut self, sender: SuiAddress) -> &mut Self {
        self.note_overwrite("sender", self.sender.is_some());
        self.sender = Some(sender);
        self
    }

    /// Set the gas budget
    pub fn set_gas_budget(&mut self, budget: u64) -> &mut Self {
        self.note_overwrite("gas_budget", self.gas_budget.is_some());
        self.gas_budget = Some(budget);
        self
    }

    /// Set the gas price
    pub fn set_gas_price(&mut self, price: u64) -> &mut Self {
        self.note_overwrite("gas_price", self.gas_price.is_some());
        self.gas_price = Some(price);
        self
    }

    /// Set the coins paying for gas
    pub fn set_gas_payment(&mut self, payment: Vec<ObjectRef>) -> &mut Self {
        self.note_overwrite("gas_payment", self.gas_payment.is_some());
        self.gas_payment = Some(payment);
        self
    }

    /// Set the owner of the gas coins. Defaults to the sender.
    pub fn set_gas_owner(&mut self, owner: SuiAddress) -> &mut Self {
        self.note_overwrite("gas_owner", self.gas_owner.is_some());
        self.gas_owner = Some(owner);
        self
    }

    /// Expire the transaction after `epoch`
    pub fn set_expiration_epoch(&mut self, epoch: u64) -> &mut Self {
        self.note_overwrite("expiration", self.expiration.is_some());
        self.expiration = Some(TransactionExpiration::Epoch(epoch));
        self
    }

    /// Never expire (the default)
    pub fn set_no_expiration(&mut self) -> &mut Self {
        self.note_overwrite("expiration", self.expiration.is_some());
        self.expiration = Some(TransactionExpiration::None);
        self
    }

    // ==================== Inputs ====================

    fn next_input_index(&self) -> Result<u16, SdkError> {
        u16::try_from(self.inputs.len()).map_err(|_| {
            SdkError::InvalidArgument(format!("more than {} inputs", u16::MAX))
        })
    }

    fn intern_pure(&mut self, bytes: Vec<u8>, type_name: Option<String>) -> Result<Argument, SdkError> {
        let key = (bytes, type_name);
        if let Some(&index) = self.pure_index.get(&key) {
            return Ok(Argument::Input(index));
        }

        let index = self.next_input_index()?;
        let (bytes, type_name) = key.clone();
        self.inputs.push(BuilderInput::Pure { bytes, type_name });
        self.pure_index.insert(key, index);
        Ok(Argument::Input(index))
    }

    fn intern_object(&mut self, input: ObjectInput) -> Result<Argument, SdkError> {
        let id = input.id();
        let Some(&index) = self.object_index.get(&id) else {
            let index = self.next_input_index()?;
            self.inputs.push(BuilderInput::Object(input));
            self.object_index.insert(id, index);
            return Ok(Argument::Input(index));
        };

        let BuilderInput::Object(existing) = &mut self.inputs[usize::from(index)] else {
            return Err(SdkError::InvalidArgument(format!(
                "input {} is indexed as object {} but holds a pure value",
                index, id
            )));
        };

        match merge_object(existing, &input) {
            Merge::Keep => {}
            Merge::Replace(merged) => {
                let was_unresolved = !existing.is_resolved();
                *existing = merged;
                if was_unresolved {
                    self.sink.emit(BuildEvent::ObjectResolved {
                        index,
                        object_id: id,
                    });
                }
            }
            Merge::Conflict => return Err(SdkError::ConflictingObject(id)),
        }
        Ok(Argument::Input(index))
    }

    /// Add a pure value, reusing an identical earlier input
    pub fn pure<T: PureValue>(&mut self, value: T) -> Result<Argument, SdkError> {
        let bytes = value.to_pure_bytes()?;
        self.intern_pure(bytes, Some(T::move_type()))
    }

    /// Add pre-serialized BCS bytes declared as `type_name`
    pub fn pure_bytes(&mut self, bytes: impl Into<Vec<u8>>, type_name: &str) -> Result<Argument, SdkError> {
        self.intern_pure(bytes.into(), Some(type_name.to_string()))
    }

    /// Add an owned or immutable object. Version and digest may come later.
    pub fn object(
        &mut self,
        id: ObjectID,
        version: Option<SequenceNumber>,
        digest: Option<ObjectDigest>,
    ) -> Result<Argument, SdkError> {
        match (version, digest) {
            (Some(version), Some(digest)) => self.object_ref(ObjectRef::new(id, version, digest)),
            (None, None) => self.object_id(id),
            _ => Err(SdkError::InvalidArgument(format!(
                "object {}: version and digest must be given together",
                id
            ))),
        }
    }

    /// Add an owned or immutable object by full reference
    pub fn object_ref(&mut self, object_ref: ObjectRef) -> Result<Argument, SdkError> {
        self.intern_object(ObjectInput::Resolved(ObjectArg::ImmOrOwnedObject(object_ref)))
    }

    /// Add an object by id alone, to be resolved before building
    pub fn object_id(&mut self, id: ObjectID) -> Result<Argument, SdkError> {
        self.intern_object(ObjectInput::Unresolved(id))
    }

    /// Add a shared object
    pub fn shared_object(
        &mut self,
        id: ObjectID,
        initial_shared_version: SequenceNumber,
        mutable: bool,
    ) -> Result<Argument, SdkError> {
        self.intern_object(ObjectInput::Resolved(ObjectArg::SharedObject {
            id,
            initial_shared_version,
            mutable,
        }))
    }

    /// Add an object to be received
    pub fn receiving_ref(&mut self, object_ref: ObjectRef) -> Result<Argument, SdkError> {
        self.intern_object(ObjectInput::Resolved(ObjectArg::Receiving(object_ref)))
    }

    /// The gas coin
    pub fn gas_coin(&self) -> Argument {
        Argument::GasCoin
    }

    // ==================== Commands ====================

    fn check_argument(&self, arg: Argument) -> Result<(), SdkError> {
        match arg {
            Argument::GasCoin => Ok(()),
            Argument::Input(i) if usize::from(i) < self.inputs.len() => Ok(()),
            Argument::Input(i) => Err(SdkError::InvalidArgument(format!(
                "Input({}) out of range: {} inputs",
                i,
                self.inputs.len()
            ))),
            Argument::Result(c) | Argument::NestedResult(c, _) => {
                if usize::from(c) < self.commands.len() {
                    Ok(())
                } else {
                    Err(SdkError::InvalidArgument(format!(
                        "{} refers to command {} but only {} exist",
                        arg,
                        c,
                        self.commands.len()
                    )))
                }
            }
        }
    }

    /// Add any command after checking its arguments
    pub fn command(&mut self, command: Command) -> Result<ResultHandle, SdkError> {
        for arg in command.arguments() {
            self.check_argument(arg)?;
        }
        let index = u16::try_from(self.commands.len()).map_err(|_| {
            SdkError::InvalidArgument(format!("more than {} commands", u16::MAX))
        })?;
        self.commands.push(command);
        Ok(ResultHandle(index))
    }

    /// Call `package::module::function`
    pub fn move_call(
        &mut self,
        target: &str,
        arguments: &[Argument],
        type_arguments: &[&str],
    ) -> Result<ResultHandle, SdkError> {
        let type_arguments = type_arguments
            .iter()
            .map(|t| TypeTag::parse(t))
            .collect::<Result<Vec<_>, _>>()?;
        let call = ProgrammableMoveCall::new(target, type_arguments, arguments.to_vec())?;
        self.command(Command::MoveCall(Box::new(call)))
    }

    /// Send objects to `recipient`
    pub fn transfer_objects(
        &mut self,
        objects: &[Argument],
        recipient: impl Into<Argument>,
    ) -> Result<ResultHandle, SdkError> {
        if objects.is_empty() {
            return Err(SdkError::InvalidArgument(
                "transfer_objects needs at least one object".to_string(),
            ));
        }
        self.command(Command::TransferObjects(objects.to_vec(), recipient.into()))
    }

    /// Send objects to an address, adding it as a pure input
    pub fn transfer_to(
        &mut self,
        objects: &[Argument],
        recipient: SuiAddress,
    ) -> Result<ResultHandle, SdkError> {
        let recipient = self.pure(recipient)?;
        self.transfer_objects(objects, recipient)
    }

    /// Split `amounts` off `coin`
    pub fn split_coins(
        &mut self,
        coin: impl Into<Argument>,
        amounts: &[Argument],
    ) -> Result<ResultHandle, SdkError> {
        self.command(Command::SplitCoins(coin.into(), amounts.to_vec()))
    }

    /// Split u64 amounts off `coin`, adding each as a pure input
    pub fn split_coin_amounts(
        &mut self,
        coin: impl Into<Argument>,
        amounts: &[u64],
    ) -> Result<ResultHandle, SdkError> {
        let coin = coin.into();
        let amounts = amounts
            .iter()
            .map(|amount| self.pure(*amount))
            .collect::<Result<Vec<_>, _>>()?;
        self.split_coins(coin, &amounts)
    }

    /// Merge `sources` into `destination`
    pub fn merge_coins(
        &mut self,
        destination: impl Into<Argument>,
        sources: &[Argument],
    ) -> Result<ResultHandle, SdkError> {
        if sources.is_empty() {
            return Err(SdkError::InvalidArgument(
                "merge_coins needs at least one source".to_string(),
            ));
        }
        self.command(Command::MergeCoins(destination.into(), sources.to_vec()))
    }

    /// Publish compiled modules
    pub fn publish(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectID>,
    ) -> Result<ResultHandle, SdkError> {
        self.command(Command::Publish(modules, dependencies))
    }

    /// Upgrade `package` with an authorized upgrade ticket
    pub fn upgrade(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectID>,
        package: ObjectID,
        ticket: impl Into<Argument>,
    ) -> Result<ResultHandle, SdkError> {
        self.command(Command::Upgrade(modules, dependencies, package, ticket.into()))
    }

    /// Build a Move vector from `elements`
    pub fn make_move_vec(
        &mut self,
        element_type: Option<&str>,
        elements: &[Argument],
    ) -> Result<ResultHandle, SdkError> {
        let element_type = element_type.map(TypeTag::parse).transpose()?;
        if element_type.is_none() && elements.is_empty() {
            return Err(SdkError::InvalidArgument(
                "an empty vector needs an element type".to_string(),
            ));
        }
        self.command(Command::MakeMoveVec(element_type, elements.to_vec()))
    }

    // ==================== Resolution ====================

    /// Fetch version and digest of every unresolved object input
    ///
    /// Shared objects come back as mutable shared inputs. Nothing changes
    /// unless every object was found. Returns how many inputs were resolved.
    pub async fn resolve_objects(&mut self, client: &SuiClient) -> Result<usize, SdkError> {
        let pending = self.unresolved_objects();
        if pending.is_empty() {
            return Ok(0);
        }

        let ids: Vec<ObjectID> = pending.iter().map(|(_, id)| *id).collect();
        let responses = client
            .multi_get_objects(&ids, ObjectDataOptions::new().with_owner())
            .await?;
        if responses.len() != ids.len() {
            return Err(SdkError::Serialization(format!(
                "asked for {} objects, got {}",
                ids.len(),
                responses.len()
            )));
        }

        let mut resolved = Vec::with_capacity(pending.len());
        for ((index, id), response) in pending.into_iter().zip(responses) {
            let data = response.data.ok_or(SdkError::ObjectNotFound(id))?;
            let arg = match data.owner {
                Some(Owner::Shared {
                    initial_shared_version,
                }) => ObjectArg::SharedObject {
                    id,
                    initial_shared_version,
                    mutable: true,
                },
                _ => ObjectArg::ImmOrOwnedObject(data.object_ref()),
            };
            resolved.push((index, id, arg));
        }

        let count = resolved.len();
        for (index, object_id, arg) in resolved {
            self.inputs[usize::from(index)] = BuilderInput::Object(ObjectInput::Resolved(arg));
            self.sink.emit(BuildEvent::ObjectResolved { index, object_id });
        }
        tracing::debug!(count, "resolved object inputs");
        Ok(count)
    }

    // ==================== Build ====================

    /// Validate and assemble the typed transaction data
    pub fn build_data(&self) -> Result<TransactionData, SdkError> {
        let sender = self.sender.ok_or(SdkError::MissingField("sender"))?;
        let budget = self.gas_budget.ok_or(SdkError::MissingField("gas_budget"))?;
        let price = self.gas_price.ok_or(SdkError::MissingField("gas_price"))?;
        let payment = self
            .gas_payment
            .as_ref()
            .ok_or(SdkError::MissingField("gas_payment"))?;
        if payment.is_empty() {
            return Err(SdkError::EmptyGasPayment);
        }

        let inputs = self
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| input.to_call_arg(i as u16))
            .collect::<Result<Vec<_>, _>>()?;

        if self.commands.is_empty() {
            if self.strict {
                return Err(SdkError::EmptyTransaction);
            }
            self.sink.emit(BuildEvent::EmptyTransaction);
        }

        Ok(TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
                inputs,
                commands: self.commands.clone(),
            }),
            sender,
            gas_data: GasData {
                payment: payment.clone(),
                owner: self.gas_owner.unwrap_or(sender),
                price,
                budget,
            },
            expiration: self.expiration.unwrap_or_default(),
        }))
    }

    /// Validate and serialize to canonical BCS bytes
    pub fn build(&self) -> Result<Vec<u8>, SdkError> {
        let data = self.build_data()?;
        Ok(data.to_bytes()?)
    }

    /// Validate and render the transaction as pretty-printed JSON
    ///
    /// Addresses and ids are hex strings, digests base58 and type arguments
    /// Move type strings. Pure inputs stay as raw BCS byte arrays.
    pub fn to_json(&self) -> Result<String, SdkError> {
        let data = self.build_data()?;
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Rebuild a builder from the output of [`TransactionBuilder::to_json`]
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        let data: TransactionData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Human-readable overview of the current state
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for TransactionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionBuilder")
            .field("inputs", &self.inputs)
            .field("commands", &self.commands)
            .field("strict", &self.strict)
            .field("sender", &self.sender)
            .field("gas_budget", &self.gas_budget)
            .field("gas_price", &self.gas_price)
            .field("gas_payment", &self.gas_payment)
            .field("gas_owner", &self.gas_owner)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

fn show<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "<unset>".to_string(), |v| v.to_string())
}

impl fmt::Display for TransactionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Transaction ({} inputs, {} commands)",
            self.inputs.len(),
            self.commands.len()
        )?;
        writeln!(f, "  sender: {}", show(self.sender))?;
        writeln!(
            f,
            "  gas: budget={} price={} payment={} owner={}",
            show(self.gas_budget),
            show(self.gas_price),
            show(self.gas_payment.as_ref().map(|p| format!("{} coins", p.len()))),
            show(self.gas_owner.or(self.sender)),
        )?;
        match self.expiration.unwrap_or_default() {
            TransactionExpiration::None => writeln!(f, "  expiration: none")?,
            TransactionExpiration::Epoch(epoch) => writeln!(f, "  expiration: epoch {}", epoch)?,
        }

        for (i, input) in self.inputs.iter().enumerate() {
            match input {
                BuilderInput::Pure { bytes, type_name } => writeln!(
                    f,
                    "  input {}: pure {} ({} bytes)",
                    i,
                    type_name.as_deref().unwrap_or("?"),
                    bytes.len()
                )?,
                BuilderInput::Object(ObjectInput::Unresolved(id)) => {
                    writeln!(f, "  input {}: object {} (unresolved)", i, id)?
                }
                BuilderInput::Object(ObjectInput::Resolved(arg)) => match arg {
                    ObjectArg::ImmOrOwnedObject(r) => {
                        writeln!(f, "  input {}: object {} v{}", i, r.object_id, r.version)?
                    }
                    ObjectArg::SharedObject {
                        id,
                        initial_shared_version,
                        mutable,
                    } => writeln!(
                        f,
                        "  input {}: shared {} v{}{}",
                        i,
                        id,
                        initial_shared_version,
                        if *mutable { " mut" } else { "" }
                    )?,
                    ObjectArg::Receiving(r) => {
                        writeln!(f, "  input {}: receiving {} v{}", i, r.object_id, r.version)?
                    }
                },
            }
        }
        for (i, command) in self.commands.iter().enumerate() {
            writeln!(f, "  command {}: {}", i, command)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;

    const REF_ID: &str = "0x5877400000000000000000000000000000000000000000000000000000000000";
    const REF_DIGEST: &str = "1thX6LZfHDZZGkq4tt1q2yRAPVfCTpX99XN4RHFsxM";

    fn reference_ref() -> ObjectRef {
        ObjectRef::parse(REF_ID, 3619, REF_DIGEST).unwrap()
    }

    fn sender() -> SuiAddress {
        SuiAddress::from_hex("0x1").unwrap()
    }

    fn ready_builder() -> TransactionBuilder {
        let mut tx = TransactionBuilder::new();
        tx.set_sender(sender())
            .set_gas_budget(1_000_000)
            .set_gas_price(1000)
            .set_gas_payment(vec![reference_ref()]);
        tx
    }

    // ==================== Inputs ====================

    #[test]
    fn test_pure_inputs_are_interned() {
        let mut tx = TransactionBuilder::new();
        let a = tx.pure(100u64).unwrap();
        let b = tx.pure(100u64).unwrap();
        let c = tx.pure(100u32).unwrap();
        assert_eq!(a, Argument::Input(0));
        assert_eq!(a, b);
        assert_eq!(c, Argument::Input(1));
        assert_eq!(tx.inputs().len(), 2);
    }

    #[test]
    fn test_pure_bytes_keeps_type() {
        let mut tx = TransactionBuilder::new();
        tx.pure_bytes(vec![1, 2], "vector<u8>").unwrap();
        assert_eq!(
            tx.inputs()[0],
            BuilderInput::Pure {
                bytes: vec![1, 2],
                type_name: Some("vector<u8>".to_string())
            }
        );
    }

    #[test]
    fn test_object_interned_by_id() {
        let mut tx = TransactionBuilder::new();
        let id = reference_ref().object_id;
        let first = tx.object_id(id).unwrap();
        let second = tx.object_ref(reference_ref()).unwrap();
        assert_eq!(first, second);
        assert_eq!(tx.inputs().len(), 1);
        assert!(tx.unresolved_objects().is_empty());
    }

    #[test]
    fn test_unresolved_does_not_downgrade() {
        let mut tx = TransactionBuilder::new();
        tx.object_ref(reference_ref()).unwrap();
        tx.object_id(reference_ref().object_id).unwrap();
        assert!(tx.unresolved_objects().is_empty());
    }

    #[test]
    fn test_conflicting_refs_rejected() {
        let mut tx = TransactionBuilder::new();
        tx.object_ref(reference_ref()).unwrap();
        let mut other = reference_ref();
        other.version += 1;
        assert!(matches!(
            tx.object_ref(other),
            Err(SdkError::ConflictingObject(id)) if id == other.object_id
        ));
    }

    #[test]
    fn test_object_half_reference_rejected() {
        let mut tx = TransactionBuilder::new();
        let result = tx.object(reference_ref().object_id, Some(1), None);
        assert!(matches!(result, Err(SdkError::InvalidArgument(_))));
        assert!(tx.inputs().is_empty());
    }

    #[test]
    fn test_shared_object_mutability_merges() {
        let mut tx = TransactionBuilder::new();
        let id = SuiAddress::from_hex("0x6").unwrap();
        tx.shared_object(id, 1, false).unwrap();
        tx.shared_object(id, 1, true).unwrap();
        assert_eq!(
            tx.inputs()[0],
            BuilderInput::Object(ObjectInput::Resolved(ObjectArg::SharedObject {
                id,
                initial_shared_version: 1,
                mutable: true
            }))
        );
    }

    // ==================== Commands ====================

    #[test]
    fn test_forward_references_rejected() {
        let mut tx = TransactionBuilder::new();
        assert!(tx.split_coins(Argument::GasCoin, &[Argument::Input(0)]).is_err());
        assert!(tx
            .merge_coins(Argument::GasCoin, &[Argument::Result(0)])
            .is_err());
        assert!(tx.commands().is_empty());

        let amount = tx.pure(5u64).unwrap();
        let split = tx.split_coins(Argument::GasCoin, &[amount]).unwrap();
        assert_eq!(split.index(), 0);
        assert!(tx
            .transfer_objects(&[Argument::NestedResult(1, 0)], amount)
            .is_err());
        assert!(tx.transfer_objects(&[split.nested(0)], amount).is_ok());
    }

    #[test]
    fn test_result_handle_nested_is_unchecked() {
        let mut tx = TransactionBuilder::new();
        let amount = tx.pure(1u64).unwrap();
        let split = tx.split_coins(tx.gas_coin(), &[amount]).unwrap();
        assert_eq!(split.nested(1), Argument::NestedResult(0, 1));
        assert_eq!(Argument::from(split), Argument::Result(0));
    }

    #[test]
    fn test_move_call_bad_target() {
        let mut tx = TransactionBuilder::new();
        assert!(tx.move_call("0x2::coin", &[], &[]).is_err());
        assert!(tx.move_call("0x2::coin::value", &[], &["not a type"]).is_err());
    }

    #[test]
    fn test_make_move_vec_needs_type_when_empty() {
        let mut tx = TransactionBuilder::new();
        assert!(tx.make_move_vec(None, &[]).is_err());
        assert!(tx.make_move_vec(Some("u64"), &[]).is_ok());
    }

    // ==================== Build ====================

    #[test]
    fn test_build_validation_order() {
        let mut tx = TransactionBuilder::new();
        tx.object_id(reference_ref().object_id).unwrap();
        assert!(matches!(tx.build(), Err(SdkError::MissingField("sender"))));
        tx.set_sender(sender());
        assert!(matches!(tx.build(), Err(SdkError::MissingField("gas_budget"))));
        tx.set_gas_budget(1);
        assert!(matches!(tx.build(), Err(SdkError::MissingField("gas_price"))));
        tx.set_gas_price(1);
        assert!(matches!(tx.build(), Err(SdkError::MissingField("gas_payment"))));
        tx.set_gas_payment(vec![]);
        assert!(matches!(tx.build(), Err(SdkError::EmptyGasPayment)));
        tx.set_gas_payment(vec![reference_ref()]);
        assert!(matches!(
            tx.build(),
            Err(SdkError::UnresolvedObject { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_transaction_reported_to_sink() {
        let sink = Arc::new(RecordingSink::new());
        let mut tx = ready_builder().with_sink(sink.clone());
        tx.set_gas_budget(2);

        assert_eq!(tx.build().unwrap().len(), 159);
        assert!(sink.contains(&BuildEvent::EmptyTransaction));
        assert!(sink.contains(&BuildEvent::FieldOverwritten { field: "gas_budget" }));
    }

    #[test]
    fn test_strict_rejects_empty() {
        let tx = ready_builder().strict(true);
        assert!(matches!(tx.build(), Err(SdkError::EmptyTransaction)));
        assert!(TransactionBuilder::new_strict().is_strict());
    }

    #[test]
    fn test_gas_owner_defaults_to_sender() {
        let data = ready_builder().build_data().unwrap();
        assert_eq!(data.gas_data().owner, sender());

        let owner = SuiAddress::from_hex("0x99").unwrap();
        let mut tx = ready_builder();
        tx.set_gas_owner(owner);
        assert_eq!(tx.build_data().unwrap().gas_data().owner, owner);
    }

    #[test]
    fn test_from_bytes_reproduces_bytes() {
        let mut tx = ready_builder();
        let amount = tx.pure(1000u64).unwrap();
        let split = tx.split_coins(Argument::GasCoin, &[amount]).unwrap();
        tx.transfer_to(&[split.nested(0)], sender()).unwrap();
        tx.set_expiration_epoch(7);
        let bytes = tx.build().unwrap();

        let restored = TransactionBuilder::from_bytes(&bytes).unwrap();
        assert_eq!(restored.build().unwrap(), bytes);
        assert_eq!(restored.commands().len(), 2);
    }

    #[test]
    fn test_to_json_is_readable() {
        let mut tx = ready_builder();
        tx.move_call("0x2::coin::zero", &[], &["0x2::sui::SUI"]).unwrap();
        let json = tx.to_json().unwrap();

        assert!(json.contains(&sender().to_hex()));
        assert!(json.contains(REF_DIGEST));
        assert!(json.contains("\"0x2::sui::SUI\""));
        assert!(json.contains("\"budget\": 1000000"));
    }

    #[test]
    fn test_to_json_needs_complete_builder() {
        let mut tx = TransactionBuilder::new();
        tx.pure(1u8).unwrap();
        assert!(matches!(tx.to_json(), Err(SdkError::MissingField("sender"))));
    }

    #[test]
    fn test_from_json_reproduces_bytes() {
        let mut tx = ready_builder();
        let amount = tx.pure(7u64).unwrap();
        let split = tx.split_coins(Argument::GasCoin, &[amount]).unwrap();
        tx.transfer_to(&[split.nested(0)], sender()).unwrap();

        let restored = TransactionBuilder::from_json(&tx.to_json().unwrap()).unwrap();
        assert_eq!(restored.build().unwrap(), tx.build().unwrap());
        assert!(matches!(
            TransactionBuilder::from_json("{\"V1\": 3}"),
            Err(SdkError::Serialization(_))
        ));
    }

    #[test]
    fn test_summary_mentions_state() {
        let mut tx = ready_builder();
        tx.object_id(SuiAddress::from_hex("0x5").unwrap()).unwrap();
        tx.pure(3u8).unwrap();
        let summary = tx.summary();
        assert!(summary.starts_with("Transaction (2 inputs, 0 commands)"));
        assert!(summary.contains("(unresolved)"));
        assert!(summary.contains("pure u8 (1 bytes)"));
        assert!(summary.contains("budget=1000000"));
    }
}

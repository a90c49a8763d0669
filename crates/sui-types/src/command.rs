//! Programmable transaction commands

use std::fmt;

use serde::{Deserialize, Serialize};
use sui_primitives::ObjectID;

use crate::identifier::validate_identifier;
use crate::{Argument, TypeTag, TypesError};

/// Call of a Move function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    /// Package id
    pub package: ObjectID,
    /// Module name
    pub module: String,
    /// Function name
    pub function: String,
    /// Generic type arguments
    pub type_arguments: Vec<TypeTag>,
    /// Value arguments
    pub arguments: Vec<Argument>,
}

impl ProgrammableMoveCall {
    /// Build a call from a `package::module::function` target
    pub fn new(
        target: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Result<Self, TypesError> {
        let (package, module, function) = parse_move_target(target)?;
        Ok(ProgrammableMoveCall {
            package,
            module,
            function,
            type_arguments,
            arguments,
        })
    }
}

/// Split `package::module::function` into its parts
pub fn parse_move_target(target: &str) -> Result<(ObjectID, String, String), TypesError> {
    let parts: Vec<&str> = target.trim().split("::").collect();
    let [package, module, function] = parts.as_slice() else {
        return Err(TypesError::InvalidMoveTarget(target.to_string()));
    };
    let package = ObjectID::from_hex(package)
        .map_err(|_| TypesError::InvalidMoveTarget(target.to_string()))?;
    Ok((
        package,
        validate_identifier(module)?,
        validate_identifier(function)?,
    ))
}

/// One step of a programmable transaction
///
/// Variant order is the wire tag order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Call a Move function
    MoveCall(Box<ProgrammableMoveCall>),
    /// Send objects to an address
    TransferObjects(Vec<Argument>, Argument),
    /// Split amounts off a coin
    SplitCoins(Argument, Vec<Argument>),
    /// Merge coins into the first one
    MergeCoins(Argument, Vec<Argument>),
    /// Publish modules with their dependencies
    Publish(Vec<Vec<u8>>, Vec<ObjectID>),
    /// Build a vector from arguments
    MakeMoveVec(Option<TypeTag>, Vec<Argument>),
    /// Upgrade a package using an upgrade ticket
    Upgrade(Vec<Vec<u8>>, Vec<ObjectID>, ObjectID, Argument),
}

impl Command {
    /// Move call from a `package::module::function` target
    pub fn move_call(
        target: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Result<Self, TypesError> {
        ProgrammableMoveCall::new(target, type_arguments, arguments)
            .map(|call| Command::MoveCall(Box::new(call)))
    }

    /// Every argument this command reads, in wire order
    pub fn arguments(&self) -> Vec<Argument> {
        match self {
            Command::MoveCall(call) => call.arguments.clone(),
            Command::TransferObjects(objects, recipient) => {
                let mut args = objects.clone();
                args.push(*recipient);
                args
            }
            Command::SplitCoins(first, rest) | Command::MergeCoins(first, rest) => {
                std::iter::once(*first).chain(rest.iter().copied()).collect()
            }
            Command::Publish(..) => Vec::new(),
            Command::MakeMoveVec(_, elements) => elements.clone(),
            Command::Upgrade(_, _, _, ticket) => vec![*ticket],
        }
    }

    /// Short name of the command kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Command::MoveCall(_) => "MoveCall",
            Command::TransferObjects(..) => "TransferObjects",
            Command::SplitCoins(..) => "SplitCoins",
            Command::MergeCoins(..) => "MergeCoins",
            Command::Publish(..) => "Publish",
            Command::MakeMoveVec(..) => "MakeMoveVec",
            Command::Upgrade(..) => "Upgrade",
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Argument]) -> fmt::Result {
    f.write_str("[")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", arg)?;
    }
    f.write_str("]")
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::MoveCall(call) => {
                write!(
                    f,
                    "MoveCall {}::{}::{}",
                    call.package.to_short_hex(),
                    call.module,
                    call.function
                )?;
                if !call.type_arguments.is_empty() {
                    let types: Vec<String> =
                        call.type_arguments.iter().map(|t| t.to_string()).collect();
                    write!(f, "<{}>", types.join(", "))?;
                }
                write_args(f, &call.arguments)
            }
            Command::TransferObjects(objects, recipient) => {
                f.write_str("TransferObjects ")?;
                write_args(f, objects)?;
                write!(f, " -> {}", recipient)
            }
            Command::SplitCoins(coin, amounts) => {
                write!(f, "SplitCoins {} ", coin)?;
                write_args(f, amounts)
            }
            Command::MergeCoins(dest, sources) => {
                write!(f, "MergeCoins {} <- ", dest)?;
                write_args(f, sources)
            }
            Command::Publish(modules, deps) => {
                write!(f, "Publish {} modules, {} deps", modules.len(), deps.len())
            }
            Command::MakeMoveVec(ty, elements) => {
                match ty {
                    Some(ty) => write!(f, "MakeMoveVec<{}> ", ty)?,
                    None => f.write_str("MakeMoveVec ")?,
                }
                write_args(f, elements)
            }
            Command::Upgrade(modules, _, package, ticket) => write!(
                f,
                "Upgrade {} with {} modules, ticket {}",
                package.to_short_hex(),
                modules.len(),
                ticket
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_bcs::{from_bytes, to_bytes, BcsError};

    // ==================== Targets ====================

    #[test]
    fn test_parse_move_target() {
        let (package, module, function) = parse_move_target("0x2::devnet_nft::mint").unwrap();
        assert_eq!(package, ObjectID::from_hex("0x2").unwrap());
        assert_eq!(module, "devnet_nft");
        assert_eq!(function, "mint");
    }

    #[test]
    fn test_parse_move_target_rejects_malformed() {
        for bad in ["0x2::coin", "0x2::coin::split::x", "zz::coin::split", ""] {
            assert_eq!(
                parse_move_target(bad),
                Err(TypesError::InvalidMoveTarget(bad.to_string()))
            );
        }
        assert!(matches!(
            parse_move_target("0x2::coin::9split"),
            Err(TypesError::InvalidIdentifier(_))
        ));
    }

    // ==================== Wire layout ====================

    #[test]
    fn test_move_call_layout() {
        let call = ProgrammableMoveCall::new(
            "0x2::display::new",
            vec![TypeTag::parse("0x6::capy::Capy").unwrap()],
            vec![
                Argument::GasCoin,
                Argument::NestedResult(0, 1),
                Argument::Input(3),
                Argument::Result(1),
            ],
        )
        .unwrap();

        let mut expected = vec![0u8; 31];
        expected.push(2);
        expected.extend_from_slice(&[7, 100, 105, 115, 112, 108, 97, 121, 3, 110, 101, 119, 1, 7]);
        expected.extend_from_slice(&[0u8; 31]);
        expected.push(6);
        expected.extend_from_slice(&[
            4, 99, 97, 112, 121, 4, 67, 97, 112, 121, 0, 4, 0, 3, 0, 0, 1, 0, 1, 3, 0, 2, 1, 0,
        ]);

        let bytes = to_bytes(&call).unwrap();
        assert_eq!(bytes, expected);
        assert_eq!(from_bytes::<ProgrammableMoveCall>(&bytes).unwrap(), call);
    }

    #[test]
    fn test_command_tags() {
        let gas = Argument::GasCoin;
        let cases: Vec<(Command, u8)> = vec![
            (Command::move_call("0x2::m::f", vec![], vec![]).unwrap(), 0),
            (Command::TransferObjects(vec![gas], Argument::Input(0)), 1),
            (Command::SplitCoins(gas, vec![Argument::Input(0)]), 2),
            (Command::MergeCoins(gas, vec![]), 3),
            (Command::Publish(vec![vec![1, 2]], vec![ObjectID::ZERO]), 4),
            (Command::MakeMoveVec(Some(TypeTag::U8), vec![]), 5),
            (Command::Upgrade(vec![], vec![], ObjectID::ZERO, Argument::Result(0)), 6),
        ];
        for (command, tag) in cases {
            let bytes = to_bytes(&command).unwrap();
            assert_eq!(bytes[0], tag, "{}", command.kind_name());
            assert_eq!(from_bytes::<Command>(&bytes).unwrap(), command);
        }
    }

    #[test]
    fn test_split_coins_layout() {
        let command = Command::SplitCoins(Argument::GasCoin, vec![Argument::Input(0)]);
        assert_eq!(to_bytes(&command).unwrap(), vec![2, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_make_move_vec_without_type() {
        let command = Command::MakeMoveVec(None, vec![Argument::Input(0), Argument::Input(1)]);
        assert_eq!(to_bytes(&command).unwrap(), vec![5, 0, 2, 1, 0, 0, 1, 1, 0]);
    }

    #[test]
    fn test_unknown_command_tag() {
        assert!(matches!(from_bytes::<Command>(&[7]), Err(BcsError::Custom(_))));
    }

    // ==================== Argument listing ====================

    #[test]
    fn test_arguments_in_wire_order() {
        let command = Command::TransferObjects(
            vec![Argument::Result(0), Argument::NestedResult(1, 0)],
            Argument::Input(2),
        );
        assert_eq!(
            command.arguments(),
            vec![Argument::Result(0), Argument::NestedResult(1, 0), Argument::Input(2)]
        );
        assert!(Command::Publish(vec![], vec![]).arguments().is_empty());
    }

    #[test]
    fn test_display() {
        let command = Command::SplitCoins(Argument::GasCoin, vec![Argument::Input(0)]);
        assert_eq!(command.to_string(), "SplitCoins GasCoin [Input(0)]");
    }
}

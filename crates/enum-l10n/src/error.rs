//! Construction-time errors.
//!
//! Conversions never fail: unknown labels and missing translations are
//! reported through `Option` or the key fallback. The only hard failure is
//! registering an enum or configuration that cannot be converted at all.

/// Errors raised while building a descriptor, converter, or configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The type name was empty.
    EmptyTypeName,
    /// The type name is not a plain identifier.
    InvalidTypeName(String),
    /// The type declares no members, so it cannot be treated as an enum.
    NoMembers { type_name: String },
    /// A member was registered with an empty name.
    EmptyMemberName { type_name: String },
    /// Two members share the same symbolic name.
    DuplicateMember { type_name: String, member: String },
    /// The flags delimiter was empty.
    EmptyDelimiter,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTypeName => write!(f, "enum type name is empty"),
            Self::InvalidTypeName(name) => write!(f, "invalid enum type name: {name}"),
            Self::NoMembers { type_name } => {
                write!(f, "type '{type_name}' has no members and is not an enum")
            }
            Self::EmptyMemberName { type_name } => {
                write!(f, "type '{type_name}' has a member with an empty name")
            }
            Self::DuplicateMember { type_name, member } => {
                write!(f, "duplicate member '{member}' in type '{type_name}'")
            }
            Self::EmptyDelimiter => write!(f, "flags delimiter must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

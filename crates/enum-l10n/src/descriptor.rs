//! Enum registration and descriptors.
//!
//! Rust has no runtime reflection over enums, so every convertible type
//! registers itself through [`LocalizedEnum`]: a type name, whether values
//! combine as a bitmask, and the defined members in declaration order. The
//! [`impl_localized_enum!`](crate::impl_localized_enum) and
//! [`impl_localized_flags!`](crate::impl_localized_flags) macros generate
//! the impl for field-less enums and `bitflags` types respectively.
//!
//! # Invariants
//!
//! 1. **Declaration order is preserved**: [`EnumDescriptor::members`] yields
//!    members in the order they were registered.
//! 2. **Descriptors are immutable**: once built, a descriptor never changes
//!    and can be shared freely between threads.
//! 3. **Bits fit `u32`**: every member value is an unsigned 32-bit pattern.

use crate::error::ConfigError;

/// Separator between the type name and the member name in a lookup key.
pub const KEY_SEPARATOR: char = '_';

/// An enum type that can be converted to and from localized labels.
pub trait LocalizedEnum: Copy + Send + Sync + 'static {
    /// Type name used as the lookup key prefix.
    const TYPE_NAME: &'static str;

    /// Whether values of this type combine as a bitmask.
    const IS_FLAGS: bool;

    /// Defined members as `(symbolic name, value)`, in declaration order.
    fn members() -> Vec<(&'static str, Self)>;

    /// Unsigned bit pattern of a value.
    fn to_bits(self) -> u32;

    /// Reinterpret a bit pattern as a value.
    ///
    /// Flags types accept any pattern. Plain enums return `None` for bits
    /// that are not a defined member.
    fn from_bits(bits: u32) -> Option<Self>;
}

/// A single defined member of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    name: String,
    bits: u32,
}

impl Member {
    /// Create a member from its symbolic name and bit pattern.
    #[must_use]
    pub fn new(name: impl Into<String>, bits: u32) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }

    /// Symbolic name, as used in lookup keys.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unsigned bit pattern.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Whether every bit of this member is set in `value`.
    ///
    /// A zero-valued member is contained in every value.
    #[must_use]
    pub const fn is_contained_in(&self, value: u32) -> bool {
        value & self.bits == self.bits
    }
}

/// Immutable description of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    type_name: String,
    is_flags: bool,
    members: Vec<Member>,
}

impl EnumDescriptor {
    /// Build and validate a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the type name is not an identifier, the
    /// member list is empty, or a member name is empty or repeated.
    pub fn new(
        type_name: impl Into<String>,
        is_flags: bool,
        members: impl IntoIterator<Item = Member>,
    ) -> Result<Self, ConfigError> {
        let type_name = type_name.into();
        validate_type_name(&type_name)?;

        let members: Vec<Member> = members.into_iter().collect();
        if members.is_empty() {
            return Err(ConfigError::NoMembers { type_name });
        }
        for (i, member) in members.iter().enumerate() {
            if member.name.is_empty() {
                return Err(ConfigError::EmptyMemberName { type_name });
            }
            if members[..i].iter().any(|m| m.name == member.name) {
                return Err(ConfigError::DuplicateMember {
                    member: member.name.clone(),
                    type_name,
                });
            }
        }

        Ok(Self {
            type_name,
            is_flags,
            members,
        })
    }

    /// Descriptor for a registered type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the registration is invalid.
    pub fn of<E: LocalizedEnum>() -> Result<Self, ConfigError> {
        Self::new(
            E::TYPE_NAME,
            E::IS_FLAGS,
            E::members()
                .into_iter()
                .map(|(name, value)| Member::new(name, value.to_bits())),
        )
    }

    /// Type name used as the key prefix.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether values combine as a bitmask.
    #[must_use]
    pub const fn is_flags(&self) -> bool {
        self.is_flags
    }

    /// Defined members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Find a member by symbolic name.
    #[must_use]
    pub fn member_named(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Symbolic name of the first member declared with exactly `bits`.
    #[must_use]
    pub fn name_of(&self, bits: u32) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.bits == bits)
            .map(Member::name)
    }

    /// Whether `bits` equals a single defined member.
    #[must_use]
    pub fn is_defined(&self, bits: u32) -> bool {
        self.members.iter().any(|m| m.bits == bits)
    }

    /// Lookup key for a value: `"{TypeName}_{MemberName}"`.
    ///
    /// Values that are not a defined member use their decimal bit pattern
    /// in place of the member name.
    #[must_use]
    pub fn key_for(&self, bits: u32) -> String {
        match self.name_of(bits) {
            Some(name) => self.key_for_name(name),
            None => self.key_for_name(&bits.to_string()),
        }
    }

    pub(crate) fn key_for_name(&self, name: &str) -> String {
        let mut key = String::with_capacity(self.type_name.len() + 1 + name.len());
        key.push_str(&self.type_name);
        key.push(KEY_SEPARATOR);
        key.push_str(name);
        key
    }
}

fn validate_type_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    match chars.next() {
        None => Err(ConfigError::EmptyTypeName),
        Some(first) if first.is_alphabetic() || first == '_' => {
            if chars.all(|c| c.is_alphanumeric() || c == '_') {
                Ok(())
            } else {
                Err(ConfigError::InvalidTypeName(name.to_string()))
            }
        }
        Some(_) => Err(ConfigError::InvalidTypeName(name.to_string())),
    }
}

/// Register a field-less enum as a [`LocalizedEnum`].
///
/// Values are plain members (not flags); the type name defaults to the
/// identifier and can be overridden with `as "Name"`.
///
/// ```
/// use enum_l10n::{LocalizedEnum, impl_localized_enum};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Suit {
///     Hearts = 1,
///     Spades = 2,
/// }
/// impl_localized_enum!(Suit { Hearts, Spades });
///
/// assert_eq!(Suit::TYPE_NAME, "Suit");
/// assert_eq!(Suit::from_bits(2), Some(Suit::Spades));
/// assert_eq!(Suit::from_bits(3), None);
/// ```
#[macro_export]
macro_rules! impl_localized_enum {
    (@impl $ty:ty, $name:expr, $($variant:ident),+) => {
        impl $crate::LocalizedEnum for $ty {
            const TYPE_NAME: &'static str = $name;
            const IS_FLAGS: bool = false;

            fn members() -> ::std::vec::Vec<(&'static str, Self)> {
                ::std::vec![$((::core::stringify!($variant), <$ty>::$variant)),+]
            }

            fn to_bits(self) -> u32 {
                self as u32
            }

            fn from_bits(bits: u32) -> ::core::option::Option<Self> {
                $(
                    if bits == <$ty>::$variant as u32 {
                        return ::core::option::Option::Some(<$ty>::$variant);
                    }
                )+
                ::core::option::Option::None
            }
        }
    };
    ($ty:ty as $name:literal { $($variant:ident),+ $(,)? }) => {
        $crate::impl_localized_enum!(@impl $ty, $name, $($variant),+);
    };
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        $crate::impl_localized_enum!(@impl $ty, ::core::stringify!($ty), $($variant),+);
    };
}

/// Register a `bitflags` type as a flags [`LocalizedEnum`].
///
/// The short form uses the type identifier and the declared flag names. The
/// long form sets the type name and maps each flag constant to the symbolic
/// name used in lookup keys.
///
/// ```
/// use enum_l10n::{LocalizedEnum, impl_localized_flags};
///
/// bitflags::bitflags! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     struct Perm: u32 {
///         const READ = 1;
///         const WRITE = 2;
///     }
/// }
/// impl_localized_flags!(Perm as "Perm" { READ => "Read", WRITE => "Write" });
///
/// assert_eq!(Perm::members(), vec![("Read", Perm::READ), ("Write", Perm::WRITE)]);
/// assert_eq!(<Perm as LocalizedEnum>::from_bits(3), Some(Perm::READ | Perm::WRITE));
/// ```
#[macro_export]
macro_rules! impl_localized_flags {
    (@bits) => {
        fn to_bits(self) -> u32 {
            ::core::convert::From::from(
                <Self as $crate::__private::bitflags::Flags>::bits(&self),
            )
        }

        fn from_bits(bits: u32) -> ::core::option::Option<Self> {
            ::core::convert::TryFrom::try_from(bits)
                .ok()
                .map(<Self as $crate::__private::bitflags::Flags>::from_bits_retain)
        }
    };
    ($ty:ty as $name:literal { $($flag:ident => $symbol:literal),+ $(,)? }) => {
        impl $crate::LocalizedEnum for $ty {
            const TYPE_NAME: &'static str = $name;
            const IS_FLAGS: bool = true;

            fn members() -> ::std::vec::Vec<(&'static str, Self)> {
                ::std::vec![$(($symbol, <$ty>::$flag)),+]
            }

            $crate::impl_localized_flags!(@bits);
        }
    };
    ($ty:ident) => {
        impl $crate::LocalizedEnum for $ty {
            const TYPE_NAME: &'static str = ::core::stringify!($ty);
            const IS_FLAGS: bool = true;

            fn members() -> ::std::vec::Vec<(&'static str, Self)> {
                <Self as $crate::__private::bitflags::Flags>::FLAGS
                    .iter()
                    .filter(|flag| flag.is_named())
                    .map(|flag| (flag.name(), *flag.value()))
                    .collect()
            }

            $crate::impl_localized_flags!(@bits);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Suit {
        Hearts = 1,
        Spades = 2,
    }
    crate::impl_localized_enum!(Suit { Hearts, Spades });

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Level {
        Low,
        High,
    }
    crate::impl_localized_enum!(Level as "Severity" { Low, High });

    bitflags::bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Modes: u8 {
            const BOLD = 1 << 0;
            const ITALIC = 1 << 1;
            const _ = !0;
        }
    }
    crate::impl_localized_flags!(Modes);

    fn perm() -> EnumDescriptor {
        EnumDescriptor::new(
            "Perm",
            true,
            [
                Member::new("Read", 1),
                Member::new("Write", 2),
                Member::new("Execute", 4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn enum_macro_registers_members_in_order() {
        let d = EnumDescriptor::of::<Suit>().unwrap();
        assert_eq!(d.type_name(), "Suit");
        assert!(!d.is_flags());
        let names: Vec<&str> = d.members().iter().map(Member::name).collect();
        assert_eq!(names, vec!["Hearts", "Spades"]);
        assert_eq!(d.members()[1].bits(), 2);
    }

    #[test]
    fn enum_macro_type_name_override() {
        assert_eq!(Level::TYPE_NAME, "Severity");
        assert_eq!(Level::from_bits(1), Some(Level::High));
        assert_eq!(Level::High.to_bits(), 1);
    }

    #[test]
    fn flags_macro_skips_unnamed_flags() {
        let d = EnumDescriptor::of::<Modes>().unwrap();
        assert!(d.is_flags());
        let names: Vec<&str> = d.members().iter().map(Member::name).collect();
        assert_eq!(names, vec!["BOLD", "ITALIC"]);
        let retained = <Modes as LocalizedEnum>::from_bits(0x80);
        assert_eq!(retained.map(|m| m.bits()), Some(0x80));
        assert_eq!(<Modes as LocalizedEnum>::from_bits(0x100), None);
        assert_eq!((Modes::BOLD | Modes::ITALIC).to_bits(), 3);
    }

    #[test]
    fn key_uses_member_name() {
        let d = perm();
        assert_eq!(d.key_for(4), "Perm_Execute");
    }

    #[test]
    fn key_for_undefined_value_uses_digits() {
        let d = perm();
        assert_eq!(d.key_for(3), "Perm_3");
    }

    #[test]
    fn alias_resolves_to_first_declared() {
        let d = EnumDescriptor::new(
            "Color",
            false,
            [Member::new("Grey", 7), Member::new("Gray", 7)],
        )
        .unwrap();
        assert_eq!(d.name_of(7), Some("Grey"));
        assert!(d.member_named("Gray").is_some());
    }

    #[test]
    fn zero_member_is_contained_everywhere() {
        let none = Member::new("None", 0);
        assert!(none.is_contained_in(0));
        assert!(none.is_contained_in(5));
        let write = Member::new("Write", 2);
        assert!(!write.is_contained_in(5));
        assert!(write.is_contained_in(6));
    }

    #[test]
    fn rejects_empty_member_list() {
        let err = EnumDescriptor::new("Empty", true, []).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NoMembers {
                type_name: "Empty".into()
            }
        );
    }

    #[test]
    fn rejects_bad_type_names() {
        assert_eq!(
            EnumDescriptor::new("", false, [Member::new("A", 0)]).unwrap_err(),
            ConfigError::EmptyTypeName
        );
        assert_eq!(
            EnumDescriptor::new("9Lives", false, [Member::new("A", 0)]).unwrap_err(),
            ConfigError::InvalidTypeName("9Lives".into())
        );
        assert_eq!(
            EnumDescriptor::new("a::B", false, [Member::new("A", 0)]).unwrap_err(),
            ConfigError::InvalidTypeName("a::B".into())
        );
    }

    #[test]
    fn rejects_duplicate_and_empty_members() {
        let err =
            EnumDescriptor::new("Suit", false, [Member::new("A", 1), Member::new("A", 2)])
                .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateMember { ref member, .. } if member == "A"));

        let err = EnumDescriptor::new("Suit", false, [Member::new("", 1)]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMemberName { .. }));
    }
}

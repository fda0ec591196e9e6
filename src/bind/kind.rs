//! Target kinds understood by the conversion engine, and the typed values it produces.

use std::fmt;
use std::ops::Deref;

use rust_decimal::Decimal;

use super::ConvertError;

/// The closed set of target kinds a field can be bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValueKind {
    String,
    Int16,
    Int32,
    Int64,
    UInt16,
    UInt32,
    UInt64,
    Decimal,
    Double,
    Single,
    Boolean,
    Enum(EnumKind),
    /// Growable sequence, bound to `Vec<T>`.
    List(Box<ValueKind>),
    /// Fixed-size sequence, bound to `Box<[T]>`.
    Array(Box<ValueKind>),
    /// Delimited tokens kept as raw strings.
    RawList,
    /// Raw string handed to the target type unconverted.
    Passthrough(&'static str),
}

/// Name and member list of an enumeration declared with [`config_enum!`](crate::config_enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumKind {
    pub name: &'static str,
    /// Member names in declaration order.
    pub members: &'static [&'static str],
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => f.write_str("String"),
            ValueKind::Int16 => f.write_str("Int16"),
            ValueKind::Int32 => f.write_str("Int32"),
            ValueKind::Int64 => f.write_str("Int64"),
            ValueKind::UInt16 => f.write_str("UInt16"),
            ValueKind::UInt32 => f.write_str("UInt32"),
            ValueKind::UInt64 => f.write_str("UInt64"),
            ValueKind::Decimal => f.write_str("Decimal"),
            ValueKind::Double => f.write_str("Double"),
            ValueKind::Single => f.write_str("Single"),
            ValueKind::Boolean => f.write_str("Boolean"),
            ValueKind::Enum(kind) => f.write_str(kind.name),
            ValueKind::List(element) => write!(f, "List<{element}>"),
            ValueKind::Array(element) => write!(f, "{element}[]"),
            ValueKind::RawList => f.write_str("RawList"),
            ValueKind::Passthrough(name) => f.write_str(name),
        }
    }
}

/// A converted value, ready to be handed to a field setter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Decimal(Decimal),
    Double(f64),
    Single(f32),
    Boolean(bool),
    /// Index into [`EnumKind::members`].
    Enum(usize),
    List(Vec<Value>),
    Array(Vec<Value>),
    RawList(Vec<String>),
    Passthrough(String),
}

impl Value {
    /// Short name of the variant, used in mismatch diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::UInt16(_) => "UInt16",
            Value::UInt32(_) => "UInt32",
            Value::UInt64(_) => "UInt64",
            Value::Decimal(_) => "Decimal",
            Value::Double(_) => "Double",
            Value::Single(_) => "Single",
            Value::Boolean(_) => "Boolean",
            Value::Enum(_) => "Enum",
            Value::List(_) => "List",
            Value::Array(_) => "Array",
            Value::RawList(_) => "RawList",
            Value::Passthrough(_) => "Passthrough",
        }
    }
}

/// A Rust type that can be the target of a bound field.
///
/// Implemented for the built-in scalar kinds, `Vec<T>`, `Box<[T]>` and [`RawList`].
/// Enumerations get an implementation from [`config_enum!`](crate::config_enum).
/// Custom types declare [`ValueKind::Passthrough`] and parse the raw string themselves:
///
/// ```
/// use dragon_bind::bind::{Bindable, ConvertError, Value, ValueKind};
///
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Bindable for Endpoint {
///     fn kind() -> ValueKind {
///         ValueKind::Passthrough("Endpoint")
///     }
///
///     fn from_value(value: Value) -> Result<Self, ConvertError> {
///         let raw = match value {
///             Value::Passthrough(raw) => raw,
///             other => return Err(ConvertError::mismatch(&Self::kind(), &other)),
///         };
///         let (host, port) = raw
///             .split_once(':')
///             .ok_or_else(|| ConvertError::Custom(format!("{raw} is not host:port")))?;
///         let port = port
///             .parse()
///             .map_err(|_| ConvertError::Custom(format!("{port} is not a port")))?;
///         Ok(Endpoint { host: host.to_string(), port })
///     }
/// }
/// ```
pub trait Bindable: Sized {
    fn kind() -> ValueKind;

    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

macro_rules! scalar_bindable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn kind() -> ValueKind {
                    ValueKind::$variant
                }

                fn from_value(value: Value) -> Result<Self, ConvertError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ConvertError::mismatch(&Self::kind(), &other)),
                    }
                }
            }
        )*
    };
}

scalar_bindable! {
    String => String,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    Decimal => Decimal,
    f64 => Double,
    f32 => Single,
    bool => Boolean,
}

impl<T: Bindable> Bindable for Vec<T> {
    fn kind() -> ValueKind {
        ValueKind::List(Box::new(T::kind()))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ConvertError::mismatch(&Self::kind(), &other)),
        }
    }
}

impl<T: Bindable> Bindable for Box<[T]> {
    fn kind() -> ValueKind {
        ValueKind::Array(Box::new(T::kind()))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(T::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Vec::into_boxed_slice),
            other => Err(ConvertError::mismatch(&Self::kind(), &other)),
        }
    }
}

/// Delimited tokens kept verbatim, without per-element conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawList(Vec<String>);

impl RawList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for RawList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for RawList {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl Bindable for RawList {
    fn kind() -> ValueKind {
        ValueKind::RawList
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::RawList(tokens) => Ok(Self(tokens)),
            other => Err(ConvertError::mismatch(&Self::kind(), &other)),
        }
    }
}

/// Declares a fieldless enumeration that can be bound from configuration.
///
/// Member names are matched case-insensitively. The first member is the
/// `Default`, and `Display` prints the member name, so a member can be used
/// directly as a field default.
///
/// ```
/// dragon_bind::config_enum! {
///     pub enum Direction {
///         Outbound,
///         Inbound,
///     }
/// }
///
/// assert_eq!(Direction::default(), Direction::Outbound);
/// assert_eq!(Direction::Inbound.to_string(), "Inbound");
/// assert_eq!(Direction::MEMBERS, &["Outbound", "Inbound"]);
/// ```
#[macro_export]
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident
            $(, $(#[$rest_meta:meta])* $rest:ident)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(#[$first_meta])*
            #[default]
            $first,
            $($(#[$rest_meta])* $rest,)*
        }

        impl $name {
            /// Member names in declaration order.
            pub const MEMBERS: &'static [&'static str] = &[stringify!($first) $(, stringify!($rest))*];

            const VALUES: &'static [$name] = &[$name::$first $(, $name::$rest)*];

            pub fn name(self) -> &'static str {
                Self::MEMBERS[self as usize]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::bind::Bindable for $name {
            fn kind() -> $crate::bind::ValueKind {
                $crate::bind::ValueKind::Enum($crate::bind::EnumKind {
                    name: stringify!($name),
                    members: Self::MEMBERS,
                })
            }

            fn from_value(
                value: $crate::bind::Value,
            ) -> ::std::result::Result<Self, $crate::bind::ConvertError> {
                match value {
                    $crate::bind::Value::Enum(index) if index < Self::VALUES.len() => {
                        Ok(Self::VALUES[index])
                    }
                    other => Err($crate::bind::ConvertError::mismatch(
                        &<Self as $crate::bind::Bindable>::kind(),
                        &other,
                    )),
                }
            }
        }
    };
}

//! Type conversion between document nodes and typed values.
//!
//! [`SettingValue`] is the per-type conversion capability. Each implementation
//! belongs to exactly one [`ValueKind`]:
//!
//! - **Scalar**: numbers, `bool`, `char`, `String`, paths and addresses, parsed
//!   from the node's text with Rust's locale-independent `FromStr` rules.
//! - **Enum**: unit-variant enums, parsed by variant name through serde.
//!   Opt in with [`enum_value!`](crate::enum_value).
//! - **Optional**: `Option<T>`; an empty node is `None`.
//! - **Tree**: types that parse and render their own sub-tree through
//!   [`TreeValue`]. Opt in with [`tree_value!`](crate::tree_value).
//! - **Pair**: `(A, B)`, stored as `Key` and `Value` child nodes.
//!
//! Every failure surfaces as [`XmlfigError::ValueConversion`] carrying the
//! member path and the offending raw text.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use serde::Serialize;
use serde::de::value::StrDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use tracing::trace;

use crate::error::XmlfigError;
use crate::node::Node;

/// How a value type maps onto a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Enum,
    Optional,
    Tree,
    Pair,
}

/// Conversion between a node and a single value.
pub trait SettingValue: Sized {
    const KIND: ValueKind;

    /// Build a value from `node`. `path` names the schema member for errors.
    fn from_node(node: &Node, path: &str) -> Result<Self, XmlfigError>;

    /// Write this value into the (empty) `node`.
    fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError>;
}

/// Hook for types that know how to read and write their own sub-tree.
///
/// ```ignore
/// struct Point { x: i32, y: i32 }
///
/// impl TreeValue for Point {
///     fn from_tree(node: &Node) -> Result<Self, XmlfigError> { /* ... */ }
///     fn to_tree(&self, node: &mut Node) -> Result<(), XmlfigError> { /* ... */ }
/// }
///
/// xmlfig::tree_value!(Point);
/// ```
pub trait TreeValue: Sized {
    fn from_tree(node: &Node) -> Result<Self, XmlfigError>;
    fn to_tree(&self, node: &mut Node) -> Result<(), XmlfigError>;
}

/// Convert `node` into a `T`.
pub fn convert<T: SettingValue>(node: &Node, path: &str) -> Result<T, XmlfigError> {
    trace!(path, kind = ?T::KIND, node = node.name(), "converting node");
    T::from_node(node, path)
}

/// Write `value` into `node`.
pub fn write<T: SettingValue>(value: &T, node: &mut Node) -> Result<(), XmlfigError> {
    value.write_node(node)
}

/// Parse a unit-variant enum by its serde variant name.
pub fn parse_enum<T: DeserializeOwned>(node: &Node, path: &str) -> Result<T, XmlfigError> {
    let raw = node.value();
    let de: StrDeserializer<'_, serde::de::value::Error> = raw.trim().into_deserializer();
    T::deserialize(de).map_err(|e| XmlfigError::conversion(path, &raw, e))
}

/// Write a unit-variant enum as its serde variant name.
pub fn write_enum<T: Serialize>(value: &T, node: &mut Node) -> Result<(), XmlfigError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => {
            node.set_text(name);
            Ok(())
        }
        Ok(other) => Err(XmlfigError::unsupported(
            node.name(),
            format!("enum value serialized to non-text form {other}"),
        )),
        Err(e) => Err(XmlfigError::unsupported(node.name(), e)),
    }
}

/// Run a [`TreeValue::from_tree`] hook, keeping conversion errors as-is and
/// wrapping anything else with the member path.
pub fn from_tree_hook<T: TreeValue>(node: &Node, path: &str) -> Result<T, XmlfigError> {
    T::from_tree(node).map_err(|e| match e {
        e @ XmlfigError::ValueConversion { .. } => e,
        other => XmlfigError::conversion(path, &node.value(), other),
    })
}

macro_rules! parsed_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl SettingValue for $ty {
            const KIND: ValueKind = ValueKind::Scalar;

            fn from_node(node: &Node, path: &str) -> Result<Self, XmlfigError> {
                let raw = node.value();
                raw.trim()
                    .parse::<$ty>()
                    .map_err(|e| XmlfigError::conversion(path, &raw, e))
            }

            fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError> {
                node.set_text(self.to_string());
                Ok(())
            }
        }

        crate::__scalar_field!($ty);
    )*};
}

parsed_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, IpAddr, Ipv4Addr,
    Ipv6Addr, SocketAddr,
);

impl SettingValue for bool {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_node(node: &Node, path: &str) -> Result<Self, XmlfigError> {
        let raw = node.value();
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(XmlfigError::conversion(
                path,
                &raw,
                "expected `true` or `false`",
            ))
        }
    }

    fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError> {
        node.set_text(self.to_string());
        Ok(())
    }
}

crate::__scalar_field!(bool);

impl SettingValue for char {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_node(node: &Node, path: &str) -> Result<Self, XmlfigError> {
        let raw = node.value();
        // A whitespace character is its own value.
        let trimmed = match raw.trim() {
            "" => raw.as_str(),
            t => t,
        };
        trimmed
            .parse::<char>()
            .map_err(|e| XmlfigError::conversion(path, &raw, e))
    }

    fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError> {
        node.set_text(self.to_string());
        Ok(())
    }
}

crate::__scalar_field!(char);

impl SettingValue for String {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_node(node: &Node, _path: &str) -> Result<Self, XmlfigError> {
        Ok(node.value())
    }

    fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError> {
        node.set_text(self.as_str());
        Ok(())
    }
}

crate::__scalar_field!(String);

impl SettingValue for PathBuf {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_node(node: &Node, _path: &str) -> Result<Self, XmlfigError> {
        Ok(PathBuf::from(node.value().trim()))
    }

    fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError> {
        node.set_text(self.display().to_string());
        Ok(())
    }
}

crate::__scalar_field!(PathBuf);

impl<T: SettingValue> SettingValue for Option<T> {
    const KIND: ValueKind = ValueKind::Optional;

    fn from_node(node: &Node, path: &str) -> Result<Self, XmlfigError> {
        if node.is_empty() {
            return Ok(None);
        }
        T::from_node(node, path).map(Some)
    }

    fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError> {
        match self {
            Some(value) => value.write_node(node),
            None => Ok(()),
        }
    }
}

pub const PAIR_KEY: &str = "Key";
pub const PAIR_VALUE: &str = "Value";

impl<A: SettingValue, B: SettingValue> SettingValue for (A, B) {
    const KIND: ValueKind = ValueKind::Pair;

    fn from_node(node: &Node, path: &str) -> Result<Self, XmlfigError> {
        let part = |name: &str| {
            node.child(name).ok_or_else(|| {
                XmlfigError::conversion(path, &node.value(), format!("missing <{name}> entry"))
            })
        };
        let key = A::from_node(part(PAIR_KEY)?, path)?;
        let value = B::from_node(part(PAIR_VALUE)?, path)?;
        Ok((key, value))
    }

    fn write_node(&self, node: &mut Node) -> Result<(), XmlfigError> {
        let mut key = Node::new(PAIR_KEY);
        self.0.write_node(&mut key)?;
        let mut value = Node::new(PAIR_VALUE);
        self.1.write_node(&mut value)?;
        node.push(key);
        node.push(value);
        Ok(())
    }
}

/// Implement [`SettingValue`] and [`FieldType`](crate::FieldType) for
/// unit-variant enums deriving serde's `Serialize` and `Deserialize`.
///
/// Variant names follow the enum's serde naming (`rename_all` etc.).
#[macro_export]
macro_rules! enum_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::SettingValue for $ty {
            const KIND: $crate::ValueKind = $crate::ValueKind::Enum;

            fn from_node(node: &$crate::Node, path: &str) -> Result<Self, $crate::XmlfigError> {
                $crate::convert::parse_enum(node, path)
            }

            fn write_node(&self, node: &mut $crate::Node) -> Result<(), $crate::XmlfigError> {
                $crate::convert::write_enum(self, node)
            }
        }

        $crate::__scalar_field!($ty);
    )+};
}

/// Implement [`SettingValue`] and [`FieldType`](crate::FieldType) for types
/// implementing [`TreeValue`].
#[macro_export]
macro_rules! tree_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::SettingValue for $ty {
            const KIND: $crate::ValueKind = $crate::ValueKind::Tree;

            fn from_node(node: &$crate::Node, path: &str) -> Result<Self, $crate::XmlfigError> {
                $crate::convert::from_tree_hook(node, path)
            }

            fn write_node(&self, node: &mut $crate::Node) -> Result<(), $crate::XmlfigError> {
                <$ty as $crate::TreeValue>::to_tree(self, node)
            }
        }

        $crate::__scalar_field!($ty);
    )+};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Mode, Point};

    fn leaf(text: &str) -> Node {
        Node::with_text("N", text)
    }

    #[test]
    fn integers_parse_with_surrounding_whitespace() {
        assert_eq!(convert::<u16>(&leaf(" 8080 "), "Port").unwrap(), 8080);
        assert_eq!(convert::<i64>(&leaf("-5"), "Offset").unwrap(), -5);
    }

    #[test]
    fn bad_integer_reports_path_and_raw_text() {
        let err = convert::<i32>(&leaf("abc"), "Network.Port").unwrap_err();
        match err {
            XmlfigError::ValueConversion { path, raw, .. } => {
                assert_eq!(path, "Network.Port");
                assert_eq!(raw, "abc");
            }
            other => panic!("Expected ValueConversion, got {other:?}"),
        }
    }

    #[test]
    fn floats_are_locale_invariant() {
        assert_eq!(convert::<f64>(&leaf("1.5"), "Rate").unwrap(), 1.5);
        assert!(convert::<f64>(&leaf("1,5"), "Rate").is_err());
    }

    #[test]
    fn bool_is_case_insensitive() {
        assert!(convert::<bool>(&leaf("True"), "Debug").unwrap());
        assert!(!convert::<bool>(&leaf("FALSE"), "Debug").unwrap());
        assert!(convert::<bool>(&leaf("yes"), "Debug").is_err());
    }

    #[test]
    fn char_ignores_surrounding_whitespace() {
        assert_eq!(convert::<char>(&leaf(" x "), "Sep").unwrap(), 'x');
        assert_eq!(convert::<char>(&leaf(" "), "Sep").unwrap(), ' ');
        assert!(convert::<char>(&leaf(" xy "), "Sep").is_err());
    }

    #[test]
    fn string_keeps_text_verbatim() {
        assert_eq!(convert::<String>(&leaf("  a b "), "Name").unwrap(), "  a b ");
    }

    #[test]
    fn addresses_parse() {
        let addr: SocketAddr = convert(&leaf("127.0.0.1:9000"), "Bind").unwrap();
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn optional_empty_node_is_none() {
        assert_eq!(convert::<Option<u32>>(&leaf(""), "Timeout").unwrap(), None);
        assert_eq!(convert::<Option<u32>>(&leaf("30"), "Timeout").unwrap(), Some(30));
    }

    #[test]
    fn optional_unwraps_conversion_errors() {
        assert!(convert::<Option<u32>>(&leaf("soon"), "Timeout").is_err());
    }

    #[test]
    fn enum_parses_variant_name() {
        assert_eq!(convert::<Mode>(&leaf("slow"), "Mode").unwrap(), Mode::Slow);
    }

    #[test]
    fn enum_rejects_unknown_name() {
        let err = convert::<Mode>(&leaf("medium"), "Mode").unwrap_err();
        assert!(matches!(err, XmlfigError::ValueConversion { ref raw, .. } if raw == "medium"));
    }

    #[test]
    fn enum_writes_variant_name() {
        let mut node = Node::new("Mode");
        write(&Mode::Fast, &mut node).unwrap();
        assert_eq!(node.text(), "fast");
    }

    #[test]
    fn tree_hook_is_used() {
        let node = Node::new("Origin")
            .with_child(Node::with_text("X", "3"))
            .with_child(Node::with_text("Y", "-4"));
        let point: Point = convert(&node, "Origin").unwrap();
        assert_eq!(point, Point { x: 3, y: -4 });

        let mut out = Node::new("Origin");
        write(&point, &mut out).unwrap();
        assert_eq!(out, node);
    }

    #[test]
    fn tree_hook_errors_carry_path() {
        let node = Node::new("Origin").with_child(Node::with_text("X", "3"));
        let err = convert::<Point>(&node, "Origin").unwrap_err();
        assert!(matches!(err, XmlfigError::ValueConversion { ref path, .. } if path == "Origin"));
    }

    #[test]
    fn pair_uses_key_and_value_children() {
        let node = Node::new("Entry")
            .with_child(Node::with_text("Key", "http"))
            .with_child(Node::with_text("Value", "80"));
        let pair: (String, u16) = convert(&node, "Ports").unwrap();
        assert_eq!(pair, ("http".to_string(), 80));

        let mut out = Node::new("Entry");
        write(&pair, &mut out).unwrap();
        assert_eq!(out, node);
    }

    #[test]
    fn pair_missing_value_fails() {
        let node = Node::new("Entry").with_child(Node::with_text("Key", "http"));
        assert!(convert::<(String, u16)>(&node, "Ports").is_err());
    }
}

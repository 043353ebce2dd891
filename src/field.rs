//! Member-level typing: whether a schema member holds a single value or a group.
//!
//! [`FieldType`] is what a [`Member`](crate::Member) requires of its value type.
//! Single values route to the [`convert`](crate::convert) module; arrays and
//! containers route to the [`collection`](crate::collection) adapter.

use crate::convert::{SettingValue, ValueKind};
use crate::error::XmlfigError;
use crate::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Fixed-size array or boxed slice.
    Array,
    /// Growable container.
    Container,
}

/// The mapping shape of a member type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar(ValueKind),
    Group {
        kind: GroupKind,
        element: ValueKind,
        type_params: usize,
    },
}

impl Shape {
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group { .. })
    }
}

/// A type that can be bound to a schema member.
pub trait FieldType: Sized {
    fn shape() -> Shape;

    /// Build the member value from its resolved node.
    fn load(node: &Node, path: &str) -> Result<Self, XmlfigError>;

    /// Fill the member's freshly created node.
    fn save(&self, node: &mut Node, path: &str) -> Result<(), XmlfigError>;

    /// Whether the value is unset and should be written as an empty node.
    fn is_absent(&self) -> bool {
        false
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scalar_field {
    ($ty:ty) => {
        impl $crate::FieldType for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::Scalar(<$ty as $crate::SettingValue>::KIND)
            }

            fn load(node: &$crate::Node, path: &str) -> Result<Self, $crate::XmlfigError> {
                $crate::convert::convert(node, path)
            }

            fn save(&self, node: &mut $crate::Node, _path: &str) -> Result<(), $crate::XmlfigError> {
                $crate::convert::write(self, node)
            }
        }
    };
}

impl<T: SettingValue> FieldType for Option<T> {
    fn shape() -> Shape {
        Shape::Scalar(ValueKind::Optional)
    }

    fn load(node: &Node, path: &str) -> Result<Self, XmlfigError> {
        crate::convert::convert(node, path)
    }

    fn save(&self, node: &mut Node, _path: &str) -> Result<(), XmlfigError> {
        crate::convert::write(self, node)
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<A: SettingValue, B: SettingValue> FieldType for (A, B) {
    fn shape() -> Shape {
        Shape::Scalar(ValueKind::Pair)
    }

    fn load(node: &Node, path: &str) -> Result<Self, XmlfigError> {
        crate::convert::convert(node, path)
    }

    fn save(&self, node: &mut Node, _path: &str) -> Result<(), XmlfigError> {
        crate::convert::write(self, node)
    }
}

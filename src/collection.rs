//! Group members: arrays and single-element-type containers.
//!
//! A group node is read in one of two forms:
//!
//! - **Structured entries**: the node has child nodes; each child is converted
//!   on its own. Child names are not checked.
//!
//!   ```xml
//!   <Hosts><Entry>a.example</Entry><Entry>b.example</Entry></Hosts>
//!   ```
//!
//! - **Flat list**: the node has only text, split on spaces and commas. Empty
//!   tokens are skipped, so `"1, 2,3"` reads as `[1, 2, 3]`.
//!
//!   ```xml
//!   <Ports>1, 2,3</Ports>
//!   ```
//!
//! Saving always uses the structured form with one [`ENTRY`] child per element.
//!
//! Containers with more than one type parameter (maps) and containers that
//! cannot grow are schema-authoring mistakes and fail with
//! [`XmlfigError::UnsupportedSchema`] on both load and save.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::Hash;

use tracing::trace;

use crate::convert::{self, SettingValue};
use crate::error::XmlfigError;
use crate::field::{GroupKind, Shape};
use crate::node::Node;

/// Tag name of each element node written for a group.
pub const ENTRY: &str = "Entry";

/// A sequence type the adapter can build and walk.
pub trait Group: Sized {
    type Element;

    const KIND: GroupKind = GroupKind::Container;
    const TYPE_PARAMS: usize = 1;
    /// Whether elements can be added one by one.
    const EXTENDABLE: bool = true;

    /// Build the group from converted elements, or explain why not.
    fn assemble(items: Vec<Self::Element>) -> Result<Self, String>;

    fn for_each(
        &self,
        f: &mut dyn FnMut(&Self::Element) -> Result<(), XmlfigError>,
    ) -> Result<(), XmlfigError>;
}

pub fn shape<G>() -> Shape
where
    G: Group,
    G::Element: SettingValue,
{
    Shape::Group {
        kind: G::KIND,
        element: <G::Element as SettingValue>::KIND,
        type_params: G::TYPE_PARAMS,
    }
}

/// Reject group types the adapter cannot represent.
pub fn check<G: Group>(path: &str) -> Result<(), XmlfigError> {
    if G::TYPE_PARAMS != 1 {
        return Err(XmlfigError::unsupported(
            path,
            format!(
                "group types take a single element type, found {} type parameters",
                G::TYPE_PARAMS
            ),
        ));
    }
    if !G::EXTENDABLE {
        return Err(XmlfigError::unsupported(
            path,
            "container does not support adding elements",
        ));
    }
    Ok(())
}

/// Split flat-list text into tokens.
pub fn split_flat(raw: &str) -> impl Iterator<Item = &str> {
    raw.split([' ', ',']).filter(|token| !token.is_empty())
}

pub fn load<G>(node: &Node, path: &str) -> Result<G, XmlfigError>
where
    G: Group,
    G::Element: SettingValue,
{
    check::<G>(path)?;

    let items: Vec<G::Element> = if node.has_children() {
        trace!(path, entries = node.children().len(), "loading structured group");
        node.children()
            .iter()
            .map(|entry| convert::convert(entry, path))
            .collect::<Result<_, _>>()?
    } else {
        let raw = node.value();
        trace!(path, raw = %raw, "loading flat group");
        split_flat(&raw)
            .map(|token| convert::convert(&Node::with_text(ENTRY, token), path))
            .collect::<Result<_, _>>()?
    };

    G::assemble(items).map_err(|reason| XmlfigError::conversion(path, &node.value(), reason))
}

pub fn save<G>(group: &G, node: &mut Node, path: &str) -> Result<(), XmlfigError>
where
    G: Group,
    G::Element: SettingValue,
{
    check::<G>(path)?;
    group.for_each(&mut |element| {
        let mut entry = Node::new(ENTRY);
        convert::write(element, &mut entry)?;
        node.push(entry);
        Ok(())
    })
}

macro_rules! extendable_group {
    ($(impl[$($generics:tt)*] $ty:ty;)*) => {$(
        impl<$($generics)*> Group for $ty {
            type Element = T;

            fn assemble(items: Vec<T>) -> Result<Self, String> {
                Ok(items.into_iter().collect())
            }

            fn for_each(
                &self,
                f: &mut dyn FnMut(&T) -> Result<(), XmlfigError>,
            ) -> Result<(), XmlfigError> {
                self.iter().try_for_each(f)
            }
        }
    )*};
}

extendable_group! {
    impl[T] Vec<T>;
    impl[T] VecDeque<T>;
    impl[T] LinkedList<T>;
    impl[T: Ord] BTreeSet<T>;
    impl[T: Eq + Hash] HashSet<T>;
}

impl<T> Group for Box<[T]> {
    type Element = T;
    const KIND: GroupKind = GroupKind::Array;

    fn assemble(items: Vec<T>) -> Result<Self, String> {
        Ok(items.into_boxed_slice())
    }

    fn for_each(
        &self,
        f: &mut dyn FnMut(&T) -> Result<(), XmlfigError>,
    ) -> Result<(), XmlfigError> {
        self.iter().try_for_each(f)
    }
}

impl<T, const N: usize> Group for [T; N] {
    type Element = T;
    const KIND: GroupKind = GroupKind::Array;

    fn assemble(items: Vec<T>) -> Result<Self, String> {
        let found = items.len();
        <[T; N]>::try_from(items).map_err(|_| format!("expected {N} entries, found {found}"))
    }

    fn for_each(
        &self,
        f: &mut dyn FnMut(&T) -> Result<(), XmlfigError>,
    ) -> Result<(), XmlfigError> {
        self.iter().try_for_each(f)
    }
}

impl<K: Ord + Clone, V: Clone> Group for BTreeMap<K, V> {
    type Element = (K, V);
    const TYPE_PARAMS: usize = 2;

    fn assemble(items: Vec<(K, V)>) -> Result<Self, String> {
        Ok(items.into_iter().collect())
    }

    fn for_each(
        &self,
        f: &mut dyn FnMut(&(K, V)) -> Result<(), XmlfigError>,
    ) -> Result<(), XmlfigError> {
        for (k, v) in self {
            f(&(k.clone(), v.clone()))?;
        }
        Ok(())
    }
}

impl<K: Eq + Hash + Clone, V: Clone> Group for HashMap<K, V> {
    type Element = (K, V);
    const TYPE_PARAMS: usize = 2;

    fn assemble(items: Vec<(K, V)>) -> Result<Self, String> {
        Ok(items.into_iter().collect())
    }

    fn for_each(
        &self,
        f: &mut dyn FnMut(&(K, V)) -> Result<(), XmlfigError>,
    ) -> Result<(), XmlfigError> {
        for (k, v) in self {
            f(&(k.clone(), v.clone()))?;
        }
        Ok(())
    }
}

/// Implement [`FieldType`] for a [`Group`] by routing through this module.
#[macro_export]
macro_rules! group_field {
    ($(impl[$($generics:tt)*] $ty:ty;)*) => {$(
        impl<$($generics)*> $crate::FieldType for $ty {
            fn shape() -> $crate::Shape {
                $crate::collection::shape::<Self>()
            }

            fn load(node: &$crate::Node, path: &str) -> Result<Self, $crate::XmlfigError> {
                $crate::collection::load(node, path)
            }

            fn save(&self, node: &mut $crate::Node, path: &str) -> Result<(), $crate::XmlfigError> {
                $crate::collection::save(self, node, path)
            }
        }
    )*};
}

group_field! {
    impl[T: SettingValue] Vec<T>;
    impl[T: SettingValue] VecDeque<T>;
    impl[T: SettingValue] LinkedList<T>;
    impl[T: SettingValue + Ord] BTreeSet<T>;
    impl[T: SettingValue + Eq + Hash] HashSet<T>;
    impl[T: SettingValue] Box<[T]>;
    impl[T: SettingValue, const N: usize] [T; N];
    impl[K: SettingValue + Ord + Clone, V: SettingValue + Clone] BTreeMap<K, V>;
    impl[K: SettingValue + Eq + Hash + Clone, V: SettingValue + Clone] HashMap<K, V>;
}

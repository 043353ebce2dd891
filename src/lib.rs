//! Declarative XML settings for Rust applications. Describe a struct's
//! members once, and load, save, or reset them as a settings document.
//!
//! Xmlfig maps a settings struct onto a tree of named XML nodes through an
//! explicit registration table: each member names its document path, an
//! optional default, and optional custom conversion hooks. A single walker
//! reads and writes every member against that table, so there is no
//! hand-written parsing and no runtime type inspection.
//!
//! ```ignore
//! impl Settings for AppSettings {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .member(member!(host => "Host").default("localhost".into()))
//!             .member(member!(width => "Window.Width").default(800))
//!             .member(member!(recent => "RecentFiles").default(Vec::new()))
//!             .member(member!(api_key => "ApiKey"))
//!     }
//! }
//!
//! let settings = Xmlfig::builder::<AppSettings>()
//!     .app_name("myapp")
//!     .load()?;
//! ```
//!
//! That call looks for `myapp.xml` in the platform config directory, loads it
//! if it exists, and otherwise fills every member with its default.
//!
//! # Documents
//!
//! A settings document has one root element named after the settings type
//! (override with [`Settings::root_name`]). Member paths are dotted:
//! `Window.Width` is the `Width` node inside `Window`.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <AppSettings>
//!   <Host>localhost</Host>
//!   <Window>
//!     <Width>800</Width>
//!   </Window>
//!   <RecentFiles>
//!     <Entry>a.txt</Entry>
//!     <Entry>b.txt</Entry>
//!   </RecentFiles>
//!   <ApiKey>secret</ApiKey>
//! </AppSettings>
//! ```
//!
//! On load, a path is resolved by finding its first segment anywhere below
//! the root, then each remaining segment anywhere below the previous match. A
//! missing node falls back to the member's default; a member without a
//! default fails with [`XmlfigError::MissingNode`].
//!
//! Loading is all-or-nothing: values are assigned only after every member
//! has been read, so a failing document leaves the settings untouched.
//!
//! # Values
//!
//! - **Scalars**: integers, floats, `bool` (case-insensitive), `char`,
//!   `String`, `PathBuf`, and IP/socket addresses. See [`SettingValue`].
//! - **Enumerations**: unit enums deriving serde `Serialize`/`Deserialize`,
//!   opted in with [`enum_value!`]. Variant names follow the enum's serde
//!   naming.
//! - **Composites**: types implementing [`TreeValue`] read and write their
//!   own subtree, opted in with [`tree_value!`].
//! - **`Option<T>`**: an empty node is `None`.
//! - **Collections**: `Vec`, `VecDeque`, `LinkedList`, `BTreeSet`, `HashSet`,
//!   `Box<[T]>` and `[T; N]`. Entries are `<Entry>` children, or a flat text
//!   list split on spaces and commas (`<Tags>a, b c</Tags>`). Maps are
//!   rejected with [`XmlfigError::UnsupportedSchema`].
//!
//! Members that need a bespoke format register a [`Loader`] and [`Saver`]
//! with [`Member::loader`] and [`Member::saver`].
//!
//! # Core library, no CLI framework required
//!
//! Loading, saving, default generation and key lookup work through
//! [`XmlfigBuilder`], [`SettingsFile`] and [`ConfigAction`]. For
//! [clap](https://docs.rs/clap) users, an optional adapter (the `cli`
//! module, behind the `clap` Cargo feature, on by default) provides
//! [`SettingsArgs`], giving your app `settings list|gen|get|reset`
//! subcommands. To use xmlfig without clap:
//!
//! ```toml
//! xmlfig = { version = "...", default-features = false }
//! ```
//!
//! # Storage
//!
//! The mapping engine only produces and consumes [`Node`] trees. Moving
//! trees to and from storage is the job of a [`Persistence`] implementation;
//! [`XmlFile`] is the default. Each [`SettingsFile`] owns its location, so
//! several settings files can live side by side.
//!
//! # Logging
//!
//! Lifecycle decisions are reported as `tracing` debug events and member
//! resolution as trace events. The library never installs a subscriber.
//!
//! # Error handling
//!
//! All fallible operations return [`XmlfigError`]. Conversion errors carry
//! the member path and the raw text that failed to convert. See the
//! [`error`] module for the full set.

pub mod collection;
pub mod convert;
pub mod error;
pub mod node;
pub mod schema;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod descriptor;
mod field;
mod file;
mod flatten;
mod lifecycle;
mod ops;
mod persist;

#[cfg(test)]
mod fixtures;

pub use builder::{Xmlfig, XmlfigBuilder};
#[cfg(feature = "clap")]
pub use cli::{SettingsArgs, SettingsSubcommand};
pub use collection::Group;
pub use convert::{SettingValue, TreeValue, ValueKind};
pub use descriptor::{Loader, MemberDescriptor, Saver};
pub use error::XmlfigError;
pub use field::{FieldType, GroupKind, Shape};
pub use lifecycle::{LoadSource, SettingsFile};
pub use node::Node;
pub use ops::ConfigResult;
pub use persist::{Persistence, XmlFile, parse_document, render_document};
pub use schema::{Member, MemberInfo, Schema, Settings};
pub use types::{ConfigAction, SearchPath};

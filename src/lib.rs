//! # guise
//!
//! Server-side UI components depicted per platform, with normalized input
//! events.
//!
//! Application code builds a tree of platform-independent components bound to
//! data models. A platform depicts that tree (XHTML for browsers, a text
//! outline for consoles) through interchangeable depictor strategies, and
//! routes user input back into the tree as typed events.
//!
//! ## Core Systems
//!
//! - **[`input`]**: keys, modifier sets, keystroke and click gestures, terminal input
//! - **[`event`]**: action and keyboard events, property changes, listeners, dispatch, bindings
//! - **[`model`]**: label, action, value, menu and table models, validators
//! - **[`prototype`]**: shared action descriptors referenced by many components
//! - **[`component`]**: slotmap-backed component tree with property setters and queries
//! - **[`platform`]**: depict contexts, depictor registries, the web and console platforms
//! - **[`transfer`]**: media types and transferable objects for drag and drop
//! - **[`container`]**: path and URI resolution, resources, installed applications
//! - **[`session`]**: one tree on one platform, with event delivery and focus
//! - **[`config`]**: session configuration, in code or from TOML
//!
//! ## Example
//!
//! ```
//! use guise::component::Component;
//! use guise::session::Session;
//!
//! let mut session = Session::web().unwrap();
//! let root = session.set_root(Component::frame("Hello"));
//! session.tree_mut().add_child(root, Component::button("OK")).unwrap();
//! let markup = session.depict_to_string().unwrap();
//! assert!(markup.contains(">OK</button>"));
//! ```

// Foundation
pub mod error;
pub mod input;

// Events and models
pub mod event;
pub mod model;
pub mod prototype;

// Components
pub mod component;

// Depiction
pub mod platform;
pub mod transfer;

// Hosting
pub mod config;
pub mod container;
pub mod session;

// Headless test helpers
pub mod testing;

pub use error::{Error, ErrorKind, Result};

//! Component tree: slotmap-backed arena of components and their models.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{
    Component, ComponentId, ComponentKind, ComponentModel, Enableable, HasModel, Labelable,
};
pub use tree::ComponentTree;

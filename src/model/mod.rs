//! Data models components bind to. None of them know how they are depicted.

pub mod action;
pub mod label;
pub mod layout;
pub mod menu;
pub mod resource;
pub mod table;
pub mod validator;
pub mod value;

pub use action::ActionModel;
pub use label::LabelModel;
pub use layout::{FrameModel, LayoutModel, Orientation};
pub use menu::MenuModel;
pub use resource::{ImageModel, InlineFrameModel};
pub use table::{Cell, CellChange, SharedTable, TableColumn, TableModel, TableSource};
pub use validator::{RegexValidator, RequiredValidator, ValidationError, Validator};
pub use value::ValueModel;

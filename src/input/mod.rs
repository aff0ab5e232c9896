//! Keys, gestures and the terminal input boundary.

pub mod gesture;
pub mod key;
pub mod terminal;

pub use gesture::{
    GestureInput, Input, KeySet, KeystrokeInput, ModifierGesture, MouseButton, MouseClickInput,
    PlatformInput,
};
pub use key::Key;

//! Component data: kinds, per-kind models, and the shared component state.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::new_key_type;

use crate::event::{
    KeyboardEvent, ListenerId, ListenerList, Propagation, PropertyChangeEvent,
    PropertyChangeSupport, PropertyName,
};
use crate::model::{
    ActionModel, FrameModel, ImageModel, InlineFrameModel, LabelModel, LayoutModel, MenuModel,
    Orientation, TableSource, ValueModel,
};
use crate::prototype::{ActionPrototype, PrototypeKind};

new_key_type! {
    /// Identity of a component in a [`ComponentTree`](super::ComponentTree).
    pub struct ComponentId;
}

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// The kind of a component, used to resolve its depictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Panel,
    Frame,
    Label,
    Button,
    Link,
    Menu,
    Table,
    TextControl,
    Picture,
    InlineFrame,
}

impl ComponentKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Frame => "frame",
            Self::Label => "label",
            Self::Button => "button",
            Self::Link => "link",
            Self::Menu => "menu",
            Self::Table => "table",
            Self::TextControl => "text-control",
            Self::Picture => "picture",
            Self::InlineFrame => "inline-frame",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ComponentModel
// ---------------------------------------------------------------------------

/// The model a component owns. The variant determines the component's kind.
///
/// A label's model is its [`LabelModel`], which every component carries.
pub enum ComponentModel {
    Panel(LayoutModel),
    Frame(FrameModel),
    Label,
    Button(ActionModel),
    Link(ActionModel),
    Menu(MenuModel),
    Table(Arc<dyn TableSource>),
    TextControl(ValueModel<String>),
    Picture(ImageModel),
    InlineFrame(InlineFrameModel),
}

impl ComponentModel {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Panel(_) => ComponentKind::Panel,
            Self::Frame(_) => ComponentKind::Frame,
            Self::Label => ComponentKind::Label,
            Self::Button(_) => ComponentKind::Button,
            Self::Link(_) => ComponentKind::Link,
            Self::Menu(_) => ComponentKind::Menu,
            Self::Table(_) => ComponentKind::Table,
            Self::TextControl(_) => ComponentKind::TextControl,
            Self::Picture(_) => ComponentKind::Picture,
            Self::InlineFrame(_) => ComponentKind::InlineFrame,
        }
    }

    /// The action model of a button or link.
    pub fn action(&self) -> Option<&ActionModel> {
        match self {
            Self::Button(model) | Self::Link(model) => Some(model),
            _ => None,
        }
    }
}

impl fmt::Debug for ComponentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel(model) => f.debug_tuple("Panel").field(model).finish(),
            Self::Frame(model) => f.debug_tuple("Frame").field(model).finish(),
            Self::Label => f.write_str("Label"),
            Self::Button(model) => f.debug_tuple("Button").field(model).finish(),
            Self::Link(model) => f.debug_tuple("Link").field(model).finish(),
            Self::Menu(model) => f.debug_tuple("Menu").field(model).finish(),
            Self::Table(source) => f
                .debug_tuple("Table")
                .field(&source.column_labels())
                .finish(),
            Self::TextControl(model) => f.debug_tuple("TextControl").field(model).finish(),
            Self::Picture(model) => f.debug_tuple("Picture").field(model).finish(),
            Self::InlineFrame(model) => f.debug_tuple("InlineFrame").field(model).finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Something that presents a label and an icon.
pub trait Labelable {
    fn label(&self) -> Option<String>;
    fn icon(&self) -> Option<String>;
}

/// Something that can be enabled or disabled.
pub trait Enableable {
    fn is_enabled(&self) -> bool;
}

/// Something that owns a model.
pub trait HasModel {
    type Model;
    fn model(&self) -> &Self::Model;
}

impl Labelable for ActionPrototype {
    fn label(&self) -> Option<String> {
        ActionPrototype::label(self)
    }

    fn icon(&self) -> Option<String> {
        ActionPrototype::icon(self)
    }
}

impl Enableable for ActionPrototype {
    fn is_enabled(&self) -> bool {
        ActionPrototype::is_enabled(self)
    }
}

// ---------------------------------------------------------------------------
// OwnPresentation
// ---------------------------------------------------------------------------

/// The label, icon and enabled flag a component sets for itself.
///
/// Shared with the listener that forwards prototype changes, which must see
/// the component's current state to tell whether a change shows through.
#[derive(Debug, Clone)]
pub(crate) struct OwnPresentation {
    label: LabelModel,
    enabled: bool,
}

impl OwnPresentation {
    /// Whether the component's own state hides a prototype change of `property`.
    pub(crate) fn masks(&self, property: PropertyName) -> bool {
        match property {
            PropertyName::Label => self.label.label().is_some(),
            PropertyName::Icon => self.label.icon().is_some(),
            PropertyName::Enabled => !self.enabled,
            _ => false,
        }
    }
}

impl Default for OwnPresentation {
    fn default() -> Self {
        Self {
            label: LabelModel::new(),
            enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// One node of the component tree.
#[derive(Debug)]
pub struct Component {
    model: ComponentModel,
    name: Option<String>,
    classes: Vec<String>,
    own: Arc<RwLock<OwnPresentation>>,
    prototype: Option<Arc<ActionPrototype>>,
    pub(crate) prototype_listener: Option<ListenerId>,
    property_listeners: PropertyChangeSupport,
    key_listeners: ListenerList<KeyboardEvent, Propagation>,
}

impl Component {
    pub fn new(model: ComponentModel) -> Self {
        Self {
            model,
            name: None,
            classes: Vec::new(),
            own: Arc::default(),
            prototype: None,
            prototype_listener: None,
            property_listeners: PropertyChangeSupport::new(),
            key_listeners: ListenerList::new(),
        }
    }

    // ── Kinds ────────────────────────────────────────────────────────

    /// A vertical panel.
    pub fn panel() -> Self {
        Self::new(ComponentModel::Panel(LayoutModel::default()))
    }

    pub fn panel_with(orientation: Orientation) -> Self {
        Self::new(ComponentModel::Panel(LayoutModel::new(orientation)))
    }

    pub fn frame(title: impl Into<String>) -> Self {
        Self::new(ComponentModel::Frame(FrameModel::default())).with_label(title)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(ComponentModel::Label).with_label(text)
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new(ComponentModel::Button(ActionModel::new())).with_label(label)
    }

    pub fn link(label: impl Into<String>) -> Self {
        Self::new(ComponentModel::Link(ActionModel::new())).with_label(label)
    }

    pub fn menu(label: impl Into<String>) -> Self {
        Self::new(ComponentModel::Menu(MenuModel::new())).with_label(label)
    }

    pub fn table(source: Arc<dyn TableSource>) -> Self {
        Self::new(ComponentModel::Table(source))
    }

    pub fn text_control(model: ValueModel<String>) -> Self {
        Self::new(ComponentModel::TextControl(model))
    }

    pub fn picture(source: impl Into<String>) -> Self {
        Self::new(ComponentModel::Picture(ImageModel::new(source)))
    }

    pub fn inline_frame(source: impl Into<String>) -> Self {
        Self::new(ComponentModel::InlineFrame(InlineFrameModel::new(source)))
    }

    /// A button or menu presenting a shared prototype.
    pub fn from_prototype(prototype: Arc<ActionPrototype>) -> Self {
        let model = match prototype.kind() {
            PrototypeKind::Action => ComponentModel::Button(ActionModel::new()),
            PrototypeKind::Menu => ComponentModel::Menu(MenuModel::new()),
        };
        let mut component = Self::new(model);
        component.prototype = Some(prototype);
        component
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.set_own_label(Some(label.into()));
        self
    }

    pub fn with_icon(self, icon: impl Into<String>) -> Self {
        self.set_own_icon(Some(icon.into()));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a style class (builder). Duplicates are ignored.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn enabled(self, enabled: bool) -> Self {
        self.set_own_enabled(enabled);
        self
    }

    // ── State ────────────────────────────────────────────────────────

    pub fn kind(&self) -> ComponentKind {
        self.model.kind()
    }

    pub(crate) fn model_mut(&mut self) -> &mut ComponentModel {
        &mut self.model
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.name, name)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The component's own label model, ignoring any prototype.
    pub fn label_model(&self) -> LabelModel {
        self.own.read().label.clone()
    }

    pub(crate) fn set_own_label(&self, label: Option<String>) {
        self.own.write().label.set_label(label);
    }

    pub(crate) fn set_own_icon(&self, icon: Option<String>) {
        self.own.write().label.set_icon(icon);
    }

    pub(crate) fn own_presentation(&self) -> Arc<RwLock<OwnPresentation>> {
        Arc::clone(&self.own)
    }

    pub fn prototype(&self) -> Option<&Arc<ActionPrototype>> {
        self.prototype.as_ref()
    }

    pub(crate) fn set_own_enabled(&self, enabled: bool) {
        self.own.write().enabled = enabled;
    }

    /// Whether keyboard focus can rest on this component.
    pub fn is_focusable(&self) -> bool {
        matches!(
            self.kind(),
            ComponentKind::Button
                | ComponentKind::Link
                | ComponentKind::Menu
                | ComponentKind::TextControl
        )
    }

    /// The text value of a text control.
    pub fn value(&self) -> Option<&str> {
        match &self.model {
            ComponentModel::TextControl(model) => model.value().map(String::as_str),
            _ => None,
        }
    }

    // ── Listeners ────────────────────────────────────────────────────

    pub fn add_property_listener(
        &self,
        listener: impl Fn(&PropertyChangeEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.property_listeners.add_listener(listener)
    }

    pub fn remove_property_listener(&self, id: ListenerId) -> bool {
        self.property_listeners.remove_listener(id)
    }

    pub(crate) fn property_support(&self) -> &PropertyChangeSupport {
        &self.property_listeners
    }

    /// Listen for keystrokes delivered to this component or bubbling from a descendant.
    pub fn add_key_listener(
        &self,
        listener: impl Fn(&KeyboardEvent) -> Propagation + Send + Sync + 'static,
    ) -> ListenerId {
        self.key_listeners.add(listener)
    }

    pub fn remove_key_listener(&self, id: ListenerId) -> bool {
        self.key_listeners.remove(id)
    }

    pub(crate) fn key_listeners(&self) -> &ListenerList<KeyboardEvent, Propagation> {
        &self.key_listeners
    }
}

impl Labelable for Component {
    /// The own label, or the prototype's when the component has none.
    fn label(&self) -> Option<String> {
        let own = self.own.read();
        match (own.label.label(), &self.prototype) {
            (Some(label), _) => Some(label.to_owned()),
            (None, Some(prototype)) => prototype.label(),
            (None, None) => None,
        }
    }

    fn icon(&self) -> Option<String> {
        let own = self.own.read();
        match (own.label.icon(), &self.prototype) {
            (Some(icon), _) => Some(icon.to_owned()),
            (None, Some(prototype)) => prototype.icon(),
            (None, None) => None,
        }
    }
}

impl Enableable for Component {
    /// Enabled only if both the component and its prototype are.
    fn is_enabled(&self) -> bool {
        self.own.read().enabled && self.prototype.as_ref().map_or(true, |p| p.is_enabled())
    }
}

impl HasModel for Component {
    type Model = ComponentModel;

    fn model(&self) -> &ComponentModel {
        &self.model
    }
}

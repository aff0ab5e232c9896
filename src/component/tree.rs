//! The component tree: structure, property setters, and depiction ids.

use slotmap::{Key, KeyData, SecondaryMap, SlotMap};

use super::node::{Component, ComponentId, ComponentModel, Enableable, Labelable};
use crate::error::{Error, Result};
use crate::event::{
    EventSource, ListenerId, PropertyChangeEvent, PropertyChangeSupport, PropertyName,
    PropertyValue,
};

const EMPTY_CHILDREN: &[ComponentId] = &[];

/// Arena of components with parent/child links.
///
/// Every component has at most one parent. Property setters on the tree
/// notify the component's listeners and then the tree-wide listeners.
#[derive(Debug)]
pub struct ComponentTree {
    pub(crate) components: SlotMap<ComponentId, Component>,
    children: SecondaryMap<ComponentId, Vec<ComponentId>>,
    parent: SecondaryMap<ComponentId, ComponentId>,
    root: Option<ComponentId>,
    listeners: PropertyChangeSupport,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self {
            components: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
            listeners: PropertyChangeSupport::new(),
        }
    }

    // ── Structure ────────────────────────────────────────────────────

    /// Insert a component with no parent. The first one becomes the root.
    pub fn insert(&mut self, component: Component) -> ComponentId {
        let id = self.components.insert(component);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        self.bind_prototype(id);
        id
    }

    /// Insert a component as the last child of `parent`.
    pub fn add_child(&mut self, parent: ComponentId, component: Component) -> Result<ComponentId> {
        if !self.components.contains_key(parent) {
            return Err(Error::invalid_argument("parent component is not in the tree"));
        }
        let id = self.components.insert(component);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        self.bind_prototype(id);
        Ok(id)
    }

    /// Forward prototype changes as property changes of the component.
    ///
    /// A change the component's own label, icon or disabled flag hides is not
    /// forwarded. When the own state does not hide it, the prototype's old and
    /// new values are also the component's effective ones.
    fn bind_prototype(&mut self, id: ComponentId) {
        let Some(component) = self.components.get(id) else {
            return;
        };
        let Some(prototype) = component.prototype().cloned() else {
            return;
        };
        let presentation = component.own_presentation();
        let own = component.property_support().clone();
        let tree = self.listeners.clone();
        let listener = prototype.add_property_listener(move |event: &PropertyChangeEvent| {
            if presentation.read().masks(event.property()) {
                return;
            }
            let event = event.with_source(EventSource::Component(id));
            own.fire(&event);
            tree.fire(&event);
        });
        if let Some(component) = self.components.get_mut(id) {
            component.prototype_listener = Some(listener);
        }
    }

    /// Remove a component and its whole subtree.
    ///
    /// Returns the removed component, or `None` if it was not in the tree.
    pub fn remove(&mut self, id: ComponentId) -> Option<Component> {
        if !self.components.contains_key(id) {
            return None;
        }
        if let Some(parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = None;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(kids) = self.children.remove(current) {
                pending.extend(kids);
            }
            self.parent.remove(current);
            if let Some(component) = self.components.remove(current) {
                if let (Some(prototype), Some(listener)) =
                    (component.prototype(), component.prototype_listener)
                {
                    prototype.remove_property_listener(listener);
                }
                if current == id {
                    removed = Some(component);
                }
            }
        }
        removed
    }

    /// Move `node` under `new_parent`, detaching it from its old parent first.
    ///
    /// Fails if either component is missing or if `new_parent` lies inside
    /// `node`'s subtree.
    pub fn reparent(&mut self, node: ComponentId, new_parent: ComponentId) -> Result<()> {
        if !self.contains(node) || !self.contains(new_parent) {
            return Err(Error::invalid_argument("component is not in the tree"));
        }
        if node == new_parent || self.ancestors(new_parent).contains(&node) {
            return Err(Error::invalid_argument(
                "a component cannot become a descendant of itself",
            ));
        }
        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }
        if self.root == Some(node) {
            self.root = None;
        }
        self.parent.insert(node, new_parent);
        if let Some(siblings) = self.children.get_mut(new_parent) {
            siblings.push(node);
        }
        Ok(())
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.parent.get(id).copied()
    }

    /// Children in insertion order; empty if none or if `id` is missing.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// From the immediate parent up to the root, excluding `id`.
    pub fn ancestors(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent.get(current).copied() {
            result.push(parent);
            current = parent;
        }
        result
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    /// Like [`get`](Self::get), but a missing component is an error.
    pub fn component(&self, id: ComponentId) -> Result<&Component> {
        self.components
            .get(id)
            .ok_or_else(|| Error::invalid_argument(format!("no component {}", depict_id(id))))
    }

    fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.components
            .get_mut(id)
            .ok_or_else(|| Error::invalid_argument(format!("no component {}", depict_id(id))))
    }

    pub fn root(&self) -> Option<ComponentId> {
        self.root
    }

    pub fn set_root(&mut self, id: ComponentId) {
        self.root = Some(id);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.components.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // ── Properties ───────────────────────────────────────────────────

    /// Listen for property changes of every component in the tree.
    pub fn add_property_listener(
        &self,
        listener: impl Fn(&PropertyChangeEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.add_listener(listener)
    }

    pub fn remove_property_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove_listener(id)
    }

    fn notify<T>(&self, id: ComponentId, property: PropertyName, old: T, new: T) -> bool
    where
        T: PartialEq + Into<PropertyValue>,
    {
        if old == new {
            return false;
        }
        let event = PropertyChangeEvent::new(EventSource::Component(id), property, old, new);
        if let Some(component) = self.components.get(id) {
            component.property_support().fire(&event);
        }
        self.listeners.fire(&event);
        true
    }

    /// Set the component's own label. Returns whether the presented label changed.
    pub fn set_label(&mut self, id: ComponentId, label: Option<String>) -> Result<bool> {
        let component = self.component_mut(id)?;
        let old = component.label();
        component.set_own_label(label);
        let new = component.label();
        Ok(self.notify(id, PropertyName::Label, old, new))
    }

    /// Set the component's own icon. Returns whether the presented icon changed.
    pub fn set_icon(&mut self, id: ComponentId, icon: Option<String>) -> Result<bool> {
        let component = self.component_mut(id)?;
        let old = component.icon();
        component.set_own_icon(icon);
        let new = component.icon();
        Ok(self.notify(id, PropertyName::Icon, old, new))
    }

    /// Returns whether the effective enabled state changed.
    pub fn set_enabled(&mut self, id: ComponentId, enabled: bool) -> Result<bool> {
        let component = self.component_mut(id)?;
        let old = component.is_enabled();
        component.set_own_enabled(enabled);
        let new = component.is_enabled();
        Ok(self.notify(id, PropertyName::Enabled, old, new))
    }

    pub fn set_name(&mut self, id: ComponentId, name: Option<String>) -> Result<bool> {
        let old = self.component_mut(id)?.set_name(name.clone());
        Ok(self.notify(id, PropertyName::Name, old, name))
    }

    /// Set a text control's value after validating it.
    ///
    /// A rejected value fails with [`Error::Validation`] and changes nothing.
    pub fn set_value(&mut self, id: ComponentId, value: Option<String>) -> Result<bool> {
        let ComponentModel::TextControl(model) = self.component_mut(id)?.model_mut() else {
            return Err(Error::invalid_argument(format!(
                "component {} has no value",
                depict_id(id)
            )));
        };
        let old = model.set_value(value.clone())?;
        Ok(self.notify(id, PropertyName::Value, old, value))
    }

    /// Open or close a menu.
    pub fn set_menu_open(&mut self, id: ComponentId, open: bool) -> Result<bool> {
        let ComponentModel::Menu(model) = self.component_mut(id)?.model_mut() else {
            return Err(Error::invalid_argument(format!(
                "component {} is not a menu",
                depict_id(id)
            )));
        };
        let old = model.set_open(open);
        Ok(self.notify(id, PropertyName::Open, old, open))
    }

    /// Change the resource a picture or inline frame shows.
    pub fn set_source(&mut self, id: ComponentId, source: Option<String>) -> Result<bool> {
        let old = match self.component_mut(id)?.model_mut() {
            ComponentModel::Picture(model) => model.set_source(source.clone()),
            ComponentModel::InlineFrame(model) => model.set_source(source.clone()),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "component {} has no source",
                    depict_id(id)
                )))
            }
        };
        Ok(self.notify(id, PropertyName::Source, old, source))
    }

    // ── Depiction ids ────────────────────────────────────────────────

    /// The id written for a component in depicted output.
    pub fn depict_id(&self, id: ComponentId) -> String {
        depict_id(id)
    }

    /// The component a depicted id refers to, if it is still in the tree.
    pub fn find_by_depict_id(&self, depict_id: &str) -> Option<ComponentId> {
        let hex = depict_id.strip_prefix("id")?;
        let bits = u64::from_str_radix(hex, 16).ok()?;
        let id = ComponentId::from(KeyData::from_ffi(bits));
        self.contains(id).then_some(id)
    }
}

fn depict_id(id: ComponentId) -> String {
    format!("id{:x}", id.data().as_ffi())
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{RequiredValidator, ValueModel};
    use crate::prototype::ActionPrototype;

    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (ComponentTree, ComponentId, ComponentId, ComponentId, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::frame("Root"));
        let a = tree.add_child(root, Component::panel().with_name("a")).unwrap();
        let b = tree.add_child(root, Component::panel().with_name("b")).unwrap();
        let c = tree.add_child(a, Component::button("OK")).unwrap();
        let d = tree.add_child(a, Component::label("Name")).unwrap();
        (tree, root, a, b, c, d)
    }

    fn record(tree: &ComponentTree) -> Arc<Mutex<Vec<PropertyChangeEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        tree.add_property_listener(move |event| sink.lock().push(event.clone()));
        events
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn insert_sets_root() {
        let mut tree = ComponentTree::new();
        let first = tree.insert(Component::panel());
        let _second = tree.insert(Component::panel());
        assert_eq!(tree.root(), Some(first));
    }

    #[test]
    fn parent_and_children() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert!(tree.children(c).is_empty());
    }

    #[test]
    fn add_child_to_missing_parent() {
        let (mut tree, _, _, b, ..) = build_tree();
        tree.remove(b);
        let err = tree.add_child(b, Component::label("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
    }

    #[test]
    fn ancestors() {
        let (tree, root, a, _, c, _) = build_tree();
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert!(tree.ancestors(root).is_empty());
    }

    #[test]
    fn remove_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        let removed = tree.remove(a).unwrap();
        assert_eq!(removed.name(), Some("a"));
        for gone in [a, c, d] {
            assert!(!tree.contains(gone));
        }
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);
        assert!(tree.remove(a).is_none());
    }

    #[test]
    fn remove_root_clears_root() {
        let (mut tree, root, ..) = build_tree();
        tree.remove(root);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn reparent_detaches_first() {
        let (mut tree, root, a, b, c, _) = build_tree();
        tree.reparent(c, b).unwrap();
        assert_eq!(tree.parent(c), Some(b));
        assert!(!tree.children(a).contains(&c));
        assert_eq!(tree.ancestors(c), vec![b, root]);
    }

    #[test]
    fn reparent_rejects_cycles() {
        let (mut tree, root, a, _, c, _) = build_tree();
        assert!(tree.reparent(a, c).is_err());
        assert!(tree.reparent(a, a).is_err());
        assert!(tree.reparent(root, a).is_err());
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn walk_depth_first() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.walk_depth_first(a), vec![a, c, d]);
    }

    // ── Properties ───────────────────────────────────────────────────

    #[test]
    fn set_label_notifies_component_and_tree() {
        let (mut tree, _, _, _, c, _) = build_tree();
        let all = record(&tree);
        let own = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&own);
        tree.get(c)
            .unwrap()
            .add_property_listener(move |_| *counter.lock() += 1);

        assert!(tree.set_label(c, Some("Cancel".into())).unwrap());
        assert!(!tree.set_label(c, Some("Cancel".into())).unwrap());

        assert_eq!(*own.lock(), 1);
        let all = all.lock();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].source(), EventSource::Component(c));
        assert_eq!(all[0].old_value(), &PropertyValue::from("OK"));
    }

    #[test]
    fn enabled_toggle_fires_twice() {
        let (mut tree, _, _, _, c, _) = build_tree();
        let events = record(&tree);
        tree.set_enabled(c, true).unwrap();
        tree.set_enabled(c, false).unwrap();
        tree.set_enabled(c, true).unwrap();
        assert_eq!(events.lock().len(), 2);
    }

    #[test]
    fn set_value_validates() {
        let mut tree = ComponentTree::new();
        let field = tree.insert(Component::text_control(
            ValueModel::new()
                .with_default("x".to_string())
                .with_validator(Arc::new(RequiredValidator)),
        ));
        let events = record(&tree);
        let err = tree.set_value(field, Some(String::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(tree.get(field).unwrap().value(), Some("x"));
        assert!(tree.set_value(field, Some("y".into())).unwrap());
        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn set_value_on_label_is_argument_error() {
        let (mut tree, .., d) = build_tree();
        let err = tree.set_value(d, Some("v".into())).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn menu_open() {
        let mut tree = ComponentTree::new();
        let menu = tree.insert(Component::menu("File"));
        assert!(tree.set_menu_open(menu, true).unwrap());
        assert!(!tree.set_menu_open(menu, true).unwrap());
    }

    #[test]
    fn set_source() {
        let mut tree = ComponentTree::new();
        let picture = tree.insert(Component::picture("a.png"));
        assert!(tree.set_source(picture, Some("b.png".into())).unwrap());
        let label = tree.insert(Component::label("x"));
        assert!(tree.set_source(label, None).is_err());
    }

    #[test]
    fn prototype_changes_refire_per_component() {
        let prototype = Arc::new(ActionPrototype::new("Save"));
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::panel());
        let first = tree
            .add_child(root, Component::from_prototype(Arc::clone(&prototype)))
            .unwrap();
        let second = tree
            .add_child(root, Component::from_prototype(Arc::clone(&prototype)))
            .unwrap();
        let events = record(&tree);

        prototype.set_label(Some("Save all".into()));

        let sources: Vec<_> = events.lock().iter().map(|e| e.source()).collect();
        assert_eq!(
            sources,
            vec![EventSource::Component(first), EventSource::Component(second)]
        );
        assert_eq!(
            tree.get(second).unwrap().label().as_deref(),
            Some("Save all")
        );
    }

    #[test]
    fn own_state_hides_prototype_changes() {
        let prototype = Arc::new(ActionPrototype::new("Save"));
        let mut tree = ComponentTree::new();
        let button = tree.insert(
            Component::from_prototype(Arc::clone(&prototype))
                .with_label("Custom")
                .enabled(false),
        );
        let events = record(&tree);

        prototype.set_label(Some("Store".into()));
        prototype.set_enabled(false);

        let component = tree.get(button).unwrap();
        assert_eq!(component.label().as_deref(), Some("Custom"));
        assert!(!component.is_enabled());
        assert!(events.lock().is_empty());
    }

    #[test]
    fn prototype_changes_show_through_once_own_state_is_cleared() {
        let prototype = Arc::new(ActionPrototype::new("Save"));
        let mut tree = ComponentTree::new();
        let button = tree.insert(
            Component::from_prototype(Arc::clone(&prototype))
                .with_label("Custom")
                .enabled(false),
        );
        tree.set_label(button, None).unwrap();
        tree.set_enabled(button, true).unwrap();
        let events = record(&tree);

        prototype.set_label(Some("Store".into()));
        prototype.set_enabled(false);

        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].property(), PropertyName::Label);
        assert_eq!(events[0].old_value(), &PropertyValue::from("Save"));
        assert_eq!(events[0].new_value(), &PropertyValue::from("Store"));
        assert_eq!(events[1].property(), PropertyName::Enabled);
        assert_eq!(events[1].old_value(), &PropertyValue::Bool(true));
        assert_eq!(events[1].new_value(), &PropertyValue::Bool(false));
    }

    #[test]
    fn removing_component_unhooks_prototype() {
        let prototype = Arc::new(ActionPrototype::new("Save"));
        let mut tree = ComponentTree::new();
        let button = tree.insert(Component::from_prototype(Arc::clone(&prototype)));
        let events = record(&tree);
        tree.remove(button);
        prototype.set_enabled(false);
        assert!(events.lock().is_empty());
    }

    // ── Depiction ids ────────────────────────────────────────────────

    #[test]
    fn depict_id_round_trip() {
        let (tree, _, _, _, c, _) = build_tree();
        let text = tree.depict_id(c);
        assert!(text.starts_with("id"));
        assert_eq!(tree.find_by_depict_id(&text), Some(c));
    }

    #[test]
    fn depict_id_of_removed_component() {
        let (mut tree, _, _, b, ..) = build_tree();
        let text = tree.depict_id(b);
        tree.remove(b);
        assert_eq!(tree.find_by_depict_id(&text), None);
        assert_eq!(tree.find_by_depict_id("bogus"), None);
        assert_eq!(tree.find_by_depict_id("idzz"), None);
    }
}

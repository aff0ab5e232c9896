//! Session: one user's component tree on one platform.
//!
//! A [`Session`] owns the tree, the platform that depicts it, the input
//! bindings, the event queue and the focus chain. Platform events enter
//! through [`Session::handle_event`]; keystrokes bubble from their target to
//! the root, actions go to their target only, and input nobody consumed falls
//! through to the bindings.

pub mod focus;

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::component::{
    Component, ComponentId, ComponentModel, ComponentTree, Enableable, HasModel,
};
use crate::config::GuiseConfig;
use crate::error::{Error, Result};
use crate::event::{
    ActionEvent, BindingAction, BindingInputStrategy, Envelope, EventDispatcher, GuiseEvent,
    KeyboardEvent, Propagation,
};
use crate::input::{Input, MouseClickInput, PlatformInput};
use crate::platform::web::WebPlatformEvent;
use crate::platform::{ClientProduct, Environment, Platform, PlatformEvent};

pub use focus::FocusChain;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A component tree bound to a platform, with event delivery and focus.
pub struct Session {
    id: String,
    tree: ComponentTree,
    platform: Platform,
    bindings: BindingInputStrategy,
    dispatcher: EventDispatcher,
    focus: FocusChain,
    config: GuiseConfig,
    environment: Environment,
}

impl Session {
    /// Create a session for a client. Fails if the configured base URI does
    /// not parse.
    pub fn new(platform: Platform, config: GuiseConfig, client: ClientProduct) -> Result<Self> {
        let environment = config.environment(client)?;
        let id = format!("session-{}", NEXT_SESSION.fetch_add(1, Ordering::Relaxed));
        let tree = ComponentTree::new();
        let stale = platform.tracker().stale_set();
        tree.add_property_listener(move |event| {
            if let Some(component) = event.source().component() {
                stale.mark(component);
            }
        });
        tracing::debug!(
            target: "guise::session",
            session = %id,
            platform = platform.registry().platform(),
            application = config.application_name.as_deref().unwrap_or("-"),
            "session created"
        );
        Ok(Self {
            id,
            tree,
            platform,
            bindings: BindingInputStrategy::with_defaults(),
            dispatcher: EventDispatcher::new(),
            focus: FocusChain::new(),
            config,
            environment,
        })
    }

    /// A web session with the default configuration and an unknown client.
    pub fn web() -> Result<Self> {
        Self::new(Platform::web(), GuiseConfig::default(), ClientProduct::default())
    }

    /// A console session with the default configuration.
    pub fn console() -> Result<Self> {
        Self::new(Platform::console(), GuiseConfig::default(), ClientProduct::default())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Mutable access to the tree. Focus is recomputed on the next traversal.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    /// Insert `component` and make it the root.
    pub fn set_root(&mut self, component: Component) -> ComponentId {
        let root = self.tree.insert(component);
        self.tree.set_root(root);
        self.focus.rebuild(&self.tree);
        root
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut Platform {
        &mut self.platform
    }

    pub fn bindings(&self) -> &BindingInputStrategy {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut BindingInputStrategy {
        &mut self.bindings
    }

    pub fn config(&self) -> &GuiseConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Remove a component and its subtree, releasing their depictor bindings.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Component> {
        if !self.tree.contains(id) {
            return None;
        }
        let subtree = self.tree.walk_depth_first(id);
        let removed = self.tree.remove(id);
        for component in subtree {
            self.platform.tracker_mut().unbind(component);
        }
        self.focus.rebuild(&self.tree);
        removed
    }

    // ── Focus ────────────────────────────────────────────────────────

    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.current()
    }

    /// Returns `false` if the component cannot take focus.
    pub fn set_focus(&mut self, id: ComponentId) -> bool {
        self.focus.rebuild(&self.tree);
        self.focus.focus(id)
    }

    pub fn focus_next(&mut self) -> Option<ComponentId> {
        self.focus.rebuild(&self.tree);
        let focused = self.focus.focus_next();
        tracing::trace!(target: "guise::session", ?focused, "focus next");
        focused
    }

    pub fn focus_previous(&mut self) -> Option<ComponentId> {
        self.focus.rebuild(&self.tree);
        let focused = self.focus.focus_previous();
        tracing::trace!(target: "guise::session", ?focused, "focus previous");
        focused
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Apply a platform event and deliver everything it queued.
    pub fn handle_event(&mut self, event: PlatformEvent) -> Result<()> {
        let span = tracing::debug_span!(target: "guise::event", "handle_event", session = %self.id);
        let _guard = span.enter();
        match event {
            PlatformEvent::Input { target, input } => self.handle_input(target, input)?,
            PlatformEvent::Action {
                target,
                force,
                option,
            } => {
                self.tree.component(target)?;
                let action = ActionEvent::with_force_option(target, force, option)?;
                self.dispatcher
                    .push(Envelope::new(GuiseEvent::Action(action), target));
            }
            PlatformEvent::Change { target, value } => match self.tree.set_value(target, value) {
                Ok(_) => {}
                Err(Error::Validation(err)) => {
                    tracing::debug!(target: "guise::event", error = %err, "value rejected");
                    return Err(Error::Validation(err.with_session(self.id.clone())));
                }
                Err(err) => return Err(err),
            },
            PlatformEvent::Drop { source, target } => {
                let transferable = self.tree.export_transfer(source)?;
                self.tree.import_transfer(target, &transferable)?;
            }
        }
        self.process()
    }

    /// Decode a JSON event from a browser and handle it.
    pub fn handle_web_json(&mut self, json: &str) -> Result<()> {
        let event = WebPlatformEvent::from_json(json)?.resolve(&self.tree)?;
        self.handle_event(event)
    }

    /// Handle a terminal event. Events with no gesture equivalent are ignored.
    pub fn handle_terminal_event(&mut self, event: crossterm::event::Event) -> Result<()> {
        match crate::input::terminal::from_event(event) {
            Some(input) => self.handle_event(input.into()),
            None => Ok(()),
        }
    }

    /// Deliver every queued envelope, oldest first.
    pub fn process(&mut self) -> Result<()> {
        for mut envelope in self.dispatcher.drain() {
            match envelope.event.clone() {
                GuiseEvent::Action(action) => self.deliver_action(envelope.target, &action)?,
                GuiseEvent::Keyboard(event) => self.deliver_keyboard(&mut envelope, &event)?,
            }
        }
        Ok(())
    }

    pub fn pending_count(&self) -> usize {
        self.dispatcher.pending_count()
    }

    fn input_target(&self, target: Option<ComponentId>) -> Option<ComponentId> {
        target
            .or_else(|| self.focus.current())
            .or_else(|| self.tree.root())
    }

    fn handle_input(&mut self, target: Option<ComponentId>, input: PlatformInput) -> Result<()> {
        let Some(target) = self.input_target(target) else {
            tracing::debug!(target: "guise::event", "input with no target ignored");
            return Ok(());
        };
        self.tree.component(target)?;
        match input {
            PlatformInput::KeyPress(stroke) => self.dispatcher.push(Envelope::new(
                GuiseEvent::Keyboard(KeyboardEvent::press(target, stroke)),
                target,
            )),
            PlatformInput::KeyRelease(stroke) => self.dispatcher.push(Envelope::new(
                GuiseEvent::Keyboard(KeyboardEvent::release(target, stroke)),
                target,
            )),
            PlatformInput::Click(click) => self.handle_click(target, click)?,
        }
        Ok(())
    }

    /// Clicks on actionable components become actions; other clicks go to
    /// the bindings.
    fn handle_click(&mut self, target: ComponentId, click: MouseClickInput) -> Result<()> {
        if self.tree.get(target).is_some_and(is_actionable) {
            let action = ActionEvent::from_click(target, &click);
            self.dispatcher
                .push(Envelope::new(GuiseEvent::Action(action), target));
            return Ok(());
        }
        self.apply_binding(target, &Input::from(click))
    }

    fn deliver_keyboard(&mut self, envelope: &mut Envelope, event: &KeyboardEvent) -> Result<()> {
        for id in EventDispatcher::bubble_path(&self.tree, envelope.target) {
            let Some(component) = self.tree.get(id) else {
                continue;
            };
            if component.key_listeners().fire(&event.with_source(id)) == Propagation::Stop {
                envelope.mark_handled();
                break;
            }
        }
        if envelope.handled {
            tracing::trace!(target: "guise::event", key = ?event.key(), "keystroke consumed");
            return Ok(());
        }
        match event.input() {
            Some(stroke) => self.apply_binding(envelope.target, &Input::from(stroke.clone())),
            None => Ok(()),
        }
    }

    fn apply_binding(&mut self, target: ComponentId, input: &Input) -> Result<()> {
        let Some(action) = self.bindings.resolve(input).cloned() else {
            return Ok(());
        };
        match action {
            BindingAction::FocusNext => {
                self.focus_next();
            }
            BindingAction::FocusPrevious => {
                self.focus_previous();
            }
            BindingAction::Prototype(prototype) => {
                prototype.perform_action(&ActionEvent::new(target));
            }
        }
        Ok(())
    }

    fn deliver_action(&mut self, target: ComponentId, action: &ActionEvent) -> Result<()> {
        let Some(component) = self.tree.get(target) else {
            tracing::debug!(target: "guise::event", "action for removed component dropped");
            return Ok(());
        };
        if !component.is_enabled() {
            tracing::debug!(target: "guise::event", component = %self.tree.depict_id(target), "action on disabled component ignored");
            return Ok(());
        }
        tracing::debug!(
            target: "guise::event",
            component = %self.tree.depict_id(target),
            command = ?action.command(),
            "action"
        );
        if let Some(prototype) = component.prototype() {
            prototype.perform_action(action);
        }
        let menu_open = match component.model() {
            ComponentModel::Menu(menu) => Some(menu.is_open()),
            model => {
                if let Some(model) = model.action() {
                    model.fire_action(action);
                }
                None
            }
        };
        if let Some(open) = menu_open {
            self.tree.set_menu_open(target, !open)?;
        }
        Ok(())
    }

    // ── Depiction ────────────────────────────────────────────────────

    /// Depict the whole tree into `writer` in the platform's format.
    pub fn depict(&mut self, writer: &mut dyn Write) -> Result<()> {
        let root = self
            .tree
            .root()
            .ok_or_else(|| Error::invalid_state("session has no root component"))?;
        let mut context = self.platform.kind().context(writer, self.config.pretty_print);
        self.platform
            .depict(&self.tree, root, context.as_mut(), &self.environment)
    }

    pub fn depict_to_string(&mut self) -> Result<String> {
        let mut buffer = Vec::new();
        self.depict(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|err| Error::invalid_state(format!("depicted output is not utf-8: {err}")))
    }

    /// Whether the tree has changed since it was last depicted.
    pub fn needs_depiction(&self) -> bool {
        let tracker = self.platform.tracker();
        match self.tree.root() {
            Some(root) => tracker.needs_depiction(root) || tracker.has_stale(),
            None => false,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("components", &self.tree.len())
            .field("platform", &self.platform.kind())
            .field("focused", &self.focus.current())
            .finish()
    }
}

/// Whether a click on the component performs its action.
fn is_actionable(component: &Component) -> bool {
    component.prototype().is_some()
        || matches!(
            component.model(),
            ComponentModel::Button(_) | ComponentModel::Link(_) | ComponentModel::Menu(_)
        )
}

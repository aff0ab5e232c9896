//! Depict contexts: the output sink a render pass writes into.
//!
//! A context exposes element-structured output. Attributes belong to the most
//! recently opened element and may only be written before its content; element
//! ends must match the open element. [`DepictContext::close_to`] lets the
//! render pass close whatever a failing depictor left open.

use crate::error::{Error, Result};

/// Element-structured output written by depictors.
pub trait DepictContext {
    /// Open an element. An element with `empty_allowed` may be written in
    /// short form if nothing is written inside it.
    fn write_element_begin_with(&mut self, name: &str, empty_allowed: bool) -> Result<()>;

    /// Open an element that is always written with an end tag.
    fn write_element_begin(&mut self, name: &str) -> Result<()> {
        self.write_element_begin_with(name, false)
    }

    /// Add an attribute to the element just opened.
    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()>;

    fn write_text(&mut self, text: &str) -> Result<()>;

    fn write_comment(&mut self, text: &str) -> Result<()>;

    /// Close the open element, which must be `name`.
    fn write_element_end(&mut self, name: &str) -> Result<()>;

    /// Number of open elements.
    fn depth(&self) -> usize;

    /// Name of the innermost open element.
    fn open_element(&self) -> Option<&str>;

    /// Close open elements until only `depth` remain.
    fn close_to(&mut self, depth: usize) -> Result<()> {
        while self.depth() > depth {
            let Some(name) = self.open_element().map(str::to_owned) else {
                break;
            };
            self.write_element_end(&name)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ElementStack
// ---------------------------------------------------------------------------

/// An element opened but not yet closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenElement {
    pub name: String,
    pub empty_allowed: bool,
    /// Whether text, comments or child elements were written inside.
    pub has_content: bool,
    /// Whether child elements were written inside.
    pub has_children: bool,
}

/// Stack of open elements shared by context implementations.
#[derive(Debug, Clone, Default)]
pub struct ElementStack {
    open: Vec<OpenElement>,
}

impl ElementStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, empty_allowed: bool) {
        if let Some(parent) = self.open.last_mut() {
            parent.has_content = true;
            parent.has_children = true;
        }
        self.open.push(OpenElement {
            name: name.to_owned(),
            empty_allowed,
            has_content: false,
            has_children: false,
        });
    }

    /// Pop the innermost element, which must be `name`.
    pub fn pop(&mut self, name: &str) -> Result<OpenElement> {
        match self.open.last() {
            None => Err(Error::invalid_state(format!(
                "end of {name} written with no open element"
            ))),
            Some(top) if top.name != name => Err(Error::invalid_state(format!(
                "end of {name} written while {} is open",
                top.name
            ))),
            Some(_) => self
                .open
                .pop()
                .ok_or_else(|| Error::invalid_state("element stack emptied")),
        }
    }

    /// Record that content was written inside the innermost element.
    pub fn mark_content(&mut self) {
        if let Some(top) = self.open.last_mut() {
            top.has_content = true;
        }
    }

    pub fn top(&self) -> Option<&OpenElement> {
        self.open.last()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

//! XHTML depict context writing markup to any [`std::io::Write`].

use std::borrow::Cow;
use std::io::Write;

use crate::error::{Error, Result};
use crate::platform::context::{DepictContext, ElementStack};

/// Writes well-formed XHTML.
///
/// Start tags stay open until content is written so attributes can be added.
/// Elements opened with `empty_allowed` and left empty are written as
/// `<name />`.
#[derive(Debug)]
pub struct XhtmlDepictContext<W: Write> {
    writer: W,
    stack: ElementStack,
    start_tag_open: bool,
    pretty_print: bool,
    written: bool,
}

impl<W: Write> XhtmlDepictContext<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            stack: ElementStack::new(),
            start_tag_open: false,
            pretty_print: false,
            written: false,
        }
    }

    /// Put each element on its own line, indented by depth.
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn close_start_tag(&mut self) -> Result<()> {
        if self.start_tag_open {
            self.start_tag_open = false;
            self.writer.write_all(b">")?;
        }
        Ok(())
    }

    fn newline(&mut self, depth: usize) -> Result<()> {
        if self.pretty_print && self.written {
            self.writer.write_all(b"\n")?;
            for _ in 0..depth {
                self.writer.write_all(b"  ")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> DepictContext for XhtmlDepictContext<W> {
    fn write_element_begin_with(&mut self, name: &str, empty_allowed: bool) -> Result<()> {
        self.close_start_tag()?;
        self.newline(self.stack.depth())?;
        write!(self.writer, "<{name}")?;
        self.stack.push(name, empty_allowed);
        self.start_tag_open = true;
        self.written = true;
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.start_tag_open {
            return Err(Error::invalid_state(format!(
                "attribute {name} written outside a start tag"
            )));
        }
        write!(self.writer, " {name}=\"{}\"", escape(value, true))?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.stack.depth() == 0 {
            return Err(Error::invalid_state("text written with no open element"));
        }
        self.close_start_tag()?;
        self.stack.mark_content();
        self.writer.write_all(escape(text, false).as_bytes())?;
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        self.close_start_tag()?;
        self.stack.mark_content();
        write!(self.writer, "<!--{}-->", text.replace("--", "- -"))?;
        self.written = true;
        Ok(())
    }

    fn write_element_end(&mut self, name: &str) -> Result<()> {
        let element = self.stack.pop(name)?;
        if self.start_tag_open {
            self.start_tag_open = false;
            if element.empty_allowed && !element.has_content {
                self.writer.write_all(b" />")?;
                return Ok(());
            }
            self.writer.write_all(b">")?;
        } else if element.has_children {
            self.newline(self.stack.depth())?;
        }
        write!(self.writer, "</{name}>")?;
        Ok(())
    }

    fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn open_element(&self) -> Option<&str> {
        self.stack.top().map(|element| element.name.as_str())
    }
}

fn escape(text: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |ch: char| matches!(ch, '&' | '<' | '>') || (attribute && ch == '"');
    if !text.contains(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

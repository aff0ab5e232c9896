//! Console platform: an indented plain-text outline of the component tree.
//!
//! Each component is one line, `kind attr="value": label`, indented two
//! spaces per level. Inline frames have no console depictor.

use std::io::Write;
use std::sync::Arc;

use crate::component::{ComponentId, ComponentKind, ComponentModel, Enableable, HasModel, Labelable};
use crate::error::{Error, Result};
use crate::platform::context::{DepictContext, ElementStack};
use crate::platform::depictor::{DepictPass, Depictor};
use crate::platform::registry::DepictorRegistry;

// ---------------------------------------------------------------------------
// TextDepictContext
// ---------------------------------------------------------------------------

/// Writes elements as indented lines of text.
#[derive(Debug)]
pub struct TextDepictContext<W: Write> {
    writer: W,
    stack: ElementStack,
    line_open: bool,
    written: bool,
}

impl<W: Write> TextDepictContext<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            stack: ElementStack::new(),
            line_open: false,
            written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn start_line(&mut self, depth: usize) -> Result<()> {
        if self.written {
            self.writer.write_all(b"\n")?;
        }
        write!(self.writer, "{:width$}", "", width = depth * 2)?;
        self.written = true;
        Ok(())
    }
}

impl<W: Write> DepictContext for TextDepictContext<W> {
    fn write_element_begin_with(&mut self, name: &str, _empty_allowed: bool) -> Result<()> {
        self.start_line(self.stack.depth())?;
        self.writer.write_all(name.as_bytes())?;
        self.stack.push(name, false);
        self.line_open = true;
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.line_open {
            return Err(Error::invalid_state(format!(
                "attribute {name} written outside a start tag"
            )));
        }
        write!(self.writer, " {name}={value:?}")?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let Some(has_children) = self.stack.top().map(|top| top.has_children) else {
            return Err(Error::invalid_state("text written with no open element"));
        };
        if self.line_open {
            self.writer.write_all(b": ")?;
            self.line_open = false;
        } else if has_children {
            self.start_line(self.stack.depth())?;
        }
        self.stack.mark_content();
        self.writer.write_all(text.replace('\n', " ").as_bytes())?;
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        self.line_open = false;
        self.start_line(self.stack.depth())?;
        write!(self.writer, "# {text}")?;
        Ok(())
    }

    fn write_element_end(&mut self, name: &str) -> Result<()> {
        self.stack.pop(name)?;
        self.line_open = false;
        Ok(())
    }

    fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn open_element(&self) -> Option<&str> {
        self.stack.top().map(|element| element.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Depictors
// ---------------------------------------------------------------------------

/// Shared line for every component: kind, name, flags, then the label.
fn begin_line(pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
    let component = pass.component(id)?;
    pass.begin(component.kind().name())?;
    if let Some(name) = component.name() {
        pass.attribute("name", name)?;
    }
    if !component.is_enabled() {
        pass.attribute("enabled", "false")?;
    }
    Ok(())
}

/// Panels, frames, menus and simple controls.
#[derive(Debug, Default)]
pub struct OutlineDepictor;

impl Depictor for OutlineDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        begin_line(pass, id)?;
        let component = pass.component(id)?;
        if let ComponentModel::Menu(menu) = component.model() {
            if menu.is_open() {
                pass.attribute("open", "true")?;
            }
        }
        if let Some(label) = component.label() {
            pass.text(&label)?;
        }
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let closed_menu = matches!(
            pass.component(id)?.model(),
            ComponentModel::Menu(menu) if !menu.is_open()
        );
        if closed_menu {
            return Ok(());
        }
        pass.depict_children(id)
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let kind = pass.component(id)?.kind();
        pass.end(kind.name())
    }
}

/// Text controls and pictures: the value or source as an attribute.
#[derive(Debug, Default)]
pub struct ValueDepictor;

impl Depictor for ValueDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        begin_line(pass, id)?;
        let component = pass.component(id)?;
        match component.model() {
            ComponentModel::TextControl(_) => {
                pass.attribute("value", component.value().unwrap_or(""))?;
            }
            ComponentModel::Picture(image) => {
                if let Some(source) = image.source() {
                    let src = pass.environment().resolve(source)?;
                    pass.attribute("src", &src)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn depict_body(&self, _pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        Ok(())
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let kind = pass.component(id)?.kind();
        pass.end(kind.name())
    }
}

/// Tables: a `columns` line, then one `row` line per model row.
#[derive(Debug, Default)]
pub struct TableOutlineDepictor;

impl Depictor for TableOutlineDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        begin_line(pass, id)?;
        if let Some(label) = pass.component(id)?.label() {
            pass.text(&label)?;
        }
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let ComponentModel::Table(source) = pass.component(id)?.model() else {
            return Ok(());
        };
        pass.begin("columns")?;
        pass.text(&source.column_labels().join(" | "))?;
        pass.end("columns")?;
        for row in source.rows_text() {
            pass.begin("row")?;
            pass.text(&row.join(" | "))?;
            pass.end("row")?;
        }
        Ok(())
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end(ComponentKind::Table.name())
    }
}

/// Depictors for every kind a console can show.
pub fn registry() -> DepictorRegistry {
    let outline: Arc<dyn Depictor> = Arc::new(OutlineDepictor);
    let value: Arc<dyn Depictor> = Arc::new(ValueDepictor);
    let mut registry = DepictorRegistry::new("console");
    for kind in [
        ComponentKind::Panel,
        ComponentKind::Frame,
        ComponentKind::Label,
        ComponentKind::Button,
        ComponentKind::Link,
        ComponentKind::Menu,
    ] {
        registry.register_kind(kind, Arc::clone(&outline));
    }
    registry
        .register_kind(ComponentKind::Table, Arc::new(TableOutlineDepictor))
        .register_kind(ComponentKind::TextControl, Arc::clone(&value))
        .register_kind(ComponentKind::Picture, value);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentTree};
    use crate::model::{TableColumn, TableModel, ValueModel};
    use crate::platform::environment::Environment;
    use crate::platform::Platform;
    use pretty_assertions::assert_eq;

    fn env() -> Environment {
        Environment::parse("http://localhost/").unwrap()
    }

    // ── Context ──────────────────────────────────────────────────────

    #[test]
    fn lines_and_indentation() {
        let mut ctx = TextDepictContext::new(Vec::new());
        ctx.write_element_begin("panel").unwrap();
        ctx.write_attribute("name", "main").unwrap();
        ctx.write_element_begin("label").unwrap();
        ctx.write_text("Hi").unwrap();
        ctx.close_to(0).unwrap();
        assert_eq!(
            String::from_utf8(ctx.into_inner()).unwrap(),
            "panel name=\"main\"\n  label: Hi"
        );
    }

    #[test]
    fn attribute_after_text_is_rejected() {
        let mut ctx = TextDepictContext::new(Vec::new());
        ctx.write_element_begin("label").unwrap();
        ctx.write_text("Hi").unwrap();
        assert!(ctx.write_attribute("name", "x").is_err());
    }

    // ── Depiction ────────────────────────────────────────────────────

    #[test]
    fn outline_of_a_form() {
        let mut tree = ComponentTree::new();
        let frame = tree.insert(Component::frame("Login"));
        tree.add_child(frame, Component::label("Name")).unwrap();
        tree.add_child(
            frame,
            Component::text_control(ValueModel::new().with_default("ann".to_string()))
                .with_name("user"),
        )
        .unwrap();
        tree.add_child(frame, Component::button("Sign in").enabled(false))
            .unwrap();

        let text = Platform::console()
            .depict_to_string(&tree, frame, &env(), false)
            .unwrap();
        assert_eq!(
            text,
            concat!(
                "frame: Login\n",
                "  label: Name\n",
                "  text-control name=\"user\" value=\"ann\"\n",
                "  button enabled=\"false\": Sign in",
            )
        );
    }

    #[test]
    fn table_outline() {
        let model: TableModel<u32> =
            TableModel::new(vec![TableColumn::new("A"), TableColumn::new("B")]);
        model.add_row(vec![Some(1), None]).unwrap();
        let mut tree = ComponentTree::new();
        let table = tree.insert(Component::table(Arc::new(model)));

        let text = Platform::console()
            .depict_to_string(&tree, table, &env(), false)
            .unwrap();
        assert_eq!(text, "table\n  columns: A | B\n  row: 1 | ");
    }

    #[test]
    fn inline_frames_have_no_console_depictor() {
        let mut tree = ComponentTree::new();
        let panel = tree.insert(Component::panel());
        tree.add_child(panel, Component::inline_frame("inner.html"))
            .unwrap();

        let err = Platform::console()
            .depict_to_string(&tree, panel, &env(), false)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NoDepictor {
                kind: "inline-frame",
                ..
            }
        ));
    }
}

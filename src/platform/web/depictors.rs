//! XHTML depictors, one per component kind.
//!
//! Every depictor opens its outer element through [`begin_component`], which
//! writes the shared `id` and `class` attributes. Leaf depictors write their
//! content in the body phase; containers depict their children there.

use crate::component::{Component, ComponentId, ComponentModel, Enableable, HasModel, Labelable};
use crate::error::Result;
use crate::platform::depictor::{DepictPass, Depictor};
use crate::platform::environment::Brand;

/// Open a component's outer element with its common attributes.
///
/// The class list is the kind name, `extra`, the component's own classes,
/// and `disabled` when the component is disabled.
pub fn begin_component<'a>(
    pass: &mut DepictPass<'a>,
    id: ComponentId,
    element: &str,
    empty_allowed: bool,
    extra: &[&str],
) -> Result<&'a Component> {
    let component = pass.component(id)?;
    let environment = pass.environment();
    pass.context()
        .write_element_begin_with(element, empty_allowed)?;
    if environment.depict_ids() {
        let depict_id = pass.tree().depict_id(id);
        pass.attribute("id", &depict_id)?;
    }

    let mut classes = vec![component.kind().name()];
    classes.extend_from_slice(extra);
    classes.extend(component.classes().iter().map(String::as_str));
    if !component.is_enabled() {
        classes.push("disabled");
    }
    pass.attribute("class", &classes.join(" "))?;

    if environment.is_debug() {
        if let Some(name) = component.name() {
            pass.attribute("data-guise-name", name)?;
        }
    }
    Ok(component)
}

/// Write the icon (as an image) followed by the label text.
fn write_label(pass: &mut DepictPass<'_>, component: &Component) -> Result<()> {
    if let Some(icon) = component.icon() {
        let src = pass.environment().resolve(&icon)?;
        pass.begin_empty("img")?;
        pass.attribute("src", &src)?;
        pass.attribute("alt", component.label().as_deref().unwrap_or(""))?;
        pass.end("img")?;
    }
    if let Some(label) = component.label() {
        pass.text(&label)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// A panel: a `div` classed with its orientation.
#[derive(Debug, Default)]
pub struct PanelDepictor;

impl Depictor for PanelDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let orientation = match pass.component(id)?.model() {
            ComponentModel::Panel(layout) => layout.orientation.as_str(),
            _ => "",
        };
        begin_component(pass, id, "div", false, &[orientation])?;
        Ok(())
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("div")
    }
}

/// A frame: a `div` with a title bar above its children.
#[derive(Debug, Default)]
pub struct FrameDepictor;

impl Depictor for FrameDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let modal = matches!(
            pass.component(id)?.model(),
            ComponentModel::Frame(frame) if frame.modal
        );
        let extra: &[&str] = if modal { &["modal"] } else { &[] };
        begin_component(pass, id, "div", false, extra)?;
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = pass.component(id)?;
        if component.label().is_some() || component.icon().is_some() {
            pass.begin("div")?;
            pass.attribute("class", "frame-title")?;
            write_label(pass, component)?;
            pass.end("div")?;
        }
        pass.depict_children(id)
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("div")
    }
}

/// A menu: its label, then each child in a list item. The list is only
/// written while the menu is open.
#[derive(Debug, Default)]
pub struct MenuDepictor;

impl MenuDepictor {
    fn is_open(component: &Component) -> bool {
        matches!(component.model(), ComponentModel::Menu(menu) if menu.is_open())
    }
}

impl Depictor for MenuDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let open = Self::is_open(pass.component(id)?);
        let extra: &[&str] = if open { &["open"] } else { &[] };
        begin_component(pass, id, "div", false, extra)?;
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = pass.component(id)?;
        pass.begin("span")?;
        pass.attribute("class", "menu-label")?;
        write_label(pass, component)?;
        pass.end("span")?;

        let children = pass.tree().children(id);
        if !Self::is_open(component) || children.is_empty() {
            return Ok(());
        }
        pass.begin("ul")?;
        for &child in children {
            pass.begin("li")?;
            pass.depict(child)?;
            pass.end("li")?;
        }
        pass.end("ul")
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("div")
    }
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// A label: a `span` holding icon and text.
#[derive(Debug, Default)]
pub struct LabelDepictor;

impl Depictor for LabelDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        begin_component(pass, id, "span", false, &[])?;
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = pass.component(id)?;
        write_label(pass, component)
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("span")
    }
}

#[derive(Debug, Default)]
pub struct ButtonDepictor;

impl Depictor for ButtonDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = begin_component(pass, id, "button", false, &[])?;
        pass.attribute("type", "button")?;
        if let Some(name) = component.name() {
            pass.attribute("name", name)?;
        }
        if !component.is_enabled() {
            pass.attribute("disabled", "disabled")?;
        }
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = pass.component(id)?;
        write_label(pass, component)
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("button")
    }
}

/// A link. Disabled links are written without an `href`.
#[derive(Debug, Default)]
pub struct LinkDepictor;

impl Depictor for LinkDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = begin_component(pass, id, "a", false, &[])?;
        if component.is_enabled() {
            pass.attribute("href", "#")?;
        }
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = pass.component(id)?;
        write_label(pass, component)
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("a")
    }
}

/// A link with an icon and no label: the image carries the link's name as
/// its alternate text.
#[derive(Debug, Default)]
pub struct ImageLinkDepictor;

impl ImageLinkDepictor {
    /// Components this depictor is registered for ahead of [`LinkDepictor`].
    pub fn matches(component: &Component) -> bool {
        matches!(component.model(), ComponentModel::Link(_))
            && component.icon().is_some()
            && component.label().is_none()
    }
}

impl Depictor for ImageLinkDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = begin_component(pass, id, "a", false, &["image"])?;
        if component.is_enabled() {
            pass.attribute("href", "#")?;
        }
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = pass.component(id)?;
        let Some(icon) = component.icon() else {
            return Ok(());
        };
        let src = pass.environment().resolve(&icon)?;
        pass.begin_empty("img")?;
        pass.attribute("src", &src)?;
        pass.attribute("alt", component.name().unwrap_or(""))?;
        pass.end("img")
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("a")
    }
}

/// A text control: an `input` carrying the current value. Invalid values add
/// the `invalid` class.
#[derive(Debug, Default)]
pub struct TextControlDepictor;

impl Depictor for TextControlDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let valid = match pass.component(id)?.model() {
            ComponentModel::TextControl(model) => model.is_valid(),
            _ => true,
        };
        let extra: &[&str] = if valid { &[] } else { &["invalid"] };
        let component = begin_component(pass, id, "input", true, extra)?;
        pass.attribute("type", "text")?;
        if let Some(name) = component.name() {
            pass.attribute("name", name)?;
        }
        pass.attribute("value", component.value().unwrap_or(""))?;
        if !component.is_enabled() {
            pass.attribute("disabled", "disabled")?;
        }
        Ok(())
    }

    fn depict_body(&self, _pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        Ok(())
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("input")
    }
}

/// A table: caption from the label, a header row of column labels and one
/// row per model row, read from a single snapshot.
#[derive(Debug, Default)]
pub struct TableDepictor;

impl Depictor for TableDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        begin_component(pass, id, "table", false, &[])?;
        Ok(())
    }

    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = pass.component(id)?;
        let ComponentModel::Table(source) = component.model() else {
            return Ok(());
        };
        if let Some(caption) = component.label() {
            pass.begin("caption")?;
            pass.text(&caption)?;
            pass.end("caption")?;
        }

        pass.begin("thead")?;
        pass.begin("tr")?;
        for label in source.column_labels() {
            pass.begin("th")?;
            pass.text(&label)?;
            pass.end("th")?;
        }
        pass.end("tr")?;
        pass.end("thead")?;

        pass.begin("tbody")?;
        for row in source.rows_text() {
            pass.begin("tr")?;
            for cell in row {
                pass.begin("td")?;
                pass.text(&cell)?;
                pass.end("td")?;
            }
            pass.end("tr")?;
        }
        pass.end("tbody")
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("table")
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PictureDepictor;

impl Depictor for PictureDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = begin_component(pass, id, "img", true, &[])?;
        if let ComponentModel::Picture(image) = component.model() {
            if let Some(source) = image.source() {
                let src = pass.environment().resolve(source)?;
                pass.attribute("src", &src)?;
            }
        }
        pass.attribute("alt", component.label().as_deref().unwrap_or(""))
    }

    fn depict_body(&self, _pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        Ok(())
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("img")
    }
}

/// An inline frame. Internet Explorer needs `allowtransparency` to show the
/// parent's background through the frame.
#[derive(Debug, Default)]
pub struct InlineFrameDepictor;

impl Depictor for InlineFrameDepictor {
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        let component = begin_component(pass, id, "iframe", false, &[])?;
        if let ComponentModel::InlineFrame(frame) = component.model() {
            if let Some(source) = frame.source() {
                let src = pass.environment().resolve(source)?;
                pass.attribute("src", &src)?;
            }
        }
        pass.attribute("frameborder", "0")?;
        if pass.environment().client().is_brand(Brand::InternetExplorer) {
            pass.attribute("allowtransparency", "true")?;
        }
        Ok(())
    }

    fn depict_body(&self, _pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        Ok(())
    }

    fn depict_end(&self, pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        pass.end("iframe")
    }
}

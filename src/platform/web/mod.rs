//! Web platform: XHTML output and browser events.

pub mod context;
pub mod depictors;
pub mod event;

use std::sync::Arc;

use crate::component::ComponentKind;
use crate::platform::registry::DepictorRegistry;

pub use context::XhtmlDepictContext;
pub use depictors::{
    begin_component, ButtonDepictor, FrameDepictor, ImageLinkDepictor, InlineFrameDepictor,
    LabelDepictor, LinkDepictor, MenuDepictor, PanelDepictor, PictureDepictor, TableDepictor,
    TextControlDepictor,
};
pub use event::{WebClick, WebEventError, WebKey, WebPlatformEvent};

/// Depictors for every component kind.
pub fn registry() -> DepictorRegistry {
    let mut registry = DepictorRegistry::new("web");
    registry
        .register_predicate(ImageLinkDepictor::matches, Arc::new(ImageLinkDepictor))
        .register_kind(ComponentKind::Panel, Arc::new(PanelDepictor))
        .register_kind(ComponentKind::Frame, Arc::new(FrameDepictor))
        .register_kind(ComponentKind::Label, Arc::new(LabelDepictor))
        .register_kind(ComponentKind::Button, Arc::new(ButtonDepictor))
        .register_kind(ComponentKind::Link, Arc::new(LinkDepictor))
        .register_kind(ComponentKind::Menu, Arc::new(MenuDepictor))
        .register_kind(ComponentKind::Table, Arc::new(TableDepictor))
        .register_kind(ComponentKind::TextControl, Arc::new(TextControlDepictor))
        .register_kind(ComponentKind::Picture, Arc::new(PictureDepictor))
        .register_kind(ComponentKind::InlineFrame, Arc::new(InlineFrameDepictor));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentId, ComponentTree};
    use crate::error::Result;
    use crate::model::{TableColumn, TableModel, ValueModel};
    use crate::platform::environment::{Brand, ClientProduct, Environment};
    use crate::platform::Platform;
    use pretty_assertions::assert_eq;

    fn depict(tree: &ComponentTree, id: ComponentId, env: &Environment) -> Result<String> {
        Platform::web().depict_to_string(tree, id, env, false)
    }

    fn env() -> Environment {
        Environment::parse("http://example.com/app/")
            .unwrap()
            .with_depict_ids(false)
    }

    // ── Registry ─────────────────────────────────────────────────────

    #[test]
    fn covers_every_kind() {
        assert_eq!(registry().len(), 11);
        assert_eq!(registry().platform(), "web");
    }

    // ── Markup ───────────────────────────────────────────────────────

    #[test]
    fn frame_with_controls() {
        let mut tree = ComponentTree::new();
        let frame = tree.insert(Component::frame("Login"));
        tree.add_child(frame, Component::label("Name")).unwrap();
        tree.add_child(
            frame,
            Component::text_control(ValueModel::new().with_default("ann".to_string()))
                .with_name("user"),
        )
        .unwrap();
        tree.add_child(frame, Component::button("Sign in").with_class("primary"))
            .unwrap();

        assert_eq!(
            depict(&tree, frame, &env()).unwrap(),
            concat!(
                r#"<div class="frame"><div class="frame-title">Login</div>"#,
                r#"<span class="label">Name</span>"#,
                r#"<input class="text-control" type="text" name="user" value="ann" />"#,
                r#"<button class="button primary" type="button">Sign in</button></div>"#,
            )
        );
    }

    #[test]
    fn disabled_button() {
        let mut tree = ComponentTree::new();
        let button = tree.insert(Component::button("Go").enabled(false));
        assert_eq!(
            depict(&tree, button, &env()).unwrap(),
            r#"<button class="button disabled" type="button" disabled="disabled">Go</button>"#
        );
    }

    #[test]
    fn ids_written_when_enabled() {
        let mut tree = ComponentTree::new();
        let label = tree.insert(Component::label("x"));
        let env = env().with_depict_ids(true);
        let markup = depict(&tree, label, &env).unwrap();
        assert_eq!(
            markup,
            format!(r#"<span id="{}" class="label">x</span>"#, tree.depict_id(label))
        );
    }

    #[test]
    fn image_link_and_resolved_sources() {
        let mut tree = ComponentTree::new();
        let panel = tree.insert(Component::panel_with(crate::model::Orientation::Horizontal));
        let link = Component::link("x").with_icon("home.png").with_name("Home");
        link.set_own_label(None);
        tree.add_child(panel, link).unwrap();
        tree.add_child(panel, Component::picture("/img/logo.png").with_label("Logo"))
            .unwrap();

        assert_eq!(
            depict(&tree, panel, &env()).unwrap(),
            concat!(
                r#"<div class="panel horizontal">"#,
                r##"<a class="link image" href="#">"##,
                r#"<img src="http://example.com/app/home.png" alt="Home" /></a>"#,
                r#"<img class="picture" src="http://example.com/img/logo.png" alt="Logo" />"#,
                "</div>",
            )
        );
    }

    #[test]
    fn menu_lists_children_only_when_open() {
        let mut tree = ComponentTree::new();
        let menu = tree.insert(Component::menu("File"));
        tree.add_child(menu, Component::link("Open")).unwrap();

        assert_eq!(
            depict(&tree, menu, &env()).unwrap(),
            r#"<div class="menu"><span class="menu-label">File</span></div>"#
        );

        tree.set_menu_open(menu, true).unwrap();
        assert_eq!(
            depict(&tree, menu, &env()).unwrap(),
            concat!(
                r#"<div class="menu open"><span class="menu-label">File</span>"#,
                r##"<ul><li><a class="link" href="#">Open</a></li></ul></div>"##,
            )
        );
    }

    #[test]
    fn table_rows() {
        let name = TableColumn::new("Name");
        let qty = TableColumn::new("Qty");
        let model: TableModel<String> = TableModel::new(vec![name, qty]);
        model
            .add_row(vec![Some("Nuts".into()), Some("3".into())])
            .unwrap();
        let mut tree = ComponentTree::new();
        let table = tree.insert(Component::table(std::sync::Arc::new(model)).with_label("Stock"));

        assert_eq!(
            depict(&tree, table, &env()).unwrap(),
            concat!(
                r#"<table class="table"><caption>Stock</caption>"#,
                "<thead><tr><th>Name</th><th>Qty</th></tr></thead>",
                "<tbody><tr><td>Nuts</td><td>3</td></tr></tbody></table>",
            )
        );
    }

    #[test]
    fn inline_frame_transparency_for_internet_explorer() {
        let mut tree = ComponentTree::new();
        let frame = tree.insert(Component::inline_frame("inner.html"));
        let plain = depict(&tree, frame, &env()).unwrap();
        assert_eq!(
            plain,
            r#"<iframe class="inline-frame" src="http://example.com/app/inner.html" frameborder="0"></iframe>"#
        );

        let ie = env().with_client(ClientProduct::new(Brand::InternetExplorer, Some(8.0)));
        let markup = depict(&tree, frame, &ie).unwrap();
        assert!(markup.contains(r#"allowtransparency="true""#));
    }
}

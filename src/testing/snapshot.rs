//! Snapshot depiction helpers.
//!
//! Functions for depicting a component tree with a fresh platform into plain
//! strings suitable for snapshot assertions. Web output is pretty printed and
//! written against `http://localhost/`.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::component::{ComponentId, ComponentTree};
use crate::error::Result;
use crate::platform::{Environment, Platform};

const SNAPSHOT_BASE: &str = "http://localhost/";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Depict the subtree at `id` as pretty-printed XHTML without component ids.
pub fn depict_to_string(tree: &ComponentTree, id: ComponentId) -> Result<String> {
    let environment = Environment::parse(SNAPSHOT_BASE)?.with_depict_ids(false);
    Platform::web().depict_to_string(tree, id, &environment, true)
}

/// Depict the subtree at `id` as pretty-printed XHTML with component ids
/// replaced by `c0`, `c1`, ... in order of appearance.
pub fn depict_with_stable_ids(tree: &ComponentTree, id: ComponentId) -> Result<String> {
    let environment = Environment::parse(SNAPSHOT_BASE)?;
    let markup = Platform::web().depict_to_string(tree, id, &environment, true)?;
    Ok(stable_ids(&markup))
}

/// Depict the subtree at `id` as a console outline.
pub fn outline_to_string(tree: &ComponentTree, id: ComponentId) -> Result<String> {
    let environment = Environment::parse(SNAPSHOT_BASE)?;
    Platform::console().depict_to_string(tree, id, &environment, false)
}

/// Replace every `id="id<hex>"` attribute value with a sequential name.
pub fn stable_ids(markup: &str) -> String {
    let Ok(pattern) = Regex::new(r#" id="(id[0-9a-f]+)""#) else {
        return markup.to_owned();
    };
    let mut names: HashMap<String, String> = HashMap::new();
    pattern
        .replace_all(markup, |caps: &Captures<'_>| {
            let next = names.len();
            let name = names
                .entry(caps[1].to_owned())
                .or_insert_with(|| format!("c{next}"));
            format!(" id=\"{name}\"")
        })
        .into_owned()
}

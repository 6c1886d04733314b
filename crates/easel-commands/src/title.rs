//! Titled paragraphs.
//!
//! A `title` behaves exactly like a paragraph except for its type and
//! a `data-title` marker in exported markup. Imported markup maps
//! `<p data-title>` back to `title`; the rule outprioritizes the stock
//! paragraph rule so the attribute wins.

use easel_doc::{
    Extension, HostRegistry, NodeSpec, ParseRule, RenderRule, SchemaError, Transaction,
};
use tracing::debug;

/// Import priority of the `p[data-title]` rule. Must exceed the stock
/// paragraph rule's [`easel_doc::DEFAULT_PARSE_PRIORITY`].
pub const TITLE_PARSE_PRIORITY: u16 = 1000;

/// Registers the `title` node type and its commands.
pub struct Title;

impl Extension for Title {
    fn name(&self) -> &'static str {
        "title"
    }

    fn register(&self, host: &mut dyn HostRegistry) -> Result<(), SchemaError> {
        host.register_node(
            NodeSpec::textblock("title")
                .parse_rule(
                    ParseRule::tag("p")
                        .with_attr("data-title")
                        .with_priority(TITLE_PARSE_PRIORITY),
                )
                .render(RenderRule::tag("p").with_attr("data-title", "")),
        )?;
        host.register_command("set_title", set_title);
        host.register_command("toggle_title", toggle_title);
        Ok(())
    }
}

/// Convert the cursor block into a title. Fails when the cursor is
/// not in a convertible textblock.
fn set_title(tr: &mut Transaction<'_>) -> bool {
    tr.set_block_type("title")
}

/// Flip the cursor block between title and paragraph.
///
/// Attrs and inline content are untouched, so toggling twice on an
/// unmodified node restores it exactly.
fn toggle_title(tr: &mut Transaction<'_>) -> bool {
    let is_title = matches!(tr.cursor_block_name(), Some("title"));
    let target = if is_title { "paragraph" } else { "title" };
    let ok = tr.set_block_type(target);
    debug!(target, ok, "toggle title");
    ok
}

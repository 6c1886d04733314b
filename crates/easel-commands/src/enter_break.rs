//! Enter as a hard break inside title and heading blocks.
//!
//! A conditional override, not a global rebind: the bound command
//! inspects the cursor context on every keystroke and declines outside
//! title/heading, which lets key dispatch fall through to the default
//! Enter behavior everywhere else.

use easel_doc::{Extension, HostRegistry, KeyCode, KeyPress, SchemaError, Transaction};

/// Binds Enter to a break-insert inside `title` and `heading` nodes.
pub struct EnterAsBreak;

impl Extension for EnterAsBreak {
    fn name(&self) -> &'static str {
        "enter_as_break"
    }

    fn register(&self, host: &mut dyn HostRegistry) -> Result<(), SchemaError> {
        host.register_command("enter_as_break", enter_as_break);
        host.register_keybinding(KeyPress::new(KeyCode::Enter), "enter_as_break");
        Ok(())
    }
}

fn enter_as_break(tr: &mut Transaction<'_>) -> bool {
    if !matches!(tr.cursor_block_name(), Some("title" | "heading")) {
        return false;
    }
    tr.insert_hard_break()
}

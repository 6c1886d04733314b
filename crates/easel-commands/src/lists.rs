//! List item keys: mark-preserving Enter, Tab/Shift-Tab nesting.
//!
//! The host's stock list split drops pending marks, so pressing Enter
//! mid-bold used to reset the new item to plain text. The split here
//! snapshots the marks a new insertion would carry *before* splitting
//! (stored marks first, else the marks at the selection start when the
//! cursor is not at the block start) and re-queues them on the new
//! item.

use easel_doc::{Extension, HostRegistry, KeyCode, KeyPress, SchemaError, Transaction};
use tracing::debug;

/// List-item key behavior: split keeping marks, sink, lift.
pub struct ListKeys;

impl Extension for ListKeys {
    fn name(&self) -> &'static str {
        "list_keys"
    }

    fn register(&self, host: &mut dyn HostRegistry) -> Result<(), SchemaError> {
        host.register_command("split_list_item_keep_marks", split_list_item_keep_marks);
        host.register_command("sink_list_item", sink_list_item);
        host.register_command("lift_list_item", lift_list_item);
        host.register_keybinding(
            KeyPress::new(KeyCode::Enter),
            "split_list_item_keep_marks",
        );
        host.register_keybinding(KeyPress::new(KeyCode::Tab), "sink_list_item");
        host.register_keybinding(KeyPress::shift(KeyCode::Tab), "lift_list_item");
        Ok(())
    }
}

fn split_list_item_keep_marks(tr: &mut Transaction<'_>) -> bool {
    if !tr.in_list_item() {
        return false;
    }
    let marks = tr.state().active_marks_at_cursor();
    if !tr.split_list_item() {
        return false;
    }
    tr.set_stored_marks(marks);
    debug!(?marks, "list split carried marks");
    true
}

fn sink_list_item(tr: &mut Transaction<'_>) -> bool {
    tr.sink_list_item()
}

fn lift_list_item(tr: &mut Transaction<'_>) -> bool {
    tr.lift_list_item()
}

//! The editing session: the host side of the extension contract.
//!
//! Extensions see the host only through [`HostRegistry`], a capability
//! interface with exactly three verbs: register a node type, register
//! a named command, bind a key to a command. [`Session`] implements it
//! and stands in for the full editor host, which makes the command
//! layer unit-testable without one.
//!
//! Registration happens once, at session construction; afterwards the
//! session only dispatches. Key dispatch tries bound commands in
//! registration order and falls back to the built-in default when all
//! of them decline, so a conditional override (Enter-as-break) never
//! has to re-implement the default path.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::key::{KeyCode, KeyPress};
use crate::mark::MarkSet;
use crate::node::Node;
use crate::schema::{NodeSpec, Schema, SchemaError};
use crate::state::{Cursor, EditorState};
use crate::transform::Transaction;

/// A command implementation: mutate the transaction, report success.
pub type CommandFn = fn(&mut Transaction<'_>) -> bool;

/// What an extension may do to the host, and nothing else.
pub trait HostRegistry {
    /// Declare a node type.
    ///
    /// # Errors
    /// [`SchemaError::DuplicateNode`] when the name is taken.
    fn register_node(&mut self, spec: NodeSpec) -> Result<(), SchemaError>;

    /// Register a named command.
    fn register_command(&mut self, name: &str, command: CommandFn);

    /// Bind a key press to a named command. Several commands may bind
    /// the same key; dispatch tries them in registration order.
    fn register_keybinding(&mut self, key: KeyPress, command: &str);
}

/// A behavior package registered into a session at construction.
pub trait Extension {
    /// Name for logs.
    fn name(&self) -> &'static str;

    /// Register node types, commands, and keybindings.
    ///
    /// # Errors
    /// Propagates schema registration failures; a session with a
    /// broken extension set never comes up half-wired.
    fn register(&self, host: &mut dyn HostRegistry) -> Result<(), SchemaError>;
}

/// An editing session over one document.
#[derive(Debug)]
pub struct Session {
    schema: Schema,
    state: EditorState,
    commands: FxHashMap<String, CommandFn>,
    bindings: Vec<(KeyPress, String)>,
}

impl HostRegistry for Session {
    fn register_node(&mut self, spec: NodeSpec) -> Result<(), SchemaError> {
        self.schema.register(spec)
    }

    fn register_command(&mut self, name: &str, command: CommandFn) {
        debug!(command = name, "register command");
        self.commands.insert(name.to_owned(), command);
    }

    fn register_keybinding(&mut self, key: KeyPress, command: &str) {
        self.bindings.push((key, command.to_owned()));
    }
}

impl Session {
    /// Build a session over `doc` from the base schema plus the given
    /// extensions.
    ///
    /// # Errors
    /// Any [`SchemaError`] raised while the extensions register.
    pub fn new(doc: Node, extensions: &[&dyn Extension]) -> Result<Self, SchemaError> {
        let mut session = Self {
            schema: Schema::base(),
            state: EditorState::new(doc),
            commands: FxHashMap::default(),
            bindings: Vec::new(),
        };
        for ext in extensions {
            debug!(extension = ext.name(), "register extension");
            ext.register(&mut session)?;
        }
        Ok(session)
    }

    /// The session schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Current document.
    #[must_use]
    pub fn doc(&self) -> &Node {
        &self.state.doc
    }

    /// Move the cursor. Host-side plumbing, not a command.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.state.cursor = cursor;
    }

    /// Queue or clear pending marks. Host-side plumbing.
    pub fn set_stored_marks(&mut self, marks: Option<MarkSet>) {
        self.state.stored_marks = marks;
    }

    /// Run a named command as one atomic transaction.
    ///
    /// Unknown names fail like failed commands: `false`, no change.
    pub fn run(&mut self, name: &str) -> bool {
        let Some(&command) = self.commands.get(name) else {
            debug!(command = name, "unknown command");
            return false;
        };
        let committed = self.transact(command);
        debug!(command = name, committed, "command");
        committed
    }

    /// Insert text at the cursor, as its own transaction.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let mut tr = Transaction::new(&self.schema, self.state.clone());
        let ok = tr.insert_text(text) && self.schema.validate(&tr.state().doc);
        if ok {
            self.state = tr.into_state();
        }
        ok
    }

    /// Dispatch a key press: bound commands first, in registration
    /// order, then the built-in default for the key. Returns whether
    /// anything handled it.
    pub fn handle_key(&mut self, key: KeyPress) -> bool {
        let bound: Vec<String> = self
            .bindings
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, name)| name.clone())
            .collect();
        for name in bound {
            if self.run(&name) {
                return true;
            }
        }
        self.default_key(key)
    }

    fn default_key(&mut self, key: KeyPress) -> bool {
        match key.code {
            KeyCode::Enter if key.mods.is_empty() => {
                let committed = self.transact(default_split);
                debug!(committed, "default enter split");
                committed
            }
            _ => false,
        }
    }

    fn transact(&mut self, command: CommandFn) -> bool {
        let mut tr = Transaction::new(&self.schema, self.state.clone());
        let ok = command(&mut tr) && self.schema.validate(&tr.state().doc);
        if ok {
            self.state = tr.into_state();
        }
        ok
    }
}

fn default_split(tr: &mut Transaction<'_>) -> bool {
    tr.split_block()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Inline;
    use crate::schema::ContentExpr;

    struct Probe;

    impl Extension for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn register(&self, host: &mut dyn HostRegistry) -> Result<(), SchemaError> {
            host.register_node(
                NodeSpec::block("doc").content(ContentExpr::parse("block+")?),
            )?;
            host.register_command("succeed", |_| true);
            host.register_command("rogue_then_fail", |tr| {
                // mutates, then declines: the session must roll back
                tr.state_mut().doc.children.clear();
                false
            });
            host.register_command("invalid_tree", |tr| {
                tr.state_mut()
                    .doc
                    .children
                    .push(Node::new("mystery"));
                true
            });
            host.register_keybinding(KeyPress::new(KeyCode::Tab), "succeed");
            Ok(())
        }
    }

    fn session() -> Session {
        let doc = Node::with_children(
            "doc",
            vec![Node::textblock("paragraph", [Inline::plain("hello")])],
        );
        Session::new(doc, &[&Probe]).unwrap()
    }

    #[test]
    fn duplicate_extension_nodes_fail_construction() {
        let doc = Node::new("doc");
        let err = Session::new(doc, &[&Probe, &Probe]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateNode(_)));
    }

    #[test]
    fn unknown_commands_are_noops() {
        let mut session = session();
        let before = session.state().clone();
        assert!(!session.run("no_such_command"));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn failed_commands_roll_back_their_mutations() {
        let mut session = session();
        let before = session.state().clone();
        assert!(!session.run("rogue_then_fail"));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn invalid_results_are_rejected_at_commit() {
        let mut session = session();
        let before = session.state().clone();
        assert!(!session.run("invalid_tree"));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn bound_keys_run_their_command() {
        let mut session = session();
        assert!(session.handle_key(KeyPress::new(KeyCode::Tab)));
        assert!(!session.handle_key(KeyPress::shift(KeyCode::Tab)));
    }

    #[test]
    fn default_enter_splits_the_block() {
        let mut session = session();
        session.set_cursor(Cursor::new(vec![0], 2));
        assert!(session.handle_key(KeyPress::new(KeyCode::Enter)));
        assert_eq!(session.doc().children.len(), 2);
        assert_eq!(session.doc().children[0].inline_text(), "he");
        assert_eq!(session.doc().children[1].inline_text(), "llo");
    }

    #[test]
    fn insert_text_uses_active_marks() {
        let mut session = session();
        session.set_cursor(Cursor::new(vec![0], 5));
        session.set_stored_marks(Some(MarkSet::BOLD));
        assert!(session.insert_text("!"));
        let block = session.doc().children[0].clone();
        assert_eq!(
            block.inline.as_slice(),
            &[Inline::plain("hello"), Inline::text("!", MarkSet::BOLD)]
        );
        assert!(session.state().stored_marks.is_none());
    }
}

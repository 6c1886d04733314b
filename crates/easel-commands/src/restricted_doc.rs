//! Restricted document root: exactly one table, nothing else.

use easel_doc::{ContentExpr, Extension, HostRegistry, NodeSpec, SchemaError};

/// Declares the `doc` root with content constrained to a single
/// `table` node.
///
/// Declaration only: enforcement is the schema validator's, which runs
/// at every transaction commit. Any edit that would leave the root
/// with a second top-level node, or a non-table one, fails to commit.
pub struct RestrictedDoc;

impl Extension for RestrictedDoc {
    fn name(&self) -> &'static str {
        "restricted_doc"
    }

    fn register(&self, host: &mut dyn HostRegistry) -> Result<(), SchemaError> {
        host.register_node(
            NodeSpec::block("doc")
                .group(None)
                .content(ContentExpr::parse("table")?),
        )
    }
}

//! Node type registry: content constraints and markup parse rules.
//!
//! A [`Schema`] holds one [`NodeSpec`] per node type. Specs declare
//! what a node may contain (a tiny content-expression language) and
//! how externally-authored markup maps back onto node types (tag +
//! attribute rules with priorities). The schema only declares and
//! checks; all mutation goes through transactions, which consult
//! [`Schema::validate`] before committing.

use std::error::Error;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::node::{Attrs, Node};

/// Priority of the stock parse rules. A rule that should win over a
/// default (the `p[data-title]` case) must carry a higher value.
pub const DEFAULT_PARSE_PRIORITY: u16 = 50;

/// Schema construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A node type with this name is already registered.
    DuplicateNode(String),
    /// A content expression did not parse.
    InvalidContentExpr(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNode(name) => {
                write!(f, "node type {name:?} registered twice")
            }
            Self::InvalidContentExpr(expr) => {
                write!(f, "invalid content expression {expr:?}")
            }
        }
    }
}

impl Error for SchemaError {}

/// What a structural node may contain.
///
/// One term naming a node type or a group, with an optional
/// multiplicity suffix: `"table"` (exactly one), `"list_item+"` (one
/// or more), `"inline*"` (zero or more).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentExpr {
    /// Exactly one child matching the term.
    One(String),
    /// One or more children matching the term.
    OneOrMore(String),
    /// Zero or more children matching the term.
    ZeroOrMore(String),
}

impl ContentExpr {
    /// Parse an expression string.
    ///
    /// # Errors
    /// [`SchemaError::InvalidContentExpr`] when the term is empty or
    /// not an identifier.
    pub fn parse(expr: &str) -> Result<Self, SchemaError> {
        let trimmed = expr.trim();
        let (term, ctor): (&str, fn(String) -> Self) =
            if let Some(t) = trimmed.strip_suffix('+') {
                (t, Self::OneOrMore)
            } else if let Some(t) = trimmed.strip_suffix('*') {
                (t, Self::ZeroOrMore)
            } else {
                (trimmed, Self::One)
            };
        let is_ident = !term.is_empty()
            && term
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !is_ident {
            return Err(SchemaError::InvalidContentExpr(expr.to_owned()));
        }
        Ok(ctor(term.to_owned()))
    }

    /// The node type or group the expression names.
    #[must_use]
    pub fn term(&self) -> &str {
        match self {
            Self::One(t) | Self::OneOrMore(t) | Self::ZeroOrMore(t) => t,
        }
    }
}

/// A markup import rule: match an element by tag, optionally requiring
/// an attribute, at a given priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRule {
    /// Element tag to match (`p`, `h1`, `ul`, ...).
    pub tag: String,
    /// Required attribute: name, and an exact value when given.
    pub attr: Option<(String, Option<String>)>,
    /// Higher wins when several rules match one element.
    pub priority: u16,
}

impl ParseRule {
    /// Rule matching a bare tag at the default priority.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attr: None,
            priority: DEFAULT_PARSE_PRIORITY,
        }
    }

    /// Require an attribute to be present, regardless of value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>) -> Self {
        self.attr = Some((name.into(), None));
        self
    }

    /// Override the rule priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority;
        self
    }

    fn matches(&self, tag: &str, attrs: &Attrs) -> bool {
        if self.tag != tag {
            return false;
        }
        match &self.attr {
            None => true,
            Some((name, None)) => attrs.contains_key(name),
            Some((name, Some(value))) => attrs.get(name) == Some(value),
        }
    }
}

/// How a node type serializes to markup: an element tag plus fixed
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRule {
    /// Element tag to emit.
    pub tag: String,
    /// Attributes always present on the element.
    pub attrs: Vec<(String, String)>,
}

impl RenderRule {
    /// Render as a bare tag.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    /// Add a fixed attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }
}

/// Declaration of one node type.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Type name, unique within the schema.
    pub name: String,
    /// Group the type belongs to, referenced by content terms.
    pub group: Option<String>,
    /// Allowed block children. `None` plus `inline_content` means a
    /// textblock; `None` without it means a leaf.
    pub content: Option<ContentExpr>,
    /// Whether the node holds inline runs instead of block children.
    pub inline_content: bool,
    /// Markup import rules.
    pub parse_rules: Vec<ParseRule>,
    /// Markup export rule.
    pub render: Option<RenderRule>,
}

impl NodeSpec {
    /// Structural node in the `block` group.
    pub fn block(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: Some("block".to_owned()),
            content: None,
            inline_content: false,
            parse_rules: Vec::new(),
            render: None,
        }
    }

    /// Textblock (inline content) in the `block` group.
    pub fn textblock(name: impl Into<String>) -> Self {
        let mut spec = Self::block(name);
        spec.inline_content = true;
        spec
    }

    /// Replace the group (or clear it).
    #[must_use]
    pub fn group(mut self, group: Option<&str>) -> Self {
        self.group = group.map(str::to_owned);
        self
    }

    /// Set the content constraint.
    #[must_use]
    pub fn content(mut self, expr: ContentExpr) -> Self {
        self.content = Some(expr);
        self
    }

    /// Add a markup import rule.
    #[must_use]
    pub fn parse_rule(mut self, rule: ParseRule) -> Self {
        self.parse_rules.push(rule);
        self
    }

    /// Set the markup export rule.
    #[must_use]
    pub fn render(mut self, rule: RenderRule) -> Self {
        self.render = Some(rule);
        self
    }
}

/// Registry of node types for one editing session.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    specs: FxHashMap<String, NodeSpec>,
}

impl Schema {
    /// Schema with no node types.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock node types every session starts from: `paragraph`,
    /// `heading`, `bullet_list`, `list_item`, and `table`.
    ///
    /// The root type is not part of the base; the session's extension
    /// set contributes it.
    #[must_use]
    pub fn base() -> Self {
        let mut schema = Self::empty();
        // Base registrations cannot collide; errors are unreachable.
        let specs = [
            NodeSpec::textblock("paragraph")
                .parse_rule(ParseRule::tag("p"))
                .render(RenderRule::tag("p")),
            NodeSpec::textblock("heading")
                .parse_rule(ParseRule::tag("h1"))
                .parse_rule(ParseRule::tag("h2"))
                .parse_rule(ParseRule::tag("h3"))
                .render(RenderRule::tag("h1")),
            NodeSpec::block("bullet_list")
                .content(ContentExpr::OneOrMore("list_item".to_owned()))
                .parse_rule(ParseRule::tag("ul"))
                .render(RenderRule::tag("ul")),
            NodeSpec::block("list_item")
                .group(None)
                .content(ContentExpr::OneOrMore("block".to_owned()))
                .parse_rule(ParseRule::tag("li"))
                .render(RenderRule::tag("li")),
            NodeSpec::block("table")
                .content(ContentExpr::OneOrMore("block".to_owned()))
                .parse_rule(ParseRule::tag("table"))
                .render(RenderRule::tag("table")),
        ];
        for spec in specs {
            let _ = schema.register(spec);
        }
        schema
    }

    /// Register a node type.
    ///
    /// # Errors
    /// [`SchemaError::DuplicateNode`] when the name is taken.
    pub fn register(&mut self, spec: NodeSpec) -> Result<(), SchemaError> {
        if self.specs.contains_key(&spec.name) {
            return Err(SchemaError::DuplicateNode(spec.name));
        }
        tracing::debug!(node = %spec.name, "schema register");
        self.specs.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Spec for a type name.
    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&NodeSpec> {
        self.specs.get(name)
    }

    /// Whether `name` is a registered textblock type.
    #[must_use]
    pub fn is_textblock(&self, name: &str) -> bool {
        self.spec(name).is_some_and(|s| s.inline_content)
    }

    fn matches_term(&self, child: &Node, term: &str) -> bool {
        if child.type_name == term {
            return true;
        }
        self.spec(&child.type_name)
            .is_some_and(|s| s.group.as_deref() == Some(term))
    }

    /// Whether `children` satisfy `spec`'s content constraint.
    #[must_use]
    pub fn validate_children(&self, spec: &NodeSpec, children: &[Node]) -> bool {
        match &spec.content {
            None => children.is_empty(),
            Some(ContentExpr::One(term)) => {
                children.len() == 1 && self.matches_term(&children[0], term)
            }
            Some(ContentExpr::OneOrMore(term)) => {
                !children.is_empty()
                    && children.iter().all(|c| self.matches_term(c, term))
            }
            Some(ContentExpr::ZeroOrMore(term)) => {
                children.iter().all(|c| self.matches_term(c, term))
            }
        }
    }

    /// Structural validity of a whole subtree.
    ///
    /// Every node must be a registered type; textblocks must carry no
    /// block children; structural nodes must satisfy their content
    /// constraint. This runs at transaction commit, so a command that
    /// produces an invalid tree becomes a no-op.
    #[must_use]
    pub fn validate(&self, node: &Node) -> bool {
        let Some(spec) = self.spec(&node.type_name) else {
            return false;
        };
        if spec.inline_content {
            return node.children.is_empty();
        }
        if !node.inline.is_empty() {
            return false;
        }
        self.validate_children(spec, &node.children)
            && node.children.iter().all(|c| self.validate(c))
    }

    /// Export rule for a node type.
    #[must_use]
    pub fn render_rule(&self, name: &str) -> Option<&RenderRule> {
        self.spec(name).and_then(|s| s.render.as_ref())
    }

    /// Node type for an imported markup element, by best parse rule.
    ///
    /// All rules across all specs compete; the highest priority wins.
    #[must_use]
    pub fn match_element(&self, tag: &str, attrs: &Attrs) -> Option<&str> {
        let mut best: Option<(&str, u16)> = None;
        for spec in self.specs.values() {
            for rule in &spec.parse_rules {
                if !rule.matches(tag, attrs) {
                    continue;
                }
                if best.is_none_or(|(_, p)| rule.priority > p) {
                    best = Some((spec.name.as_str(), rule.priority));
                }
            }
        }
        best.map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Inline;

    #[test]
    fn content_expr_parses_multiplicities() {
        assert_eq!(
            ContentExpr::parse("table").unwrap(),
            ContentExpr::One("table".to_owned())
        );
        assert_eq!(
            ContentExpr::parse("list_item+").unwrap(),
            ContentExpr::OneOrMore("list_item".to_owned())
        );
        assert_eq!(
            ContentExpr::parse("block*").unwrap(),
            ContentExpr::ZeroOrMore("block".to_owned())
        );
    }

    #[test]
    fn content_expr_rejects_junk() {
        for bad in ["", "+", "two words", "a-b"] {
            assert!(ContentExpr::parse(bad).is_err(), "parsed {bad:?}");
        }
    }

    #[test]
    fn duplicate_registration_errors() {
        let mut schema = Schema::base();
        let err = schema.register(NodeSpec::textblock("paragraph")).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateNode("paragraph".to_owned()));
    }

    #[test]
    fn exactly_one_constraint() {
        let mut schema = Schema::base();
        schema
            .register(
                NodeSpec::block("doc").content(ContentExpr::One("table".to_owned())),
            )
            .unwrap();
        let table = Node::with_children(
            "table",
            vec![Node::textblock("paragraph", [Inline::plain("x")])],
        );
        assert!(schema.validate(&Node::with_children("doc", vec![table.clone()])));
        assert!(!schema.validate(&Node::with_children("doc", vec![])));
        assert!(!schema.validate(&Node::with_children(
            "doc",
            vec![table.clone(), table.clone()]
        )));
        assert!(!schema.validate(&Node::with_children(
            "doc",
            vec![Node::textblock("paragraph", [])]
        )));
    }

    #[test]
    fn group_terms_match_members() {
        let schema = Schema::base();
        let spec = NodeSpec::block("cell")
            .content(ContentExpr::OneOrMore("block".to_owned()));
        let kids = vec![
            Node::textblock("paragraph", []),
            Node::textblock("heading", []),
        ];
        assert!(schema.validate_children(&spec, &kids));
        let not_block = vec![Node::new("list_item")];
        assert!(!schema.validate_children(&spec, &not_block));
    }

    #[test]
    fn textblocks_may_not_have_block_children() {
        let schema = Schema::base();
        let mut bad = Node::textblock("paragraph", [Inline::plain("x")]);
        bad.children.push(Node::textblock("paragraph", []));
        assert!(!schema.validate(&bad));
    }

    #[test]
    fn unknown_types_fail_validation() {
        let schema = Schema::base();
        assert!(!schema.validate(&Node::new("mystery")));
    }

    #[test]
    fn match_element_picks_highest_priority() {
        let mut schema = Schema::base();
        schema
            .register(NodeSpec::textblock("title").parse_rule(
                ParseRule::tag("p").with_attr("data-title").with_priority(1000),
            ))
            .unwrap();
        let mut attrs = Attrs::default();
        assert_eq!(schema.match_element("p", &attrs), Some("paragraph"));
        attrs.insert("data-title".to_owned(), String::new());
        assert_eq!(schema.match_element("p", &attrs), Some("title"));
        assert_eq!(schema.match_element("h2", &attrs), Some("heading"));
        assert_eq!(schema.match_element("video", &attrs), None);
    }
}

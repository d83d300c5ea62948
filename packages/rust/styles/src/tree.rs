//! Style tree produced by the parser.

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
}

/// A top-level or nested rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// `selector { declarations }`
    Style {
        prelude: String,
        declarations: Vec<Declaration>,
    },
    /// `@name prelude;` or `@name prelude { ... }`
    At {
        name: String,
        prelude: String,
        block: Option<AtBlock>,
    },
}

/// Body of an at-rule.
#[derive(Debug, Clone, PartialEq)]
pub enum AtBlock {
    /// `@media`, `@supports`, `@keyframes`, ...
    Rules(Vec<Rule>),
    /// `@font-face`, `@page`, ...
    Declarations(Vec<Declaration>),
}

/// `property: value [!important]`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: Vec<ValueNode>,
    /// Source text of the value, trimmed, without `!important`.
    pub raw: String,
    pub important: bool,
}

/// One component of a declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// `#abc` / `#112233`, stored without the `#`.
    Hash(String),
    Ident(String),
    /// Numbers, percentages, and dimensions as written (`16px`, `50%`).
    Literal(String),
    Str(String),
    Url(String),
    /// Commas, slashes, and other delimiters.
    Operator(String),
    Function { name: String, args: Vec<ValueNode> },
    /// A parenthesized or bracketed group.
    Block(Vec<ValueNode>),
}

impl StyleSheet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every declaration in the sheet, in pre-order across nested at-rules.
    pub fn declarations(&self) -> Vec<&Declaration> {
        let mut out = Vec::new();
        collect_declarations(&self.rules, &mut out);
        out
    }

    /// Visit every value node of every declaration, depth first.
    pub fn walk_values<F: FnMut(&ValueNode)>(&self, mut visit: F) {
        for decl in self.declarations() {
            for node in &decl.value {
                node.walk(&mut visit);
            }
        }
    }
}

fn collect_declarations<'a>(rules: &'a [Rule], out: &mut Vec<&'a Declaration>) {
    for rule in rules {
        match rule {
            Rule::Style { declarations, .. } => out.extend(declarations.iter()),
            Rule::At {
                block: Some(AtBlock::Declarations(declarations)),
                ..
            } => out.extend(declarations.iter()),
            Rule::At {
                block: Some(AtBlock::Rules(nested)),
                ..
            } => collect_declarations(nested, out),
            Rule::At { block: None, .. } => {}
        }
    }
}

impl Declaration {
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with("--")
    }
}

impl ValueNode {
    /// Pre-order walk: the node itself, then function arguments and block contents.
    pub fn walk<F: FnMut(&ValueNode)>(&self, visit: &mut F) {
        visit(self);
        match self {
            ValueNode::Function { args, .. } | ValueNode::Block(args) => {
                for arg in args {
                    arg.walk(visit);
                }
            }
            _ => {}
        }
    }

    /// Serialize back to CSS text.
    pub fn to_css(&self) -> String {
        match self {
            ValueNode::Hash(h) => format!("#{h}"),
            ValueNode::Ident(s) | ValueNode::Literal(s) | ValueNode::Operator(s) => s.clone(),
            ValueNode::Str(s) => format!("\"{s}\""),
            ValueNode::Url(u) => format!("url({u})"),
            ValueNode::Function { name, args } => format!("{name}({})", serialize_nodes(args)),
            ValueNode::Block(nodes) => format!("({})", serialize_nodes(nodes)),
        }
    }
}

/// Join value nodes with single spaces; commas bind to the left.
pub fn serialize_nodes(nodes: &[ValueNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        if matches!(node, ValueNode::Operator(op) if op == ",") {
            out.push_str(", ");
            continue;
        }
        if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push_str(&node.to_css());
    }
    out
}

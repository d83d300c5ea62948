//! `cssparser`-driven construction of the style tree.
//!
//! Recovery follows the usual CSS rules: a malformed declaration is dropped
//! and parsing resumes after the next `;`. Bad strings and bad urls are
//! treated as unrecoverable and fail the whole sheet.

use cssparser::{Delimiter, ParseError, ParseErrorKind, Parser, ParserInput, ToCss, Token};
use tracing::debug;

use crate::tree::{AtBlock, Declaration, Rule, StyleSheet, ValueNode};

/// At-rules whose block holds rules rather than declarations.
const RULE_LIST_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "layer",
    "container",
    "document",
    "scope",
    "keyframes",
    "-webkit-keyframes",
    "-moz-keyframes",
];

/// Why a stylesheet could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct StyleParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// Marker for tokenizer errors the parser does not recover from.
#[derive(Debug, Clone)]
struct Unrecoverable(&'static str);

type PResult<'i, T> = Result<T, ParseError<'i, Unrecoverable>>;

/// Parse CSS text into a [`StyleSheet`].
pub fn parse_stylesheet(css: &str) -> Result<StyleSheet, StyleParseError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    parse_rule_list(&mut parser)
        .map(|rules| StyleSheet { rules })
        .map_err(|e| StyleParseError {
            message: match &e.kind {
                ParseErrorKind::Custom(Unrecoverable(what)) => (*what).to_string(),
                ParseErrorKind::Basic(kind) => format!("{kind:?}"),
            },
            line: e.location.line + 1,
            column: e.location.column,
        })
}

fn parse_rule_list<'i, 't>(p: &mut Parser<'i, 't>) -> PResult<'i, Vec<Rule>> {
    let mut rules = Vec::new();

    while !p.is_exhausted() {
        let start = p.position();
        let token = p.next()?.clone();
        match token {
            Token::CDO | Token::CDC => {}
            Token::AtKeyword(name) => rules.push(parse_at_rule(p, name.to_string())?),
            first => {
                if let Some(rule) = parse_style_rule(p, first, start)? {
                    rules.push(rule);
                }
            }
        }
    }

    Ok(rules)
}

fn parse_style_rule<'i, 't>(
    p: &mut Parser<'i, 't>,
    first: Token<'i>,
    start: cssparser::SourcePosition,
) -> PResult<'i, Option<Rule>> {
    let mut token = first;
    loop {
        match token {
            Token::CurlyBracketBlock => {
                let prelude = p.slice_from(start).trim_end_matches('{').trim().to_string();
                let declarations = p.parse_nested_block(|p| parse_declaration_list(p))?;
                return Ok(Some(Rule::Style {
                    prelude,
                    declarations,
                }));
            }
            Token::BadString(_) => {
                return Err(p.new_custom_error(Unrecoverable("unterminated string")));
            }
            Token::BadUrl(_) => return Err(p.new_custom_error(Unrecoverable("malformed url()"))),
            _ => {}
        }

        // A prelude with no block is dropped.
        if p.is_exhausted() {
            return Ok(None);
        }
        token = p.next()?.clone();
    }
}

fn parse_at_rule<'i, 't>(p: &mut Parser<'i, 't>, name: String) -> PResult<'i, Rule> {
    let prelude_start = p.position();

    loop {
        if p.is_exhausted() {
            let prelude = p.slice_from(prelude_start).trim().to_string();
            return Ok(Rule::At {
                name,
                prelude,
                block: None,
            });
        }

        match p.next()?.clone() {
            Token::Semicolon => {
                let prelude = p
                    .slice_from(prelude_start)
                    .trim_end_matches(';')
                    .trim()
                    .to_string();
                return Ok(Rule::At {
                    name,
                    prelude,
                    block: None,
                });
            }
            Token::CurlyBracketBlock => {
                let prelude = p
                    .slice_from(prelude_start)
                    .trim_end_matches('{')
                    .trim()
                    .to_string();
                let lowered = name.to_ascii_lowercase();
                let block = if RULE_LIST_AT_RULES.contains(&lowered.as_str()) {
                    AtBlock::Rules(p.parse_nested_block(|p| parse_rule_list(p))?)
                } else {
                    AtBlock::Declarations(p.parse_nested_block(|p| parse_declaration_list(p))?)
                };
                return Ok(Rule::At {
                    name,
                    prelude,
                    block: Some(block),
                });
            }
            Token::BadString(_) => {
                return Err(p.new_custom_error(Unrecoverable("unterminated string")));
            }
            Token::BadUrl(_) => return Err(p.new_custom_error(Unrecoverable("malformed url()"))),
            _ => {}
        }
    }
}

fn parse_declaration_list<'i, 't>(p: &mut Parser<'i, 't>) -> PResult<'i, Vec<Declaration>> {
    let mut declarations = Vec::new();

    while !p.is_exhausted() {
        match p.parse_until_after(Delimiter::Semicolon, |p| parse_declaration(p)) {
            Ok(Some(decl)) => declarations.push(decl),
            Ok(None) => {}
            Err(e) if matches!(e.kind, ParseErrorKind::Custom(_)) => return Err(e),
            Err(e) => {
                debug!(
                    line = e.location.line + 1,
                    column = e.location.column,
                    "skipping malformed declaration"
                );
            }
        }
    }

    Ok(declarations)
}

fn parse_declaration<'i, 't>(p: &mut Parser<'i, 't>) -> PResult<'i, Option<Declaration>> {
    if p.is_exhausted() {
        return Ok(None);
    }

    let property = match p.next()?.clone() {
        Token::Ident(name) => name.to_string(),
        other => return Err(p.new_unexpected_token_error(other)),
    };
    p.expect_colon()?;

    let value_start = p.position();
    let mut value = parse_value(p)?;
    let mut raw = p.slice_from(value_start).trim();

    let important = strip_important(&mut value);
    if important {
        if let Some(bang) = raw.rfind('!') {
            raw = raw[..bang].trim_end();
        }
    }

    Ok(Some(Declaration {
        property,
        value,
        raw: raw.to_string(),
        important,
    }))
}

/// Remove a trailing `! important` pair, reporting whether it was there.
fn strip_important(value: &mut Vec<ValueNode>) -> bool {
    let n = value.len();
    if n < 2 {
        return false;
    }
    let is_important = matches!(&value[n - 2], ValueNode::Operator(op) if op == "!")
        && matches!(&value[n - 1], ValueNode::Ident(id) if id.eq_ignore_ascii_case("important"));
    if is_important {
        value.truncate(n - 2);
    }
    is_important
}

fn parse_value<'i, 't>(p: &mut Parser<'i, 't>) -> PResult<'i, Vec<ValueNode>> {
    let mut nodes = Vec::new();

    while !p.is_exhausted() {
        let token = p.next()?.clone();
        let node = match token {
            Token::Hash(ref v) | Token::IDHash(ref v) => ValueNode::Hash(v.to_string()),
            Token::Ident(ref v) => ValueNode::Ident(v.to_string()),
            Token::Number { .. } | Token::Percentage { .. } | Token::Dimension { .. } => {
                ValueNode::Literal(token.to_css_string())
            }
            Token::QuotedString(ref s) => ValueNode::Str(s.to_string()),
            Token::UnquotedUrl(ref u) => ValueNode::Url(u.to_string()),
            Token::Function(ref name) => {
                let name = name.to_string();
                let args = p.parse_nested_block(|p| parse_value(p))?;
                if name.eq_ignore_ascii_case("url") {
                    match args.as_slice() {
                        [ValueNode::Str(s)] => ValueNode::Url(s.clone()),
                        _ => ValueNode::Function { name, args },
                    }
                } else {
                    ValueNode::Function { name, args }
                }
            }
            Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                ValueNode::Block(p.parse_nested_block(|p| parse_value(p))?)
            }
            Token::Comma => ValueNode::Operator(",".into()),
            Token::Delim(c) => ValueNode::Operator(c.to_string()),
            Token::BadString(_) => {
                return Err(p.new_custom_error(Unrecoverable("unterminated string")));
            }
            Token::BadUrl(_) => return Err(p.new_custom_error(Unrecoverable("malformed url()"))),
            other => ValueNode::Operator(other.to_css_string()),
        };
        nodes.push(node);
    }

    Ok(nodes)
}

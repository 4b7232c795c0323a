//! Literal tokens.

use super::Lowerer;
use super::expressions::string_body;
use crate::classify::{LiteralKind, literal_kind};
use crate::ir::JsNode;

impl Lowerer<'_> {
    /// Raw literal token to a target literal or identifier.
    ///
    /// Numbers and regexes keep their token text. Strings lose their quotes
    /// so the printer can apply the configured quote style.
    pub(super) fn map_literal(&self, raw: &str) -> JsNode {
        match literal_kind(raw) {
            LiteralKind::Number => JsNode::number(raw),
            LiteralKind::Regex => JsNode::RegexLiteral(raw.to_string()),
            LiteralKind::String => JsNode::string(string_body(raw)),
            LiteralKind::This => JsNode::This,
            LiteralKind::NaN | LiteralKind::Identifier | LiteralKind::StatementKeyword => {
                JsNode::id(raw)
            }
        }
    }
}

//! IR Printer
//!
//! Turns a `JsNode` tree into source text.
//!
//! Formatting is fixed apart from the indentation width and quote style:
//! - statements are separated by a blank line when either neighbour spans
//!   several lines
//! - object literals and object patterns always break one property per line
//! - conditional expressions are always parenthesized
//! - `case` labels align with their `switch`

use csz_common::CompileOptions;
use csz_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};

use crate::ir::*;

#[path = "ir_printer_helpers.rs"]
mod helpers;

/// Printer for the target IR
pub struct IrPrinter {
    options: CompileOptions,
    indent_unit: String,
    output: String,
    indent_level: usize,
}

// =========================================================================
// Precedence levels
// =========================================================================

pub(crate) const PREC_COMMA: u8 = 1;
pub(crate) const PREC_YIELD: u8 = 2;
pub(crate) const PREC_ASSIGN: u8 = 3;
pub(crate) const PREC_CONDITIONAL: u8 = 4;
pub(crate) const PREC_UNARY: u8 = 16;
pub(crate) const PREC_POSTFIX: u8 = 17;
pub(crate) const PREC_CALL: u8 = 18;
pub(crate) const PREC_PRIMARY: u8 = 20;

fn binary_precedence(operator: &str) -> u8 {
    match operator {
        "||" | "??" => 5,
        "&&" => 6,
        "|" => 7,
        "^" => 8,
        "&" => 9,
        "==" | "!=" | "===" | "!==" => 10,
        "<" | ">" | "<=" | ">=" | "in" | "instanceof" => 11,
        "<<" | ">>" | ">>>" => 12,
        "+" | "-" => 13,
        "*" | "/" | "%" => 14,
        "**" => 15,
        _ => PREC_CONDITIONAL + 1,
    }
}

/// Binding strength of an expression node.
pub(crate) fn precedence(node: &JsNode) -> u8 {
    match node {
        JsNode::CommaExpr(_) => PREC_COMMA,
        JsNode::YieldExpr { .. } => PREC_YIELD,
        JsNode::AssignExpr { .. } | JsNode::ArrowFunction { .. } => PREC_ASSIGN,
        JsNode::Fragment { atomic: false, .. } => PREC_CONDITIONAL,
        JsNode::BinaryExpr { operator, .. } | JsNode::LogicalExpr { operator, .. } => {
            binary_precedence(operator)
        }
        JsNode::UnaryExpr { .. } | JsNode::UpdateExpr { prefix: true, .. } => PREC_UNARY,
        JsNode::UpdateExpr { prefix: false, .. } => PREC_POSTFIX,
        JsNode::CallExpr { .. }
        | JsNode::NewExpr { .. }
        | JsNode::PropertyAccess { .. }
        | JsNode::ElementAccess { .. } => PREC_CALL,
        _ => PREC_PRIMARY,
    }
}

/// Nodes whose text would be misread at the start of an expression
/// statement or as the object of a member/call expression.
const fn needs_guard_parens(node: &JsNode) -> bool {
    matches!(
        node,
        JsNode::FunctionExpr { .. }
            | JsNode::ClassExpr(_)
            | JsNode::ObjectLiteral(_)
            | JsNode::ObjectPattern(_)
    )
}

/// Leftmost sub-expression, the one whose text starts the statement.
fn leftmost(node: &JsNode) -> &JsNode {
    match node {
        JsNode::BinaryExpr { left, .. } | JsNode::LogicalExpr { left, .. }
            if precedence(left) >= precedence(node) =>
        {
            leftmost(left)
        }
        JsNode::AssignExpr { target, .. } => leftmost(target),
        JsNode::CallExpr { callee, .. } if !needs_guard_parens(callee) => leftmost(callee),
        JsNode::PropertyAccess { object, .. } | JsNode::ElementAccess { object, .. }
            if !needs_guard_parens(object) =>
        {
            leftmost(object)
        }
        JsNode::UpdateExpr {
            operand,
            prefix: false,
            ..
        } => leftmost(operand),
        JsNode::CommaExpr(items) => items.first().map_or(node, leftmost),
        _ => node,
    }
}

impl IrPrinter {
    pub fn new(options: &CompileOptions) -> Self {
        Self {
            indent_unit: options.indent_unit(),
            options: options.clone(),
            output: String::new(),
            indent_level: 0,
        }
    }

    /// Print with default options.
    pub fn emit_to_string(node: &JsNode) -> String {
        Self::print(node, &CompileOptions::default())
    }

    pub fn print(node: &JsNode, options: &CompileOptions) -> String {
        let mut printer = Self::new(options);
        printer.emit_node(node);
        printer.output
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn take_output(self) -> String {
        self.output
    }

    /// Emit any node at the loosest precedence.
    pub fn emit_node(&mut self, node: &JsNode) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || self.emit_node_inner(node));
    }

    fn emit_node_inner(&mut self, node: &JsNode) {
        match node {
            JsNode::Program(statements) => {
                self.emit_statement_list(statements);
                while self.output.ends_with('\n') {
                    self.output.pop();
                }
            }
            JsNode::VarDecl {
                target,
                initializer,
            } => {
                self.write("var ");
                self.emit_node(target);
                if let Some(initializer) = initializer {
                    self.write(" = ");
                    self.emit_expr(initializer, PREC_ASSIGN);
                }
                self.write(";");
            }
            JsNode::ExpressionStatement(expr) => self.emit_expression_statement(expr),
            JsNode::ReturnStatement(argument) => {
                self.write("return");
                if let Some(argument) = argument {
                    self.write(" ");
                    self.emit_node(argument);
                }
                self.write(";");
            }
            JsNode::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write("if (");
                self.emit_node(condition);
                self.write(") ");
                self.emit_block_body(then_branch);
                if let Some(else_branch) = else_branch {
                    self.write(" else ");
                    match else_branch.as_ref() {
                        JsNode::Block(statements) => self.emit_block_body(statements),
                        other => self.emit_node(other),
                    }
                }
            }
            JsNode::Block(statements) => self.emit_block_body(statements),
            JsNode::SwitchStatement {
                discriminant,
                cases,
            } => self.emit_switch(discriminant, cases),
            JsNode::ForOfStatement {
                binding,
                iterable,
                body,
            } => {
                self.write("for (let ");
                self.emit_node(binding);
                self.write(" of ");
                self.emit_expr(iterable, PREC_ASSIGN);
                self.write(") ");
                self.emit_block_body(body);
            }
            JsNode::ForInStatement {
                binding,
                object,
                body,
            } => {
                self.write("for (let ");
                self.emit_node(binding);
                self.write(" in ");
                self.emit_node(object);
                self.write(") ");
                self.emit_block_body(body);
            }
            JsNode::WhileStatement { condition, body } => {
                self.write("while (");
                self.emit_node(condition);
                self.write(") ");
                self.emit_block_body(body);
            }
            JsNode::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                self.write("try ");
                self.emit_block_body(block);
                if let Some(handler) = handler {
                    self.write(" catch ");
                    if let Some(param) = &handler.param {
                        self.write("(");
                        self.emit_node(param);
                        self.write(") ");
                    }
                    self.emit_block_body(&handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.write(" finally ");
                    self.emit_block_body(finalizer);
                }
            }
            JsNode::ThrowStatement(argument) => {
                self.write("throw ");
                self.emit_node(argument);
                self.write(";");
            }
            JsNode::BreakStatement => self.write("break;"),
            JsNode::ContinueStatement => self.write("continue;"),
            JsNode::DebuggerStatement => self.write("debugger;"),
            JsNode::ClassDecl(class) => self.emit_class(class),
            JsNode::Comment(text) => self.emit_comment(text),
            _ => self.emit_expr(node, 0),
        }
    }

    /// Emit an expression, parenthesized when it binds looser than
    /// `min_precedence`.
    fn emit_expr(&mut self, node: &JsNode, min_precedence: u8) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            if precedence(node) < min_precedence {
                self.write("(");
                self.emit_expr_inner(node);
                self.write(")");
            } else {
                self.emit_expr_inner(node);
            }
        });
    }

    fn emit_expr_inner(&mut self, node: &JsNode) {
        match node {
            // Literals
            JsNode::NumericLiteral(raw) | JsNode::RegexLiteral(raw) => self.write(raw),
            JsNode::StringLiteral(body) => self.emit_string(body),
            JsNode::BooleanLiteral(value) => self.write(if *value { "true" } else { "false" }),
            JsNode::NullLiteral => self.write("null"),

            // Identifiers
            JsNode::Identifier(name) => self.write(name),
            JsNode::This => self.write("this"),
            JsNode::Super => self.write("super"),

            // Operators
            JsNode::BinaryExpr {
                left,
                operator,
                right,
            }
            | JsNode::LogicalExpr {
                left,
                operator,
                right,
            } => {
                let prec = binary_precedence(operator);
                let right_assoc = operator == "**";
                self.emit_expr(left, if right_assoc { prec + 1 } else { prec });
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_expr(right, if right_assoc { prec } else { prec + 1 });
            }
            JsNode::AssignExpr {
                target,
                operator,
                value,
            } => {
                self.emit_expr(target, PREC_CALL);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_expr(value, PREC_ASSIGN);
            }
            JsNode::UnaryExpr { operator, operand } => {
                self.write(operator);
                if operator.chars().all(char::is_alphabetic) {
                    self.write(" ");
                }
                let repeats_sign = matches!(operator.as_str(), "-" | "+")
                    && matches!(
                        operand.as_ref(),
                        JsNode::UnaryExpr { operator: inner, .. }
                            | JsNode::UpdateExpr { operator: inner, prefix: true, .. }
                            if inner.starts_with(operator.as_str())
                    );
                if repeats_sign {
                    self.write("(");
                    self.emit_node(operand);
                    self.write(")");
                } else {
                    self.emit_expr(operand, PREC_UNARY);
                }
            }
            JsNode::UpdateExpr {
                operator,
                operand,
                prefix,
            } => {
                if *prefix {
                    self.write(operator);
                    self.emit_expr(operand, PREC_UNARY);
                } else {
                    self.emit_expr(operand, PREC_POSTFIX);
                    self.write(operator);
                }
            }
            JsNode::ConditionalExpr {
                condition,
                when_true,
                when_false,
            } => {
                self.write("(");
                self.emit_expr(condition, PREC_CONDITIONAL + 1);
                self.write(" ? ");
                self.emit_expr(when_true, PREC_ASSIGN);
                self.write(" : ");
                self.emit_expr(when_false, PREC_ASSIGN);
                self.write(")");
            }
            JsNode::YieldExpr { argument, delegate } => {
                self.write(if *delegate { "yield*" } else { "yield" });
                if let Some(argument) = argument {
                    self.write(" ");
                    self.emit_expr(argument, PREC_YIELD);
                }
            }
            JsNode::CommaExpr(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr(item, PREC_YIELD);
                }
            }
            JsNode::Parenthesized(inner) => {
                self.write("(");
                self.emit_node(inner);
                self.write(")");
            }

            // Calls and members
            JsNode::CallExpr { callee, arguments } => {
                self.emit_callee(callee, false);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            JsNode::NewExpr { callee, arguments } => {
                self.write("new ");
                self.emit_callee(callee, true);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            JsNode::PropertyAccess { object, property } => {
                self.emit_member_object(object);
                self.write(".");
                self.write(property);
            }
            JsNode::ElementAccess { object, index } => {
                self.emit_member_object(object);
                self.write("[");
                self.emit_node(index);
                self.write("]");
            }

            // Literals with structure
            JsNode::ArrayLiteral(elements) | JsNode::ArrayPattern(elements) => {
                self.write("[");
                self.emit_comma_separated(elements);
                self.write("]");
            }
            JsNode::ObjectLiteral(properties) | JsNode::ObjectPattern(properties) => {
                self.emit_object_multiline(properties);
            }
            JsNode::SpreadElement(inner) | JsNode::RestElement(inner) => {
                self.write("...");
                self.emit_expr(inner, PREC_ASSIGN);
            }
            JsNode::DefaultPattern { target, default } => {
                self.emit_node(target);
                self.write(" = ");
                self.emit_expr(default, PREC_ASSIGN);
            }

            // Functions and classes
            JsNode::FunctionExpr {
                name,
                params,
                body,
                generator,
            } => {
                self.write(if *generator { "function*" } else { "function" });
                if let Some(name) = name {
                    self.write(" ");
                    self.write(name);
                }
                self.write("(");
                self.emit_comma_separated(params);
                self.write(") ");
                self.emit_block_body(body);
            }
            JsNode::ArrowFunction { params, body } => {
                match params.as_slice() {
                    [JsNode::Identifier(name)] => self.write(name),
                    _ => {
                        self.write("(");
                        self.emit_comma_separated(params);
                        self.write(")");
                    }
                }
                self.write(" => ");
                self.emit_block_body(body);
            }
            JsNode::ClassExpr(class) => self.emit_class(class),

            // Verbatim code
            JsNode::Raw(code) => self.write(code),
            JsNode::Fragment { code, .. } => self.write_reindented(code),

            // Statements never reach here from well-formed trees; print them
            // in place so a malformed tree is still visible in the output.
            _ => self.emit_node(node),
        }
    }

    fn emit_callee(&mut self, callee: &JsNode, is_new: bool) {
        let guard = needs_guard_parens(callee)
            || precedence(callee) < PREC_CALL
            || (is_new && matches!(callee, JsNode::CallExpr { .. }));
        if guard {
            self.write("(");
            self.emit_node(callee);
            self.write(")");
        } else {
            self.emit_expr(callee, PREC_CALL);
        }
    }

    fn emit_member_object(&mut self, object: &JsNode) {
        let guard = needs_guard_parens(object)
            || precedence(object) < PREC_CALL
            || matches!(object, JsNode::NumericLiteral(raw) if !raw.contains(['.', 'x', 'X', 'e', 'E']));
        if guard {
            self.write("(");
            self.emit_node(object);
            self.write(")");
        } else {
            self.emit_expr_inner(object);
        }
    }

    fn emit_expression_statement(&mut self, expr: &JsNode) {
        if let JsNode::Raw(code) = expr {
            self.write(code);
            self.write(";");
            return;
        }
        if needs_guard_parens(leftmost(expr)) {
            self.write("(");
            self.emit_node(expr);
            self.write(");");
        } else {
            self.emit_node(expr);
            self.write(";");
        }
    }

    fn emit_switch(&mut self, discriminant: &JsNode, cases: &[JsSwitchCase]) {
        self.write("switch (");
        self.emit_node(discriminant);
        self.write(") {");
        self.write_line();
        for case in cases {
            self.write_indent();
            match &case.test {
                Some(test) => {
                    self.write("case ");
                    self.emit_node(test);
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.write_line();
            self.increase_indent();
            self.emit_statement_list(&case.consequent);
            self.decrease_indent();
        }
        self.write_indent();
        self.write("}");
    }

    fn emit_class(&mut self, class: &JsClass) {
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(name);
        }
        if let Some(superclass) = &class.superclass {
            self.write(" extends ");
            self.emit_callee(superclass, false);
        }
        self.write(" ");
        if class.members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        let rendered: Vec<String> = class
            .members
            .iter()
            .map(|member| self.render_nested(|printer| printer.emit_class_member(member)))
            .collect();
        self.write_separated(&rendered, "");
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_class_member(&mut self, member: &JsClassMember) {
        match member {
            JsClassMember::Method {
                kind,
                key,
                is_static,
                params,
                body,
                generator,
            } => {
                if *is_static {
                    self.write("static ");
                }
                if *generator {
                    self.write("*");
                }
                match kind {
                    JsMethodKind::Constructor => self.write("constructor"),
                    JsMethodKind::Method => self.emit_property_key(key),
                }
                self.write("(");
                self.emit_comma_separated(params);
                self.write(") ");
                self.emit_block_body(body);
            }
            JsClassMember::Field {
                key,
                is_static,
                value,
            } => {
                if *is_static {
                    self.write("static ");
                }
                self.emit_property_key(key);
                self.write(" = ");
                self.emit_expr(value, PREC_ASSIGN);
                self.write(";");
            }
        }
    }

    fn emit_comment(&mut self, text: &str) {
        if text.contains('\n') {
            self.write("/*");
            self.write_reindented(text);
            self.write("*/");
        } else {
            self.write("/* ");
            self.write(text.trim());
            self.write(" */");
        }
    }
}

#[cfg(test)]
#[path = "../tests/ir_printer.rs"]
mod tests;

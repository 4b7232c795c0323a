//! Helper methods for the IR printer.
//!
//! Contains low-level writing, indentation, blank-line separation of
//! statement lists, multiline object formatting and string quoting.

use super::*;

impl IrPrinter {
    pub(super) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(super) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(super) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_unit);
        }
    }

    pub(super) fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(super) fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Render into a scratch printer at the current indentation level.
    ///
    /// The result has no leading indentation; continuation lines carry their
    /// own.
    pub(super) fn render_nested(&self, emit: impl FnOnce(&mut Self)) -> String {
        let mut nested = Self {
            options: self.options.clone(),
            indent_unit: self.indent_unit.clone(),
            output: String::new(),
            indent_level: self.indent_level,
        };
        emit(&mut nested);
        nested.output
    }

    /// Write pre-rendered items one per line, with a blank line between two
    /// items when either spans several lines.
    pub(super) fn write_separated(&mut self, items: &[String], separator: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
                self.write_line();
                if items[i - 1].contains('\n') || item.contains('\n') {
                    self.write_line();
                }
            }
            self.write_indent();
            self.write(item);
        }
        if !items.is_empty() {
            self.write_line();
        }
    }

    pub(super) fn emit_statement_list(&mut self, statements: &[JsNode]) {
        let rendered: Vec<String> = statements
            .iter()
            .map(|statement| self.render_nested(|printer| printer.emit_node(statement)))
            .collect();
        self.write_separated(&rendered, "");
    }

    /// `{}` when empty, otherwise one statement per line.
    pub(super) fn emit_block_body(&mut self, statements: &[JsNode]) {
        if statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statement_list(statements);
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    pub(super) fn emit_comma_separated(&mut self, nodes: &[JsNode]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(node, PREC_ASSIGN);
        }
    }

    pub(super) fn emit_object_multiline(&mut self, properties: &[JsProperty]) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        let rendered: Vec<String> = properties
            .iter()
            .map(|prop| self.render_nested(|printer| printer.emit_property(prop)))
            .collect();
        self.write_separated(&rendered, ",");
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    pub(super) fn emit_property(&mut self, prop: &JsProperty) {
        if prop.shorthand {
            self.emit_node(&prop.value);
            return;
        }
        self.emit_property_key(&prop.key);
        self.write(": ");
        self.emit_expr(&prop.value, PREC_ASSIGN);
    }

    pub(super) fn emit_property_key(&mut self, key: &JsPropertyKey) {
        match key {
            JsPropertyKey::Identifier(name) | JsPropertyKey::NumericLiteral(name) => {
                self.write(name);
            }
            JsPropertyKey::StringLiteral(body) => self.emit_string(body),
            JsPropertyKey::Computed(expr) => {
                self.write("[");
                self.emit_expr(expr, PREC_ASSIGN);
                self.write("]");
            }
        }
    }

    /// Quote a string body in the configured style.
    ///
    /// Escape pairs are copied through untouched; bare occurrences of the
    /// quote character are escaped.
    pub(super) fn emit_string(&mut self, body: &str) {
        let quote = self.options.quote.as_char();
        self.output.push(quote);
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    self.output.push('\\');
                    if let Some(escaped) = chars.next() {
                        self.output.push(escaped);
                    }
                }
                '\n' => self.output.push_str("\\n"),
                c if c == quote => {
                    self.output.push('\\');
                    self.output.push(c);
                }
                c => self.output.push(c),
            }
        }
        self.output.push(quote);
    }

    /// Write verbatim multi-line code, shifting continuation lines to the
    /// current indentation.
    pub(super) fn write_reindented(&mut self, code: &str) {
        for (i, line) in code.split('\n').enumerate() {
            if i > 0 {
                self.write_line();
                if !line.is_empty() {
                    self.write_indent();
                }
            }
            self.write(line);
        }
    }
}

//! Source printer for lossless trees
//!
//! Printing emits every space and token in source order, so an unmodified tree
//! reprints byte-for-byte. [`print_until`] stops just before a target node's
//! first token, which lets callers measure the column at which that node
//! starts.

use crate::tree::*;

/// Print a tree back to source text
pub fn print(node: &Node) -> String {
    let mut printer = Printer::new(None);
    printer.node(node);
    printer.out
}

/// Print `root` up to the first token of `target`, including `target`'s prefix.
///
/// Returns `None` when `target` (compared by instance) is not part of `root`.
pub fn print_until(root: &Node, target: &Node) -> Option<String> {
    let mut printer = Printer::new(Some(target));
    printer.node(root);
    printer.found.then_some(printer.out)
}

struct Printer<'t> {
    out: String,
    target: Option<&'t Node>,
    found: bool,
}

impl<'t> Printer<'t> {
    fn new(target: Option<&'t Node>) -> Self {
        Self {
            out: String::new(),
            target,
            found: false,
        }
    }

    fn token(&mut self, text: &str) {
        if !self.found {
            self.out.push_str(text);
        }
    }

    fn space(&mut self, space: &Space) {
        if !self.found {
            space.print_to(&mut self.out);
        }
    }

    fn node(&mut self, node: &Node) {
        if self.found {
            return;
        }
        node.prefix().print_to(&mut self.out);
        if self.target.is_some_and(|target| Node::same(target, node)) {
            self.found = true;
            return;
        }
        self.kind(node.kind());
    }

    fn nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn optional(&mut self, node: Option<&Node>) {
        if let Some(node) = node {
            self.node(node);
        }
    }

    /// Element, trailing space, then `suffix`
    fn right_padded(&mut self, padded: &RightPadded<Node>, suffix: &str) {
        self.node(&padded.element);
        self.space(&padded.after);
        self.token(suffix);
    }

    /// Statement followed by `;` when its kind needs one
    fn statement(&mut self, padded: &RightPadded<Node>) {
        let terminator = if padded.element.kind().requires_semicolon() {
            ";"
        } else {
            ""
        };
        self.right_padded(padded, terminator);
    }

    fn left_padded(&mut self, padded: &LeftPadded<Node>, keyword: &str) {
        self.space(&padded.before);
        self.token(keyword);
        self.node(&padded.element);
    }

    fn delimited(
        &mut self,
        elements: &[RightPadded<Node>],
        separator: &str,
        close: &str,
    ) {
        for (index, padded) in elements.iter().enumerate() {
            let suffix = if index + 1 == elements.len() {
                close
            } else {
                separator
            };
            self.right_padded(padded, suffix);
        }
        if elements.is_empty() {
            self.token(close);
        }
    }

    fn container(&mut self, container: &Container<Node>, open: &str, separator: &str, close: &str) {
        self.space(&container.before);
        self.token(open);
        self.delimited(&container.elements, separator, close);
    }

    fn kind(&mut self, kind: &Kind) {
        match kind {
            Kind::CompilationUnit(unit) => {
                if let Some(package) = &unit.package {
                    self.right_padded(package, ";");
                }
                for import in &unit.imports {
                    self.right_padded(import, ";");
                }
                self.nodes(&unit.types);
                self.space(&unit.eof);
            }
            Kind::Package(package) => {
                self.token("package");
                self.node(&package.name);
            }
            Kind::Import(import) => {
                self.token("import");
                if import.is_static.element {
                    self.space(&import.is_static.before);
                    self.token("static");
                }
                self.node(&import.qualid);
            }
            Kind::ClassDecl(class) => {
                self.nodes(&class.leading_annotations);
                self.nodes(&class.modifiers);
                self.space(&class.kind.before);
                self.token(class.kind.element.keyword());
                self.node(&class.name);
                if let Some(type_parameters) = &class.type_parameters {
                    self.container(type_parameters, "<", ",", ">");
                }
                if let Some(extends) = &class.extends {
                    self.left_padded(extends, "extends");
                }
                if let Some(implements) = &class.implements {
                    self.container(implements, "implements", ",", "");
                }
                self.node(&class.body);
            }
            Kind::MethodDecl(method) => {
                self.nodes(&method.leading_annotations);
                self.nodes(&method.modifiers);
                if let Some(type_parameters) = &method.type_parameters {
                    self.container(type_parameters, "<", ",", ">");
                }
                self.optional(method.return_type.as_ref());
                self.node(&method.name);
                self.container(&method.parameters, "(", ",", ")");
                if let Some(throws) = &method.throws {
                    self.container(throws, "throws", ",", "");
                }
                match &method.body {
                    Some(body) => self.node(body),
                    None => self.token(";"),
                }
            }
            Kind::Modifier(modifier) => self.token(&modifier.keyword),
            Kind::Annotation(annotation) => {
                self.token("@");
                self.node(&annotation.name);
                if let Some(arguments) = &annotation.arguments {
                    self.container(arguments, "(", ",", ")");
                }
            }
            Kind::Block(block) => {
                self.token("{");
                for statement in &block.statements {
                    self.statement(statement);
                }
                self.space(&block.end);
                self.token("}");
            }
            Kind::If(branch) => {
                self.token("if");
                self.node(&branch.condition);
                self.statement(&branch.then_part);
                self.optional(branch.else_part.as_ref());
            }
            Kind::Else(branch) => {
                self.token("else");
                self.statement(&branch.body);
            }
            Kind::ForLoop(repeat) => {
                self.token("for");
                self.node(&repeat.control);
                self.statement(&repeat.body);
            }
            Kind::ForControl(control) => {
                self.token("(");
                self.right_padded(&control.init, ";");
                self.right_padded(&control.condition, ";");
                self.delimited(&control.update, ",", ")");
            }
            Kind::ForEachLoop(repeat) => {
                self.token("for");
                self.node(&repeat.control);
                self.statement(&repeat.body);
            }
            Kind::ForEachControl(control) => {
                self.token("(");
                self.right_padded(&control.variable, ":");
                self.right_padded(&control.iterable, ")");
            }
            Kind::WhileLoop(repeat) => {
                self.token("while");
                self.node(&repeat.condition);
                self.statement(&repeat.body);
            }
            Kind::DoWhileLoop(repeat) => {
                self.token("do");
                self.statement(&repeat.body);
                self.left_padded(&repeat.condition, "while");
            }
            Kind::Switch(switch) => {
                self.token("switch");
                self.node(&switch.selector);
                self.node(&switch.cases);
            }
            Kind::Case(case) => {
                match &case.pattern {
                    Some(pattern) => {
                        self.token("case");
                        self.node(pattern);
                    }
                    None => self.token("default"),
                }
                self.space(&case.statements.before);
                self.token(":");
                for statement in &case.statements.elements {
                    self.statement(statement);
                }
            }
            Kind::Label(label) => {
                self.right_padded(&label.label, ":");
                self.node(&label.statement);
            }
            Kind::Return(statement) => {
                self.token("return");
                self.optional(statement.expression.as_ref());
            }
            Kind::Break(statement) => {
                self.token("break");
                self.optional(statement.label.as_ref());
            }
            Kind::Continue(statement) => {
                self.token("continue");
                self.optional(statement.label.as_ref());
            }
            Kind::Throw(statement) => {
                self.token("throw");
                self.node(&statement.exception);
            }
            Kind::VariableDecls(decls) => {
                self.nodes(&decls.leading_annotations);
                self.nodes(&decls.modifiers);
                self.optional(decls.type_expression.as_ref());
                self.delimited(&decls.variables, ",", "");
            }
            Kind::NamedVariable(variable) => {
                self.node(&variable.name);
                if let Some(initializer) = &variable.initializer {
                    self.left_padded(initializer, "=");
                }
            }
            Kind::MethodInvocation(call) => {
                if let Some(select) = &call.select {
                    self.right_padded(select, ".");
                }
                self.node(&call.name);
                self.container(&call.arguments, "(", ",", ")");
            }
            Kind::NewClass(new) => {
                self.token("new");
                self.optional(new.clazz.as_ref());
                self.container(&new.arguments, "(", ",", ")");
                self.optional(new.body.as_ref());
            }
            Kind::FieldAccess(access) => {
                self.node(&access.target);
                self.left_padded(&access.name, ".");
            }
            Kind::Identifier(identifier) => self.token(&identifier.simple_name),
            Kind::Literal(literal) => self.token(&literal.value_source),
            Kind::Binary(binary) => {
                self.node(&binary.left);
                self.space(&binary.operator.before);
                self.token(binary.operator.element.symbol());
                self.node(&binary.right);
            }
            Kind::Unary(unary) => {
                let operator = unary.operator.element;
                if operator.is_postfix() {
                    self.node(&unary.expression);
                    self.space(&unary.operator.before);
                    self.token(operator.symbol());
                } else {
                    self.space(&unary.operator.before);
                    self.token(operator.symbol());
                    self.node(&unary.expression);
                }
            }
            Kind::Assignment(assignment) => {
                self.node(&assignment.variable);
                self.left_padded(&assignment.value, "=");
            }
            Kind::Parentheses(parentheses) => {
                self.token("(");
                self.right_padded(&parentheses.tree, ")");
            }
            Kind::ArrayAccess(access) => {
                self.node(&access.indexed);
                self.node(&access.dimension);
            }
            Kind::ArrayDimension(dimension) => {
                self.token("[");
                self.right_padded(&dimension.index, "]");
            }
            Kind::EnumValueSet(set) => {
                let close = if set.terminated_with_semicolon { ";" } else { "" };
                self.delimited(&set.enums, ",", close);
            }
            Kind::EnumValue(value) => {
                self.node(&value.name);
                if let Some(arguments) = &value.arguments {
                    self.container(arguments, "(", ",", ")");
                }
            }
            Kind::TypeParameter(parameter) => {
                self.node(&parameter.name);
                if let Some(bounds) = &parameter.bounds {
                    self.container(bounds, "extends", "&", "");
                }
            }
            Kind::Empty => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build::*;

    fn call(prefix: &str, name: &str, arguments: Vec<RightPadded<Node>>) -> Node {
        method_invocation(prefix, None, ident("", name), container("", arguments))
    }

    #[test]
    fn test_print_method_with_body() {
        let body = block(
            " ",
            vec![
                padded(call("\n    ", "foo", vec![padded_after(ident("", "a"), " "), padded(ident(" ", "b"))])),
                padded(return_statement("\n    ", Some(literal(" ", "1")))),
            ],
            "\n",
        );
        let method = method_decl(
            "",
            vec![modifier("", "public")],
            Some(ident(" ", "int")),
            ident(" ", "run"),
            container("", Vec::new()),
            Some(body),
        );
        assert_eq!(
            print(&method),
            "public int run() {\n    foo(a , b);\n    return 1;\n}"
        );
    }

    #[test]
    fn test_print_control_flow() {
        let control = for_control(
            " ",
            padded(variable_decls(
                "",
                Some(ident("", "int")),
                vec![padded(named_variable(" ", ident("", "i"), Some(left(" ", literal(" ", "0")))))],
            )),
            padded(binary(" ", ident("", "i"), left(" ", BinaryOperator::LessThan), ident(" ", "n"))),
            vec![padded(unary(" ", left("", UnaryOperator::PostIncrement), ident("", "i")))],
        );
        let repeat = for_loop("", control, padded(block(" ", Vec::new(), "")));
        assert_eq!(print(&repeat), "for (int i = 0; i < n; i++) {}");

        let branch = if_statement(
            "",
            parentheses(" ", padded(ident("", "x"))),
            padded(return_statement(" ", None)),
            Some(else_clause(" ", padded(block(" ", Vec::new(), "")))),
        );
        assert_eq!(print(&branch), "if (x) return; else {}");
    }

    #[test]
    fn test_print_switch_and_comments() {
        let cases = block(
            " ",
            vec![
                padded(case(
                    "\n  ",
                    Some(literal(" ", "1")),
                    container("", vec![padded(node("\n    ", Kind::Break(Break { label: None })))]),
                )),
                padded(case("\n  ", None, container("", Vec::new()))),
            ],
            "\n",
        );
        let statement = switch(" // pick\n", parentheses(" ", padded(ident("", "k"))), cases);
        assert_eq!(
            print(&statement),
            " // pick\nswitch (k) {\n  case 1:\n    break;\n  default:\n}"
        );
    }

    #[test]
    fn test_print_until_includes_target_prefix() {
        let target = ident("\n        ", "b");
        let invocation = call("", "foo", vec![padded(ident("", "a")), padded(target.clone())]);
        assert_eq!(
            print_until(&invocation, &target),
            Some("foo(a,\n        ".to_string())
        );
    }

    #[test]
    fn test_print_until_missing_target() {
        let invocation = call("", "foo", Vec::new());
        let stranger = ident("", "a");
        assert_eq!(print_until(&invocation, &stranger), None);
    }

    #[test]
    fn test_print_until_ignores_equal_but_distinct_nodes() {
        let first = ident("", "a");
        let twin = ident("", "a");
        let invocation = call("", "foo", vec![padded(first), padded(ident(" ", "b"))]);
        assert_eq!(print_until(&invocation, &twin), None);
    }
}

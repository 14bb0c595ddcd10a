//! Builder API for constructing trees
//!
//! Every builder takes the node's prefix as raw source text, which is split
//! into whitespace and comments with [`Space::format`]. Kinds without a
//! dedicated builder are constructed with [`node`] and a struct literal.
//!
//! ```rust,ignore
//! use weave_core::tree::build::*;
//!
//! // `{\n    return x;\n}`
//! let body = block(" ", vec![padded(return_statement("\n    ", Some(ident(" ", "x"))))], "\n");
//! ```

use super::*;

/// Node of any kind with a prefix
pub fn node(prefix: &str, kind: Kind) -> Node {
    Node::new(Space::format(prefix), kind)
}

pub fn ident(prefix: &str, name: &str) -> Node {
    node(
        prefix,
        Kind::Identifier(Identifier {
            simple_name: name.to_string(),
        }),
    )
}

pub fn literal(prefix: &str, value_source: &str) -> Node {
    node(
        prefix,
        Kind::Literal(Literal {
            value_source: value_source.to_string(),
        }),
    )
}

/// Placeholder for an omitted element, such as a missing loop clause
pub fn empty(prefix: &str) -> Node {
    node(prefix, Kind::Empty)
}

pub fn modifier(prefix: &str, keyword: &str) -> Node {
    node(
        prefix,
        Kind::Modifier(Modifier {
            keyword: keyword.to_string(),
        }),
    )
}

/// Right-padded element with no trailing whitespace
pub fn padded(element: Node) -> RightPadded<Node> {
    RightPadded::bare(element)
}

pub fn padded_after(element: Node, after: &str) -> RightPadded<Node> {
    RightPadded::new(element, Space::format(after))
}

pub fn left<T>(before: &str, element: T) -> LeftPadded<T> {
    LeftPadded::new(Space::format(before), element)
}

pub fn container(before: &str, elements: Vec<RightPadded<Node>>) -> Container<Node> {
    Container::new(Space::format(before), elements)
}

pub fn compilation_unit(
    package: Option<RightPadded<Node>>,
    imports: Vec<RightPadded<Node>>,
    types: Vec<Node>,
    eof: &str,
) -> Node {
    node(
        "",
        Kind::CompilationUnit(CompilationUnit {
            package,
            imports,
            types,
            eof: Space::format(eof),
        }),
    )
}

pub fn package(prefix: &str, name: Node) -> Node {
    node(prefix, Kind::Package(Package { name }))
}

pub fn import(prefix: &str, qualid: Node) -> Node {
    node(
        prefix,
        Kind::Import(Import {
            is_static: left("", false),
            qualid,
        }),
    )
}

pub fn class_decl(
    prefix: &str,
    modifiers: Vec<Node>,
    kind: LeftPadded<ClassKind>,
    name: Node,
    body: Node,
) -> Node {
    node(
        prefix,
        Kind::ClassDecl(ClassDecl {
            leading_annotations: Vec::new(),
            modifiers,
            kind,
            name,
            type_parameters: None,
            extends: None,
            implements: None,
            body,
        }),
    )
}

pub fn method_decl(
    prefix: &str,
    modifiers: Vec<Node>,
    return_type: Option<Node>,
    name: Node,
    parameters: Container<Node>,
    body: Option<Node>,
) -> Node {
    node(
        prefix,
        Kind::MethodDecl(MethodDecl {
            leading_annotations: Vec::new(),
            modifiers,
            type_parameters: None,
            return_type,
            name,
            parameters,
            throws: None,
            body,
        }),
    )
}

pub fn annotation(prefix: &str, name: Node, arguments: Option<Container<Node>>) -> Node {
    node(prefix, Kind::Annotation(Annotation { name, arguments }))
}

pub fn block(prefix: &str, statements: Vec<RightPadded<Node>>, end: &str) -> Node {
    node(
        prefix,
        Kind::Block(Block {
            statements,
            end: Space::format(end),
        }),
    )
}

pub fn if_statement(
    prefix: &str,
    condition: Node,
    then_part: RightPadded<Node>,
    else_part: Option<Node>,
) -> Node {
    node(
        prefix,
        Kind::If(If {
            condition,
            then_part,
            else_part,
        }),
    )
}

pub fn else_clause(prefix: &str, body: RightPadded<Node>) -> Node {
    node(prefix, Kind::Else(Else { body }))
}

pub fn for_loop(prefix: &str, control: Node, body: RightPadded<Node>) -> Node {
    node(prefix, Kind::ForLoop(ForLoop { control, body }))
}

pub fn for_control(
    prefix: &str,
    init: RightPadded<Node>,
    condition: RightPadded<Node>,
    update: Vec<RightPadded<Node>>,
) -> Node {
    node(
        prefix,
        Kind::ForControl(ForControl {
            init,
            condition,
            update,
        }),
    )
}

pub fn for_each_loop(prefix: &str, control: Node, body: RightPadded<Node>) -> Node {
    node(prefix, Kind::ForEachLoop(ForEachLoop { control, body }))
}

pub fn for_each_control(
    prefix: &str,
    variable: RightPadded<Node>,
    iterable: RightPadded<Node>,
) -> Node {
    node(
        prefix,
        Kind::ForEachControl(ForEachControl { variable, iterable }),
    )
}

pub fn while_loop(prefix: &str, condition: Node, body: RightPadded<Node>) -> Node {
    node(prefix, Kind::WhileLoop(WhileLoop { condition, body }))
}

pub fn do_while_loop(prefix: &str, body: RightPadded<Node>, condition: LeftPadded<Node>) -> Node {
    node(prefix, Kind::DoWhileLoop(DoWhileLoop { body, condition }))
}

pub fn switch(prefix: &str, selector: Node, cases: Node) -> Node {
    node(prefix, Kind::Switch(Switch { selector, cases }))
}

pub fn case(prefix: &str, pattern: Option<Node>, statements: Container<Node>) -> Node {
    node(prefix, Kind::Case(Case { pattern, statements }))
}

pub fn label(prefix: &str, label: RightPadded<Node>, statement: Node) -> Node {
    node(prefix, Kind::Label(Label { label, statement }))
}

pub fn return_statement(prefix: &str, expression: Option<Node>) -> Node {
    node(prefix, Kind::Return(Return { expression }))
}

pub fn throw_statement(prefix: &str, exception: Node) -> Node {
    node(prefix, Kind::Throw(Throw { exception }))
}

pub fn variable_decls(
    prefix: &str,
    type_expression: Option<Node>,
    variables: Vec<RightPadded<Node>>,
) -> Node {
    node(
        prefix,
        Kind::VariableDecls(VariableDecls {
            leading_annotations: Vec::new(),
            modifiers: Vec::new(),
            type_expression,
            variables,
        }),
    )
}

pub fn named_variable(prefix: &str, name: Node, initializer: Option<LeftPadded<Node>>) -> Node {
    node(prefix, Kind::NamedVariable(NamedVariable { name, initializer }))
}

pub fn method_invocation(
    prefix: &str,
    select: Option<RightPadded<Node>>,
    name: Node,
    arguments: Container<Node>,
) -> Node {
    node(
        prefix,
        Kind::MethodInvocation(MethodInvocation {
            select,
            name,
            arguments,
        }),
    )
}

pub fn new_class(prefix: &str, clazz: Option<Node>, arguments: Container<Node>) -> Node {
    node(
        prefix,
        Kind::NewClass(NewClass {
            clazz,
            arguments,
            body: None,
        }),
    )
}

pub fn field_access(prefix: &str, target: Node, name: LeftPadded<Node>) -> Node {
    node(prefix, Kind::FieldAccess(FieldAccess { target, name }))
}

pub fn binary(prefix: &str, left: Node, operator: LeftPadded<BinaryOperator>, right: Node) -> Node {
    node(
        prefix,
        Kind::Binary(Binary {
            left,
            operator,
            right,
        }),
    )
}

pub fn unary(prefix: &str, operator: LeftPadded<UnaryOperator>, expression: Node) -> Node {
    node(
        prefix,
        Kind::Unary(Unary {
            operator,
            expression,
        }),
    )
}

pub fn assignment(prefix: &str, variable: Node, value: LeftPadded<Node>) -> Node {
    node(prefix, Kind::Assignment(Assignment { variable, value }))
}

pub fn parentheses(prefix: &str, tree: RightPadded<Node>) -> Node {
    node(prefix, Kind::Parentheses(Parentheses { tree }))
}

pub fn array_access(prefix: &str, indexed: Node, dimension: Node) -> Node {
    node(
        prefix,
        Kind::ArrayAccess(ArrayAccess { indexed, dimension }),
    )
}

pub fn array_dimension(prefix: &str, index: RightPadded<Node>) -> Node {
    node(prefix, Kind::ArrayDimension(ArrayDimension { index }))
}

pub fn type_parameter(prefix: &str, name: Node, bounds: Option<Container<Node>>) -> Node {
    node(prefix, Kind::TypeParameter(TypeParameter { name, bounds }))
}

//! Immutable tree nodes
//!
//! A [`Node`] is a cheap, reference-counted handle over a [`Kind`] plus the
//! node's leading whitespace and markers. Trees are never mutated in place;
//! every edit produces a new node that shares unchanged children with the old
//! one. Two handles are the *same* node when they point at the same
//! allocation, which is how rewrites report "nothing changed".

use std::fmt;
use std::sync::Arc;

use super::{Container, LeftPadded, Markers, RightPadded, Space};

/// Shared handle to an immutable tree node
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

#[derive(Debug, PartialEq)]
struct NodeData {
    prefix: Space,
    markers: Markers,
    kind: Kind,
}

impl Node {
    pub fn new(prefix: Space, kind: Kind) -> Self {
        Self::with_markers(prefix, Markers::EMPTY, kind)
    }

    pub fn with_markers(prefix: Space, markers: Markers, kind: Kind) -> Self {
        Self(Arc::new(NodeData {
            prefix,
            markers,
            kind,
        }))
    }

    /// Whitespace and comments before the node's first token
    pub fn prefix(&self) -> &Space {
        &self.0.prefix
    }

    pub fn markers(&self) -> &Markers {
        &self.0.markers
    }

    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    pub fn with_prefix(&self, prefix: Space) -> Self {
        self.rebuild(prefix, self.0.kind.clone())
    }

    pub fn with_kind(&self, kind: Kind) -> Self {
        self.rebuild(self.0.prefix.clone(), kind)
    }

    /// New node with the given prefix and kind, keeping this node's markers
    pub fn rebuild(&self, prefix: Space, kind: Kind) -> Self {
        Self::with_markers(prefix, self.0.markers.clone(), kind)
    }

    /// Whether both handles point at the same node instance
    pub fn same(a: &Node, b: &Node) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Node::same(self, other) || self.0 == other.0
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.0.kind.name())
            .field("prefix", &self.0.prefix.to_string())
            .field("kind", &self.0.kind)
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::print(self))
    }
}

/// The closed set of syntax kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    CompilationUnit(CompilationUnit),
    Package(Package),
    Import(Import),
    ClassDecl(ClassDecl),
    MethodDecl(MethodDecl),
    Modifier(Modifier),
    Annotation(Annotation),
    Block(Block),
    If(If),
    Else(Else),
    ForLoop(ForLoop),
    ForControl(ForControl),
    ForEachLoop(ForEachLoop),
    ForEachControl(ForEachControl),
    WhileLoop(WhileLoop),
    DoWhileLoop(DoWhileLoop),
    Switch(Switch),
    Case(Case),
    Label(Label),
    Return(Return),
    Break(Break),
    Continue(Continue),
    Throw(Throw),
    VariableDecls(VariableDecls),
    NamedVariable(NamedVariable),
    MethodInvocation(MethodInvocation),
    NewClass(NewClass),
    FieldAccess(FieldAccess),
    Identifier(Identifier),
    Literal(Literal),
    Binary(Binary),
    Unary(Unary),
    Assignment(Assignment),
    Parentheses(Parentheses),
    ArrayAccess(ArrayAccess),
    ArrayDimension(ArrayDimension),
    EnumValueSet(EnumValueSet),
    EnumValue(EnumValue),
    TypeParameter(TypeParameter),
    Empty,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::CompilationUnit(_) => "CompilationUnit",
            Kind::Package(_) => "Package",
            Kind::Import(_) => "Import",
            Kind::ClassDecl(_) => "ClassDecl",
            Kind::MethodDecl(_) => "MethodDecl",
            Kind::Modifier(_) => "Modifier",
            Kind::Annotation(_) => "Annotation",
            Kind::Block(_) => "Block",
            Kind::If(_) => "If",
            Kind::Else(_) => "Else",
            Kind::ForLoop(_) => "ForLoop",
            Kind::ForControl(_) => "ForControl",
            Kind::ForEachLoop(_) => "ForEachLoop",
            Kind::ForEachControl(_) => "ForEachControl",
            Kind::WhileLoop(_) => "WhileLoop",
            Kind::DoWhileLoop(_) => "DoWhileLoop",
            Kind::Switch(_) => "Switch",
            Kind::Case(_) => "Case",
            Kind::Label(_) => "Label",
            Kind::Return(_) => "Return",
            Kind::Break(_) => "Break",
            Kind::Continue(_) => "Continue",
            Kind::Throw(_) => "Throw",
            Kind::VariableDecls(_) => "VariableDecls",
            Kind::NamedVariable(_) => "NamedVariable",
            Kind::MethodInvocation(_) => "MethodInvocation",
            Kind::NewClass(_) => "NewClass",
            Kind::FieldAccess(_) => "FieldAccess",
            Kind::Identifier(_) => "Identifier",
            Kind::Literal(_) => "Literal",
            Kind::Binary(_) => "Binary",
            Kind::Unary(_) => "Unary",
            Kind::Assignment(_) => "Assignment",
            Kind::Parentheses(_) => "Parentheses",
            Kind::ArrayAccess(_) => "ArrayAccess",
            Kind::ArrayDimension(_) => "ArrayDimension",
            Kind::EnumValueSet(_) => "EnumValueSet",
            Kind::EnumValue(_) => "EnumValue",
            Kind::TypeParameter(_) => "TypeParameter",
            Kind::Empty => "Empty",
        }
    }

    /// Whether a statement of this kind is terminated by `;` when it appears
    /// in a statement list or as a loop/branch body
    pub fn requires_semicolon(&self) -> bool {
        match self {
            Kind::Block(_)
            | Kind::If(_)
            | Kind::Else(_)
            | Kind::ForLoop(_)
            | Kind::ForEachLoop(_)
            | Kind::WhileLoop(_)
            | Kind::Switch(_)
            | Kind::Case(_)
            | Kind::ClassDecl(_)
            | Kind::MethodDecl(_)
            | Kind::EnumValueSet(_)
            | Kind::CompilationUnit(_)
            | Kind::Package(_)
            | Kind::Import(_)
            | Kind::ForControl(_)
            | Kind::ForEachControl(_)
            | Kind::Annotation(_)
            | Kind::Modifier(_)
            | Kind::TypeParameter(_)
            | Kind::ArrayDimension(_)
            | Kind::NamedVariable(_)
            | Kind::EnumValue(_) => false,
            Kind::Label(label) => label.statement.kind().requires_semicolon(),
            Kind::Return(_)
            | Kind::Break(_)
            | Kind::Continue(_)
            | Kind::Throw(_)
            | Kind::VariableDecls(_)
            | Kind::DoWhileLoop(_)
            | Kind::MethodInvocation(_)
            | Kind::NewClass(_)
            | Kind::FieldAccess(_)
            | Kind::Identifier(_)
            | Kind::Literal(_)
            | Kind::Binary(_)
            | Kind::Unary(_)
            | Kind::Assignment(_)
            | Kind::Parentheses(_)
            | Kind::ArrayAccess(_)
            | Kind::Empty => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub package: Option<RightPadded<Node>>,
    pub imports: Vec<RightPadded<Node>>,
    pub types: Vec<Node>,
    /// Whitespace before the end of the file
    pub eof: Space,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// `static` keyword and the space before it; the space is only printed
    /// for static imports
    pub is_static: LeftPadded<bool>,
    pub qualid: Node,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Record => "record",
            ClassKind::Annotation => "@interface",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub leading_annotations: Vec<Node>,
    pub modifiers: Vec<Node>,
    pub kind: LeftPadded<ClassKind>,
    pub name: Node,
    pub type_parameters: Option<Container<Node>>,
    pub extends: Option<LeftPadded<Node>>,
    pub implements: Option<Container<Node>>,
    pub body: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub leading_annotations: Vec<Node>,
    pub modifiers: Vec<Node>,
    pub type_parameters: Option<Container<Node>>,
    /// Absent for constructors
    pub return_type: Option<Node>,
    pub name: Node,
    pub parameters: Container<Node>,
    pub throws: Option<Container<Node>>,
    /// Absent for abstract methods, which print `;` instead
    pub body: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: Node,
    pub arguments: Option<Container<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<RightPadded<Node>>,
    /// Whitespace before the closing brace
    pub end: Space,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Node,
    pub then_part: RightPadded<Node>,
    pub else_part: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Else {
    pub body: RightPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub control: Node,
    pub body: RightPadded<Node>,
}

/// `(init; condition; update, ...)`; omitted clauses are [`Kind::Empty`]
#[derive(Debug, Clone, PartialEq)]
pub struct ForControl {
    pub init: RightPadded<Node>,
    pub condition: RightPadded<Node>,
    pub update: Vec<RightPadded<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForEachLoop {
    pub control: Node,
    pub body: RightPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForEachControl {
    pub variable: RightPadded<Node>,
    pub iterable: RightPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Node,
    pub body: RightPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileLoop {
    pub body: RightPadded<Node>,
    /// `while` keyword and the parenthesized condition
    pub condition: LeftPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub selector: Node,
    /// A block whose statements are [`Kind::Case`] nodes
    pub cases: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// Absent for `default`
    pub pattern: Option<Node>,
    /// Statements after the colon; the container's space precedes the colon
    pub statements: Container<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub label: RightPadded<Node>,
    pub statement: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub expression: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    pub label: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Continue {
    pub label: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    pub exception: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecls {
    pub leading_annotations: Vec<Node>,
    pub modifiers: Vec<Node>,
    pub type_expression: Option<Node>,
    pub variables: Vec<RightPadded<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedVariable {
    pub name: Node,
    pub initializer: Option<LeftPadded<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocation {
    /// Receiver and the space before the `.`
    pub select: Option<RightPadded<Node>>,
    pub name: Node,
    pub arguments: Container<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewClass {
    pub clazz: Option<Node>,
    pub arguments: Container<Node>,
    /// Anonymous class body
    pub body: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    pub target: Node,
    pub name: LeftPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub simple_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Source text of the literal, quotes included
    pub value_source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    And,
    Or,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Node,
    pub operator: LeftPadded<BinaryOperator>,
    pub right: Node,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Positive,
    Negative,
    Complement,
    Not,
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => "++",
            UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => "--",
            UnaryOperator::Positive => "+",
            UnaryOperator::Negative => "-",
            UnaryOperator::Complement => "~",
            UnaryOperator::Not => "!",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(
            self,
            UnaryOperator::PostIncrement | UnaryOperator::PostDecrement
        )
    }
}

/// Prefix operators print before the operand; postfix operators print after
/// it, with the operator's space between the two
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: LeftPadded<UnaryOperator>,
    pub expression: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub variable: Node,
    pub value: LeftPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parentheses {
    pub tree: RightPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub indexed: Node,
    pub dimension: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDimension {
    pub index: RightPadded<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueSet {
    pub enums: Vec<RightPadded<Node>>,
    pub terminated_with_semicolon: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: Node,
    pub arguments: Option<Container<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: Node,
    /// `extends` bounds joined by `&`
    pub bounds: Option<Container<Node>>,
}

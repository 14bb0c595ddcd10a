//! Rebuild-if-changed traversal contract
//!
//! A [`TreeVisitor`] walks a tree depth-first in print order, keeping a
//! [`Cursor`] of the path it is on. Every hook returns a [`VisitResult`]:
//! `None` means "unchanged" and lets the caller reuse the original value, so a
//! visitor that changes nothing hands back the input tree instance untouched
//! and only the spine above a real edit is rebuilt.
//!
//! Implementors override the hooks they care about and delegate to the
//! `walk_*` functions for the default descent.

use crate::cursor::{Cursor, CursorValue};
use crate::result::Result;
use crate::tree::*;

/// `Ok(None)` when the visited value is unchanged
pub type VisitResult<T> = Result<Option<T>>;

/// True when any of the given visit results carries a change
#[macro_export]
macro_rules! any_changed {
    ($($changed:expr),+ $(,)?) => {
        false $(|| $changed.is_some())+
    };
}

/// Hooks invoked for every structural position of a tree
pub trait TreeVisitor<'a> {
    fn cursor(&self) -> &Cursor<'a>;

    fn cursor_mut(&mut self) -> &mut Cursor<'a>;

    /// Enter `node`: push its frame, run [`TreeVisitor::pre_visit`] and
    /// [`TreeVisitor::visit_node`], then pop.
    fn visit(&mut self, node: &'a Node) -> VisitResult<Node> {
        with_frame(self, CursorValue::Node(node), |visitor| {
            visitor.pre_visit(node)?;
            visitor.visit_node(node)
        })
    }

    /// Called with the node's frame already pushed, before any child is visited
    fn pre_visit(&mut self, _node: &'a Node) -> Result<()> {
        Ok(())
    }

    fn visit_node(&mut self, node: &'a Node) -> VisitResult<Node> {
        walk_node(self, node)
    }

    fn visit_space(&mut self, _space: &Space, _location: SpaceLocation) -> VisitResult<Space> {
        Ok(None)
    }

    fn visit_right_padded(
        &mut self,
        padded: &'a RightPadded<Node>,
        location: RightPaddedLocation,
    ) -> VisitResult<RightPadded<Node>> {
        walk_right_padded(self, padded, location)
    }

    fn visit_left_padded(
        &mut self,
        padded: &'a LeftPadded<Node>,
        location: LeftPaddedLocation,
    ) -> VisitResult<LeftPadded<Node>> {
        walk_left_padded(self, padded, location)
    }

    fn visit_container(
        &mut self,
        container: &'a Container<Node>,
        location: ContainerLocation,
    ) -> VisitResult<Container<Node>> {
        walk_container(self, container, location)
    }
}

/// Run `f` with `value` pushed on the cursor. The frame is popped whether or
/// not `f` succeeds.
pub fn with_frame<'a, V, T>(
    visitor: &mut V,
    value: CursorValue<'a>,
    f: impl FnOnce(&mut V) -> Result<T>,
) -> Result<T>
where
    V: TreeVisitor<'a> + ?Sized,
{
    visitor.cursor_mut().push(value);
    let result = f(visitor);
    visitor.cursor_mut().pop();
    result
}

/// The changed value, or a clone of the original when nothing changed
pub fn or_original<T: Clone>(changed: Option<T>, original: &T) -> T {
    changed.unwrap_or_else(|| original.clone())
}

pub fn rebuild_right_padded(
    padded: &RightPadded<Node>,
    element: Option<Node>,
    after: Option<Space>,
) -> Option<RightPadded<Node>> {
    if !any_changed!(element, after) {
        return None;
    }
    Some(RightPadded::new(
        or_original(element, &padded.element),
        or_original(after, &padded.after),
    ))
}

/// Map `f` over `list`, allocating a new list only once an element changes
pub fn visit_list<'a, T: Clone>(
    list: &'a [T],
    mut f: impl FnMut(&'a T) -> VisitResult<T>,
) -> VisitResult<Vec<T>> {
    let mut changed: Option<Vec<T>> = None;
    for (index, item) in list.iter().enumerate() {
        match f(item)? {
            Some(updated) => changed
                .get_or_insert_with(|| list[..index].to_vec())
                .push(updated),
            None => {
                if let Some(changed) = changed.as_mut() {
                    changed.push(item.clone());
                }
            }
        }
    }
    Ok(changed)
}

/// Default descent into a node: its prefix, then its children in print order
pub fn walk_node<'a, V>(visitor: &mut V, node: &'a Node) -> VisitResult<Node>
where
    V: TreeVisitor<'a> + ?Sized,
{
    let prefix = visitor.visit_space(node.prefix(), SpaceLocation::Prefix)?;
    let kind = walk_kind(visitor, node.kind())?;
    if !any_changed!(prefix, kind) {
        return Ok(None);
    }
    Ok(Some(node.rebuild(
        or_original(prefix, node.prefix()),
        kind.unwrap_or_else(|| node.kind().clone()),
    )))
}

pub fn walk_right_padded<'a, V>(
    visitor: &mut V,
    padded: &'a RightPadded<Node>,
    location: RightPaddedLocation,
) -> VisitResult<RightPadded<Node>>
where
    V: TreeVisitor<'a> + ?Sized,
{
    with_frame(
        visitor,
        CursorValue::RightPadded { location, padded },
        |visitor| {
            let element = visitor.visit(&padded.element)?;
            let after = visitor.visit_space(&padded.after, SpaceLocation::After(location))?;
            Ok(rebuild_right_padded(padded, element, after))
        },
    )
}

pub fn walk_left_padded<'a, V>(
    visitor: &mut V,
    padded: &'a LeftPadded<Node>,
    location: LeftPaddedLocation,
) -> VisitResult<LeftPadded<Node>>
where
    V: TreeVisitor<'a> + ?Sized,
{
    with_frame(visitor, CursorValue::LeftPadded(location), |visitor| {
        let before = visitor.visit_space(&padded.before, SpaceLocation::Before(location))?;
        let element = visitor.visit(&padded.element)?;
        if !any_changed!(before, element) {
            return Ok(None);
        }
        Ok(Some(LeftPadded::new(
            or_original(before, &padded.before),
            or_original(element, &padded.element),
        )))
    })
}

/// Left-padded keyword or operator: only the space before it is visited
pub fn walk_left_padded_token<'a, V, T>(
    visitor: &mut V,
    padded: &'a LeftPadded<T>,
    location: LeftPaddedLocation,
) -> VisitResult<LeftPadded<T>>
where
    V: TreeVisitor<'a> + ?Sized,
    T: Clone,
{
    with_frame(visitor, CursorValue::LeftPadded(location), |visitor| {
        let before = visitor.visit_space(&padded.before, SpaceLocation::Before(location))?;
        Ok(before.map(|before| LeftPadded::new(before, padded.element.clone())))
    })
}

pub fn walk_container<'a, V>(
    visitor: &mut V,
    container: &'a Container<Node>,
    location: ContainerLocation,
) -> VisitResult<Container<Node>>
where
    V: TreeVisitor<'a> + ?Sized,
{
    with_frame(
        visitor,
        CursorValue::Container {
            location,
            container,
        },
        |visitor| {
            let before =
                visitor.visit_space(&container.before, SpaceLocation::ContainerBefore(location))?;
            let element_location = location.element_location();
            let elements = visit_list(&container.elements, |padded| {
                visitor.visit_right_padded(padded, element_location)
            })?;
            if !any_changed!(before, elements) {
                return Ok(None);
            }
            Ok(Some(Container::new(
                or_original(before, &container.before),
                or_original(elements, &container.elements),
            )))
        },
    )
}

fn visit_nodes<'a, V>(visitor: &mut V, nodes: &'a [Node]) -> VisitResult<Vec<Node>>
where
    V: TreeVisitor<'a> + ?Sized,
{
    visit_list(nodes, |node| visitor.visit(node))
}

fn visit_optional<'a, V>(visitor: &mut V, node: &'a Option<Node>) -> VisitResult<Node>
where
    V: TreeVisitor<'a> + ?Sized,
{
    match node {
        Some(node) => visitor.visit(node),
        None => Ok(None),
    }
}

fn visit_padded_list<'a, V>(
    visitor: &mut V,
    list: &'a [RightPadded<Node>],
    location: RightPaddedLocation,
) -> VisitResult<Vec<RightPadded<Node>>>
where
    V: TreeVisitor<'a> + ?Sized,
{
    visit_list(list, |padded| visitor.visit_right_padded(padded, location))
}

fn visit_optional_container<'a, V>(
    visitor: &mut V,
    container: &'a Option<Container<Node>>,
    location: ContainerLocation,
) -> VisitResult<Container<Node>>
where
    V: TreeVisitor<'a> + ?Sized,
{
    match container {
        Some(container) => visitor.visit_container(container, location),
        None => Ok(None),
    }
}

fn keep<T: Clone>(changed: Option<T>, original: &Option<T>) -> Option<T> {
    changed.or_else(|| original.clone())
}

fn walk_kind<'a, V>(visitor: &mut V, kind: &'a Kind) -> VisitResult<Kind>
where
    V: TreeVisitor<'a> + ?Sized,
{
    use ContainerLocation as C;
    use LeftPaddedLocation as L;
    use RightPaddedLocation as R;

    let rebuilt = match kind {
        Kind::CompilationUnit(unit) => {
            let package = match &unit.package {
                Some(package) => visitor.visit_right_padded(package, R::Package)?,
                None => None,
            };
            let imports = visit_padded_list(visitor, &unit.imports, R::Import)?;
            let types = visit_nodes(visitor, &unit.types)?;
            let eof = visitor.visit_space(&unit.eof, SpaceLocation::Eof)?;
            any_changed!(package, imports, types, eof).then(|| {
                Kind::CompilationUnit(CompilationUnit {
                    package: keep(package, &unit.package),
                    imports: or_original(imports, &unit.imports),
                    types: or_original(types, &unit.types),
                    eof: or_original(eof, &unit.eof),
                })
            })
        }
        Kind::Package(package) => visitor
            .visit(&package.name)?
            .map(|name| Kind::Package(Package { name })),
        Kind::Import(import) => {
            let is_static = walk_left_padded_token(visitor, &import.is_static, L::ImportStatic)?;
            let qualid = visitor.visit(&import.qualid)?;
            any_changed!(is_static, qualid).then(|| {
                Kind::Import(Import {
                    is_static: or_original(is_static, &import.is_static),
                    qualid: or_original(qualid, &import.qualid),
                })
            })
        }
        Kind::ClassDecl(class) => {
            let leading_annotations = visit_nodes(visitor, &class.leading_annotations)?;
            let modifiers = visit_nodes(visitor, &class.modifiers)?;
            let class_kind = walk_left_padded_token(visitor, &class.kind, L::ClassKind)?;
            let name = visitor.visit(&class.name)?;
            let type_parameters =
                visit_optional_container(visitor, &class.type_parameters, C::TypeParameters)?;
            let extends = match &class.extends {
                Some(extends) => visitor.visit_left_padded(extends, L::Extends)?,
                None => None,
            };
            let implements =
                visit_optional_container(visitor, &class.implements, C::Implements)?;
            let body = visitor.visit(&class.body)?;
            any_changed!(
                leading_annotations,
                modifiers,
                class_kind,
                name,
                type_parameters,
                extends,
                implements,
                body
            )
            .then(|| {
                Kind::ClassDecl(ClassDecl {
                    leading_annotations: or_original(
                        leading_annotations,
                        &class.leading_annotations,
                    ),
                    modifiers: or_original(modifiers, &class.modifiers),
                    kind: or_original(class_kind, &class.kind),
                    name: or_original(name, &class.name),
                    type_parameters: keep(type_parameters, &class.type_parameters),
                    extends: keep(extends, &class.extends),
                    implements: keep(implements, &class.implements),
                    body: or_original(body, &class.body),
                })
            })
        }
        Kind::MethodDecl(method) => {
            let leading_annotations = visit_nodes(visitor, &method.leading_annotations)?;
            let modifiers = visit_nodes(visitor, &method.modifiers)?;
            let type_parameters =
                visit_optional_container(visitor, &method.type_parameters, C::TypeParameters)?;
            let return_type = visit_optional(visitor, &method.return_type)?;
            let name = visitor.visit(&method.name)?;
            let parameters = visitor.visit_container(&method.parameters, C::MethodDeclParameters)?;
            let throws = visit_optional_container(visitor, &method.throws, C::Throws)?;
            let body = visit_optional(visitor, &method.body)?;
            any_changed!(
                leading_annotations,
                modifiers,
                type_parameters,
                return_type,
                name,
                parameters,
                throws,
                body
            )
            .then(|| {
                Kind::MethodDecl(MethodDecl {
                    leading_annotations: or_original(
                        leading_annotations,
                        &method.leading_annotations,
                    ),
                    modifiers: or_original(modifiers, &method.modifiers),
                    type_parameters: keep(type_parameters, &method.type_parameters),
                    return_type: keep(return_type, &method.return_type),
                    name: or_original(name, &method.name),
                    parameters: or_original(parameters, &method.parameters),
                    throws: keep(throws, &method.throws),
                    body: keep(body, &method.body),
                })
            })
        }
        Kind::Annotation(annotation) => {
            let name = visitor.visit(&annotation.name)?;
            let arguments =
                visit_optional_container(visitor, &annotation.arguments, C::AnnotationArguments)?;
            any_changed!(name, arguments).then(|| {
                Kind::Annotation(Annotation {
                    name: or_original(name, &annotation.name),
                    arguments: keep(arguments, &annotation.arguments),
                })
            })
        }
        Kind::Block(block) => {
            let statements = visit_padded_list(visitor, &block.statements, R::BlockStatement)?;
            let end = visitor.visit_space(&block.end, SpaceLocation::BlockEnd)?;
            any_changed!(statements, end).then(|| {
                Kind::Block(Block {
                    statements: or_original(statements, &block.statements),
                    end: or_original(end, &block.end),
                })
            })
        }
        Kind::If(branch) => {
            let condition = visitor.visit(&branch.condition)?;
            let then_part = visitor.visit_right_padded(&branch.then_part, R::IfThen)?;
            let else_part = visit_optional(visitor, &branch.else_part)?;
            any_changed!(condition, then_part, else_part).then(|| {
                Kind::If(If {
                    condition: or_original(condition, &branch.condition),
                    then_part: or_original(then_part, &branch.then_part),
                    else_part: keep(else_part, &branch.else_part),
                })
            })
        }
        Kind::Else(branch) => visitor
            .visit_right_padded(&branch.body, R::ElseBody)?
            .map(|body| Kind::Else(Else { body })),
        Kind::ForLoop(repeat) => {
            let control = visitor.visit(&repeat.control)?;
            let body = visitor.visit_right_padded(&repeat.body, R::ForBody)?;
            any_changed!(control, body).then(|| {
                Kind::ForLoop(ForLoop {
                    control: or_original(control, &repeat.control),
                    body: or_original(body, &repeat.body),
                })
            })
        }
        Kind::ForControl(control) => {
            let init = visitor.visit_right_padded(&control.init, R::ForInit)?;
            let condition = visitor.visit_right_padded(&control.condition, R::ForCondition)?;
            let update = visit_padded_list(visitor, &control.update, R::ForUpdate)?;
            any_changed!(init, condition, update).then(|| {
                Kind::ForControl(ForControl {
                    init: or_original(init, &control.init),
                    condition: or_original(condition, &control.condition),
                    update: or_original(update, &control.update),
                })
            })
        }
        Kind::ForEachLoop(repeat) => {
            let control = visitor.visit(&repeat.control)?;
            let body = visitor.visit_right_padded(&repeat.body, R::ForEachBody)?;
            any_changed!(control, body).then(|| {
                Kind::ForEachLoop(ForEachLoop {
                    control: or_original(control, &repeat.control),
                    body: or_original(body, &repeat.body),
                })
            })
        }
        Kind::ForEachControl(control) => {
            let variable = visitor.visit_right_padded(&control.variable, R::ForEachVariable)?;
            let iterable = visitor.visit_right_padded(&control.iterable, R::ForEachIterable)?;
            any_changed!(variable, iterable).then(|| {
                Kind::ForEachControl(ForEachControl {
                    variable: or_original(variable, &control.variable),
                    iterable: or_original(iterable, &control.iterable),
                })
            })
        }
        Kind::WhileLoop(repeat) => {
            let condition = visitor.visit(&repeat.condition)?;
            let body = visitor.visit_right_padded(&repeat.body, R::WhileBody)?;
            any_changed!(condition, body).then(|| {
                Kind::WhileLoop(WhileLoop {
                    condition: or_original(condition, &repeat.condition),
                    body: or_original(body, &repeat.body),
                })
            })
        }
        Kind::DoWhileLoop(repeat) => {
            let body = visitor.visit_right_padded(&repeat.body, R::DoWhileBody)?;
            let condition = visitor.visit_left_padded(&repeat.condition, L::DoWhileCondition)?;
            any_changed!(body, condition).then(|| {
                Kind::DoWhileLoop(DoWhileLoop {
                    body: or_original(body, &repeat.body),
                    condition: or_original(condition, &repeat.condition),
                })
            })
        }
        Kind::Switch(switch) => {
            let selector = visitor.visit(&switch.selector)?;
            let cases = visitor.visit(&switch.cases)?;
            any_changed!(selector, cases).then(|| {
                Kind::Switch(Switch {
                    selector: or_original(selector, &switch.selector),
                    cases: or_original(cases, &switch.cases),
                })
            })
        }
        Kind::Case(case) => {
            let pattern = visit_optional(visitor, &case.pattern)?;
            let statements = visitor.visit_container(&case.statements, C::CaseStatements)?;
            any_changed!(pattern, statements).then(|| {
                Kind::Case(Case {
                    pattern: keep(pattern, &case.pattern),
                    statements: or_original(statements, &case.statements),
                })
            })
        }
        Kind::Label(label) => {
            let name = visitor.visit_right_padded(&label.label, R::LabelName)?;
            let statement = visitor.visit(&label.statement)?;
            any_changed!(name, statement).then(|| {
                Kind::Label(Label {
                    label: or_original(name, &label.label),
                    statement: or_original(statement, &label.statement),
                })
            })
        }
        Kind::Return(statement) => visit_optional(visitor, &statement.expression)?
            .map(|expression| {
                Kind::Return(Return {
                    expression: Some(expression),
                })
            }),
        Kind::Break(statement) => visit_optional(visitor, &statement.label)?
            .map(|label| Kind::Break(Break { label: Some(label) })),
        Kind::Continue(statement) => visit_optional(visitor, &statement.label)?
            .map(|label| Kind::Continue(Continue { label: Some(label) })),
        Kind::Throw(statement) => visitor
            .visit(&statement.exception)?
            .map(|exception| Kind::Throw(Throw { exception })),
        Kind::VariableDecls(decls) => {
            let leading_annotations = visit_nodes(visitor, &decls.leading_annotations)?;
            let modifiers = visit_nodes(visitor, &decls.modifiers)?;
            let type_expression = visit_optional(visitor, &decls.type_expression)?;
            let variables = visit_padded_list(visitor, &decls.variables, R::NamedVariable)?;
            any_changed!(leading_annotations, modifiers, type_expression, variables).then(|| {
                Kind::VariableDecls(VariableDecls {
                    leading_annotations: or_original(
                        leading_annotations,
                        &decls.leading_annotations,
                    ),
                    modifiers: or_original(modifiers, &decls.modifiers),
                    type_expression: keep(type_expression, &decls.type_expression),
                    variables: or_original(variables, &decls.variables),
                })
            })
        }
        Kind::NamedVariable(variable) => {
            let name = visitor.visit(&variable.name)?;
            let initializer = match &variable.initializer {
                Some(initializer) => {
                    visitor.visit_left_padded(initializer, L::VariableInitializer)?
                }
                None => None,
            };
            any_changed!(name, initializer).then(|| {
                Kind::NamedVariable(NamedVariable {
                    name: or_original(name, &variable.name),
                    initializer: keep(initializer, &variable.initializer),
                })
            })
        }
        Kind::MethodInvocation(call) => {
            let select = match &call.select {
                Some(select) => visitor.visit_right_padded(select, R::MethodSelect)?,
                None => None,
            };
            let name = visitor.visit(&call.name)?;
            let arguments =
                visitor.visit_container(&call.arguments, C::MethodInvocationArguments)?;
            any_changed!(select, name, arguments).then(|| {
                Kind::MethodInvocation(MethodInvocation {
                    select: keep(select, &call.select),
                    name: or_original(name, &call.name),
                    arguments: or_original(arguments, &call.arguments),
                })
            })
        }
        Kind::NewClass(new) => {
            let clazz = visit_optional(visitor, &new.clazz)?;
            let arguments = visitor.visit_container(&new.arguments, C::NewClassArguments)?;
            let body = visit_optional(visitor, &new.body)?;
            any_changed!(clazz, arguments, body).then(|| {
                Kind::NewClass(NewClass {
                    clazz: keep(clazz, &new.clazz),
                    arguments: or_original(arguments, &new.arguments),
                    body: keep(body, &new.body),
                })
            })
        }
        Kind::FieldAccess(access) => {
            let target = visitor.visit(&access.target)?;
            let name = visitor.visit_left_padded(&access.name, L::FieldAccessName)?;
            any_changed!(target, name).then(|| {
                Kind::FieldAccess(FieldAccess {
                    target: or_original(target, &access.target),
                    name: or_original(name, &access.name),
                })
            })
        }
        Kind::Binary(binary) => {
            let left = visitor.visit(&binary.left)?;
            let operator = walk_left_padded_token(visitor, &binary.operator, L::BinaryOperator)?;
            let right = visitor.visit(&binary.right)?;
            any_changed!(left, operator, right).then(|| {
                Kind::Binary(Binary {
                    left: or_original(left, &binary.left),
                    operator: or_original(operator, &binary.operator),
                    right: or_original(right, &binary.right),
                })
            })
        }
        Kind::Unary(unary) => {
            let (operator, expression) = if unary.operator.element.is_postfix() {
                let expression = visitor.visit(&unary.expression)?;
                let operator = walk_left_padded_token(visitor, &unary.operator, L::UnaryOperator)?;
                (operator, expression)
            } else {
                let operator = walk_left_padded_token(visitor, &unary.operator, L::UnaryOperator)?;
                let expression = visitor.visit(&unary.expression)?;
                (operator, expression)
            };
            any_changed!(operator, expression).then(|| {
                Kind::Unary(Unary {
                    operator: or_original(operator, &unary.operator),
                    expression: or_original(expression, &unary.expression),
                })
            })
        }
        Kind::Assignment(assignment) => {
            let variable = visitor.visit(&assignment.variable)?;
            let value = visitor.visit_left_padded(&assignment.value, L::AssignmentValue)?;
            any_changed!(variable, value).then(|| {
                Kind::Assignment(Assignment {
                    variable: or_original(variable, &assignment.variable),
                    value: or_original(value, &assignment.value),
                })
            })
        }
        Kind::Parentheses(parentheses) => visitor
            .visit_right_padded(&parentheses.tree, R::Parentheses)?
            .map(|tree| Kind::Parentheses(Parentheses { tree })),
        Kind::ArrayAccess(access) => {
            let indexed = visitor.visit(&access.indexed)?;
            let dimension = visitor.visit(&access.dimension)?;
            any_changed!(indexed, dimension).then(|| {
                Kind::ArrayAccess(ArrayAccess {
                    indexed: or_original(indexed, &access.indexed),
                    dimension: or_original(dimension, &access.dimension),
                })
            })
        }
        Kind::ArrayDimension(dimension) => visitor
            .visit_right_padded(&dimension.index, R::ArrayIndex)?
            .map(|index| Kind::ArrayDimension(ArrayDimension { index })),
        Kind::EnumValueSet(set) => visit_padded_list(visitor, &set.enums, R::EnumValue)?.map(
            |enums| {
                Kind::EnumValueSet(EnumValueSet {
                    enums,
                    terminated_with_semicolon: set.terminated_with_semicolon,
                })
            },
        ),
        Kind::EnumValue(value) => {
            let name = visitor.visit(&value.name)?;
            let arguments =
                visit_optional_container(visitor, &value.arguments, C::NewClassArguments)?;
            any_changed!(name, arguments).then(|| {
                Kind::EnumValue(EnumValue {
                    name: or_original(name, &value.name),
                    arguments: keep(arguments, &value.arguments),
                })
            })
        }
        Kind::TypeParameter(parameter) => {
            let name = visitor.visit(&parameter.name)?;
            let bounds = visit_optional_container(visitor, &parameter.bounds, C::TypeBounds)?;
            any_changed!(name, bounds).then(|| {
                Kind::TypeParameter(TypeParameter {
                    name: or_original(name, &parameter.name),
                    bounds: keep(bounds, &parameter.bounds),
                })
            })
        }
        Kind::Modifier(_) | Kind::Identifier(_) | Kind::Literal(_) | Kind::Empty => None,
    };
    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print;
    use crate::tree::build::*;

    /// Visits everything and changes nothing
    struct Noop<'a> {
        cursor: Cursor<'a>,
        max_depth: usize,
    }

    impl<'a> TreeVisitor<'a> for Noop<'a> {
        fn cursor(&self) -> &Cursor<'a> {
            &self.cursor
        }

        fn cursor_mut(&mut self) -> &mut Cursor<'a> {
            &mut self.cursor
        }

        fn pre_visit(&mut self, _node: &'a Node) -> Result<()> {
            self.max_depth = self.max_depth.max(self.cursor.depth());
            Ok(())
        }
    }

    /// Renames one identifier
    struct Rename<'a> {
        cursor: Cursor<'a>,
        from: &'static str,
        to: &'static str,
    }

    impl<'a> TreeVisitor<'a> for Rename<'a> {
        fn cursor(&self) -> &Cursor<'a> {
            &self.cursor
        }

        fn cursor_mut(&mut self) -> &mut Cursor<'a> {
            &mut self.cursor
        }

        fn visit_node(&mut self, node: &'a Node) -> VisitResult<Node> {
            match node.kind() {
                Kind::Identifier(identifier) if identifier.simple_name == self.from => {
                    Ok(Some(node.with_kind(Kind::Identifier(Identifier {
                        simple_name: self.to.to_string(),
                    }))))
                }
                _ => walk_node(self, node),
            }
        }
    }

    /// Records every space in visit order
    struct Spaces<'a> {
        cursor: Cursor<'a>,
        seen: Vec<String>,
    }

    impl<'a> TreeVisitor<'a> for Spaces<'a> {
        fn cursor(&self) -> &Cursor<'a> {
            &self.cursor
        }

        fn cursor_mut(&mut self) -> &mut Cursor<'a> {
            &mut self.cursor
        }

        fn visit_space(&mut self, space: &Space, _location: SpaceLocation) -> VisitResult<Space> {
            if !space.is_empty() {
                self.seen.push(space.to_string());
            }
            Ok(None)
        }
    }

    fn sample() -> Node {
        let call = method_invocation(
            "/*5*/",
            Some(padded_after(ident("", "out"), "/*6*/")),
            ident("/*7*/", "println"),
            container(
                "/*8*/",
                vec![
                    padded_after(ident("/*9*/", "a"), "/*10*/"),
                    padded_after(
                        binary("/*11*/", ident("", "b"), left("/*12*/", BinaryOperator::Addition), ident("/*13*/", "c")),
                        "/*14*/",
                    ),
                ],
            ),
        );
        let body = block("/*4*/", vec![padded_after(call, "/*15*/")], "/*16*/");
        method_decl(
            "/*1*/",
            Vec::new(),
            Some(ident("/*2*/", "void")),
            ident("/*3*/", "run"),
            container("", Vec::new()),
            Some(body),
        )
    }

    #[test]
    fn test_noop_returns_unchanged() {
        let tree = sample();
        let mut visitor = Noop {
            cursor: Cursor::new(),
            max_depth: 0,
        };
        assert!(visitor.visit(&tree).unwrap().is_none());
        assert_eq!(visitor.cursor.depth(), 1);
        assert!(visitor.max_depth > 5);
    }

    #[test]
    fn test_spaces_visited_in_print_order() {
        let tree = sample();
        let mut visitor = Spaces {
            cursor: Cursor::new(),
            seen: Vec::new(),
        };
        visitor.visit(&tree).unwrap();

        let expected: Vec<String> = (1..=16).map(|n| format!("/*{n}*/")).collect();
        assert_eq!(visitor.seen, expected);

        let printed = print(&tree);
        let mut position = 0;
        for comment in &expected {
            let found = printed[position..].find(comment.as_str()).unwrap();
            position += found + comment.len();
        }
    }

    #[test]
    fn test_rebuild_shares_untouched_subtrees() {
        let tree = sample();
        let mut visitor = Rename {
            cursor: Cursor::new(),
            from: "c",
            to: "d",
        };
        let renamed = visitor.visit(&tree).unwrap().unwrap();
        assert!(print(&renamed).contains("/*13*/d"));

        let (Kind::MethodDecl(before), Kind::MethodDecl(after)) = (tree.kind(), renamed.kind())
        else {
            panic!("expected method declarations");
        };
        assert!(Node::same(&before.name, &after.name));
        assert!(!Node::same(
            before.body.as_ref().unwrap(),
            after.body.as_ref().unwrap()
        ));
    }

    #[test]
    fn test_visit_list_allocates_only_on_change() {
        let items = vec![1, 2, 3];
        let unchanged = visit_list(&items, |_| Ok(None)).unwrap();
        assert!(unchanged.is_none());

        let changed = visit_list(&items, |item| Ok((*item == 2).then_some(20))).unwrap();
        assert_eq!(changed, Some(vec![1, 20, 3]));
    }
}

//! Indentation engine
//!
//! [`TabsAndIndentsVisitor`] walks a tree once, depth-first, and rewrites the
//! whitespace in front of every token that starts a line. Indentation state is
//! threaded through cursor messages:
//!
//! - `indentType`: the [`IndentPolicy`] a node applies to its children,
//!   assigned on entry by [`classify`]
//! - `lastIndent`: the column of the most recent line start on the path,
//!   recorded wherever a newline is re-indented
//!
//! A line start is indented to the nearest `lastIndent` plus the step of the
//! parent's policy. Positions with their own conventions (argument lists,
//! method chains, annotations, loop headers, closing delimiters) override the
//! base column or the policy before the rewrite happens.

use tracing::trace;
use weave_core::cursor::{Cursor, CursorValue};
use weave_core::printer::{print, print_until};
use weave_core::tree::*;
use weave_core::visitor::{
    TreeVisitor, VisitResult, or_original, rebuild_right_padded, visit_list, walk_node, with_frame,
};
use weave_core::{Result, TabsAndIndentsStyle, WeaveError, any_changed};

use crate::indent::{self, column_width, leading_whitespace_width, measure};

const LAST_INDENT: &str = "lastIndent";
const INDENT_TYPE: &str = "indentType";
const AFTER_ANNOTATION: &str = "afterAnnotation";
const FIRST_ARGUMENT_COLUMN: &str = "firstArgumentColumn";

/// How a node indents the lines that start inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentPolicy {
    /// Same column as the node
    Align,
    /// One indent step deeper
    Indent,
    /// One continuation step deeper
    ContinuationIndent,
}

/// Indent policy of a node kind
pub fn classify(kind: &Kind) -> IndentPolicy {
    match kind {
        Kind::CompilationUnit(_)
        | Kind::Package(_)
        | Kind::Import(_)
        | Kind::Label(_)
        | Kind::DoWhileLoop(_)
        | Kind::ArrayDimension(_)
        | Kind::ClassDecl(_)
        | Kind::EnumValueSet(_) => IndentPolicy::Align,
        Kind::Block(_)
        | Kind::If(_)
        | Kind::Else(_)
        | Kind::ForLoop(_)
        | Kind::ForEachLoop(_)
        | Kind::WhileLoop(_)
        | Kind::Case(_) => IndentPolicy::Indent,
        Kind::MethodDecl(_)
        | Kind::Modifier(_)
        | Kind::Annotation(_)
        | Kind::ForControl(_)
        | Kind::ForEachControl(_)
        | Kind::Switch(_)
        | Kind::Return(_)
        | Kind::Break(_)
        | Kind::Continue(_)
        | Kind::Throw(_)
        | Kind::VariableDecls(_)
        | Kind::NamedVariable(_)
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
        | Kind::EnumValue(_)
        | Kind::TypeParameter(_)
        | Kind::Empty => IndentPolicy::ContinuationIndent,
    }
}

pub struct TabsAndIndentsVisitor<'a> {
    style: TabsAndIndentsStyle,
    cursor: Cursor<'a>,
    /// Column of the most recently visited line start
    line_indent: usize,
}

impl<'a> TabsAndIndentsVisitor<'a> {
    pub fn new(style: TabsAndIndentsStyle) -> Self {
        Self {
            style,
            cursor: Cursor::new(),
            line_indent: 0,
        }
    }

    /// Push `ancestors` (outermost first) so a subtree is formatted as if the
    /// traversal had descended to it from the root.
    pub fn seed(&mut self, ancestors: &[&'a Node]) {
        for &ancestor in ancestors {
            self.cursor.push(CursorValue::Node(ancestor));
            self.cursor.put_message(INDENT_TYPE, classify(ancestor.kind()));
            if ancestor.prefix().has_newline() {
                self.record_line_start(ancestor.prefix());
            }
        }
    }

    /// Take the indent of an already placed line start as the base for
    /// everything below the current frame
    fn record_line_start(&mut self, prefix: &Space) {
        let indent = measure(prefix.indent(), self.style.tab_size);
        self.line_indent = indent;
        if indent != 0 {
            self.cursor.put_message(LAST_INDENT, indent);
        }
    }

    fn last_indent(&self) -> usize {
        self.cursor.peek_nearest_message(LAST_INDENT).unwrap_or(0)
    }

    fn continuation(&self) -> usize {
        self.style.continuation_indent
    }

    /// Rewrite `space` to start its next line at `column`
    fn indent_to(&mut self, space: &Space, column: usize) -> Option<Space> {
        if !space.has_newline() {
            return None;
        }
        self.line_indent = column;
        let rewritten = indent::indent_to(space, column, &self.style);
        if rewritten.is_some() {
            trace!(
                from = measure(space.indent(), self.style.tab_size),
                to = column,
                "reindented whitespace"
            );
        }
        rewritten
    }

    /// Column at which the first token of `target` starts once everything
    /// before it is formatted. Printing starts at the nearest node, `up`
    /// frames or more above the current one, that begins a line.
    fn column_of(&self, up: usize, target: &Node) -> usize {
        let nodes: Vec<&Node> = self
            .cursor
            .ancestors()
            .skip(up)
            .filter_map(|value| value.node())
            .collect();
        let anchor = nodes
            .iter()
            .find(|node| node.prefix().has_newline())
            .or_else(|| nodes.last());
        match anchor.and_then(|anchor| print_until(anchor, target)) {
            Some(text) => self.column_after(&text),
            None => 0,
        }
    }

    /// Column reached after `text`, whose lines up to the last one have
    /// already been visited
    fn column_after(&self, text: &str) -> usize {
        let tab_size = self.style.tab_size;
        match text.rfind('\n') {
            Some(newline) => {
                let tail = &text[newline + 1..];
                self.line_indent + column_width(tail, tab_size)
                    - leading_whitespace_width(tail, tab_size)
            }
            None => column_width(text, tab_size),
        }
    }

    /// Column of the first character after the `(` of the loop header the
    /// current control section belongs to
    fn for_init_column(&self, control: &Node) -> Result<usize> {
        let malformed = || WeaveError::malformed_loop_header(print(control));
        let Some(repeat) = self.cursor.value_at(1).and_then(|value| value.node()) else {
            return Err(malformed());
        };
        let Kind::ForLoop(for_loop) = repeat.kind() else {
            return Err(malformed());
        };

        let (header_up, header) = match self.cursor.value_at(2).and_then(|value| value.node()) {
            Some(label)
                if matches!(label.kind(), Kind::Label(l) if Node::same(&l.statement, repeat)) =>
            {
                (2, label)
            }
            _ => (1, repeat),
        };

        let printed = print_until(header, &for_loop.body.element).ok_or_else(malformed)?;
        let text = printed
            .get(header.prefix().to_string().len()..)
            .unwrap_or_default();
        let open = text
            .find('(')
            .ok_or_else(|| WeaveError::malformed_loop_header(text))?;
        let offset = text[open + 1..]
            .find(|c: char| !c.is_whitespace())
            .ok_or_else(|| WeaveError::malformed_loop_header(text))?;
        let segment = &text[..open + 1 + offset];

        if segment.contains('\n') {
            return Ok(self.column_after(segment));
        }
        Ok(self.column_of(header_up, header) + column_width(segment, self.style.tab_size))
    }

    /// Clause boundaries of a counted loop header move to `column`; clause
    /// interiors are not formatted
    fn format_for_control(&mut self, node: &'a Node, control: &'a ForControl) -> VisitResult<Node> {
        let column = if control.init.element.prefix().has_newline() {
            self.last_indent() + self.continuation()
        } else {
            self.for_init_column(node)?
        };

        let init = self.align_clause(&control.init, column);
        let condition = self.align_clause(&control.condition, column);
        let update = visit_list(&control.update, |clause| Ok(self.align_clause(clause, column)))?;
        if !any_changed!(init, condition, update) {
            return Ok(None);
        }
        Ok(Some(node.with_kind(Kind::ForControl(ForControl {
            init: or_original(init, &control.init),
            condition: or_original(condition, &control.condition),
            update: or_original(update, &control.update),
        }))))
    }

    fn align_clause(
        &mut self,
        clause: &RightPadded<Node>,
        column: usize,
    ) -> Option<RightPadded<Node>> {
        let prefix = self.indent_to(clause.element.prefix(), column);
        let after = self.indent_to(&clause.after, column);
        rebuild_right_padded(
            clause,
            prefix.map(|prefix| clause.element.with_prefix(prefix)),
            after,
        )
    }

    /// Sole inline argument that wraps internally: a binary expression, or a
    /// chained call on a field or variable
    fn is_wrapped_sole_argument(&self, element: &Node) -> bool {
        let Some(CursorValue::Container { container, .. }) = self.cursor.parent_value() else {
            return false;
        };
        if container.len() != 1 {
            return false;
        }
        match element.kind() {
            Kind::Binary(_) => true,
            Kind::MethodInvocation(call) => call.select.as_ref().is_some_and(|select| {
                matches!(
                    select.element.kind(),
                    Kind::FieldAccess(_) | Kind::Identifier(_)
                )
            }),
            _ => false,
        }
    }

    /// Indent established by the outermost call of the chain the current
    /// receiver belongs to
    fn chain_indent(&self, indent: usize) -> usize {
        let mut chain_indent = indent;
        let mut up = 0;
        loop {
            if let Some(CursorValue::RightPadded { .. }) = self.cursor.value_at(up) {
                up += 1;
            }
            match self.cursor.value_at(up).and_then(|value| value.node()) {
                Some(node) if matches!(node.kind(), Kind::MethodInvocation(_)) => {
                    if let Some(method_indent) =
                        self.cursor.peek_nearest_message_from(up, LAST_INDENT)
                    {
                        chain_indent = method_indent;
                    }
                    up += 1;
                }
                _ => break,
            }
        }
        chain_indent
    }

    fn is_last_in_parent_container(&self, padded: &RightPadded<Node>) -> bool {
        match self.cursor.parent_value() {
            Some(CursorValue::Container { container, .. }) => container
                .elements
                .last()
                .is_some_and(|last| std::ptr::eq(last, padded)),
            _ => false,
        }
    }

    fn right_padded(
        &mut self,
        padded: &'a RightPadded<Node>,
        location: RightPaddedLocation,
    ) -> VisitResult<RightPadded<Node>> {
        use RightPaddedLocation as R;

        let indent = self.last_indent();
        let element = &padded.element;

        if !padded.after.has_newline() && !element.prefix().has_newline() {
            if matches!(location, R::MethodInvocationArgument | R::NewClassArgument)
                && self.is_wrapped_sole_argument(element)
            {
                self.cursor
                    .put_message(LAST_INDENT, indent + self.continuation());
            }
            let element = self.visit(element)?;
            return Ok(rebuild_right_padded(padded, element, None));
        }

        let (element, after) = match location {
            R::MethodDeclParameter | R::MethodInvocationArgument | R::NewClassArgument => {
                let first_argument_column = self
                    .cursor
                    .message_at::<Option<usize>>(1, FIRST_ARGUMENT_COLUMN)
                    .flatten();
                match first_argument_column {
                    Some(column) => {
                        self.cursor.put_message(LAST_INDENT, column);
                        self.cursor.put_message(INDENT_TYPE, IndentPolicy::Align);
                        let element = self.visit(element)?;
                        (element, self.indent_to(&padded.after, column))
                    }
                    None => {
                        let element = self.visit(element)?;
                        (element, self.indent_to(&padded.after, indent))
                    }
                }
            }
            R::ArrayIndex | R::Parentheses | R::TypeParameter => {
                let element = self.visit(element)?;
                (element, self.indent_to(&padded.after, indent))
            }
            R::MethodSelect => {
                let chain_indent = self.chain_indent(indent);
                self.cursor.put_message_at(1, LAST_INDENT, chain_indent);
                let element = self.visit(element)?;
                let after = self.visit_space(&padded.after, SpaceLocation::After(location))?;
                self.cursor
                    .put_message_at(1, LAST_INDENT, chain_indent + self.continuation());
                (element, after)
            }
            R::AnnotationArgument => {
                let element = self.visit(element)?;
                if self.is_last_in_parent_container(padded) {
                    // closing parenthesis lines up with the annotation
                    self.cursor
                        .put_message_at(1, INDENT_TYPE, IndentPolicy::Align);
                }
                let after = self.visit_space(&padded.after, SpaceLocation::After(location))?;
                (element, after)
            }
            _ => {
                let element = self.visit(element)?;
                let after = self.visit_space(&padded.after, SpaceLocation::After(location))?;
                (element, after)
            }
        };
        Ok(rebuild_right_padded(padded, element, after))
    }

    fn container(
        &mut self,
        container: &'a Container<Node>,
        location: ContainerLocation,
    ) -> VisitResult<Container<Node>> {
        use ContainerLocation as C;

        let indent = self.last_indent();
        let before = if container.before.has_newline()
            && matches!(
                location,
                C::TypeParameters | C::Implements | C::Throws | C::NewClassArguments
            ) {
            let column = indent + self.continuation();
            let before = self.indent_to(&container.before, column);
            self.cursor.put_message(INDENT_TYPE, IndentPolicy::Align);
            self.cursor.put_message(LAST_INDENT, column);
            before
        } else {
            if !container.before.has_newline()
                && matches!(
                    location,
                    C::Implements
                        | C::MethodInvocationArguments
                        | C::NewClassArguments
                        | C::TypeParameters
                        | C::Throws
                )
            {
                self.cursor
                    .put_message(INDENT_TYPE, IndentPolicy::ContinuationIndent);
            }
            self.visit_space(&container.before, SpaceLocation::ContainerBefore(location))?
        };

        if location.is_argument_list() {
            let column = match container.elements.first() {
                Some(first)
                    if !first.element.prefix().has_newline()
                        && container.elements.iter().any(|padded| {
                            padded.after.has_newline() || padded.element.prefix().has_newline()
                        }) =>
                {
                    Some(self.column_of(0, &first.element))
                }
                _ => None,
            };
            self.cursor.put_message(FIRST_ARGUMENT_COLUMN, column);
        }

        let element_location = location.element_location();
        let elements = visit_list(&container.elements, |padded| {
            self.visit_right_padded(padded, element_location)
        })?;
        if !any_changed!(before, elements) {
            return Ok(None);
        }
        Ok(Some(Container::new(
            or_original(before, &container.before),
            or_original(elements, &container.elements),
        )))
    }
}

impl<'a> TreeVisitor<'a> for TabsAndIndentsVisitor<'a> {
    fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    fn pre_visit(&mut self, node: &'a Node) -> Result<()> {
        self.cursor.put_message(INDENT_TYPE, classify(node.kind()));
        Ok(())
    }

    fn visit_node(&mut self, node: &'a Node) -> VisitResult<Node> {
        match node.kind() {
            Kind::ForControl(control) => self.format_for_control(node, control),
            // for-each headers are left exactly as written
            Kind::ForEachControl(_) => Ok(None),
            Kind::ForLoop(for_loop) if !matches!(for_loop.control.kind(), Kind::ForControl(_)) => {
                let header = print_until(node, &for_loop.body.element).unwrap_or_default();
                Err(WeaveError::malformed_loop_header(header.trim()))
            }
            _ => walk_node(self, node),
        }
    }

    fn visit_space(&mut self, space: &Space, location: SpaceLocation) -> VisitResult<Space> {
        let mut align_to_annotation = false;
        let parent = self
            .cursor
            .parent_value()
            .filter(|value| !matches!(value, CursorValue::Root));
        let parent_is_annotation = parent
            .and_then(|value| value.node())
            .is_some_and(|node| matches!(node.kind(), Kind::Annotation(_)));
        if parent_is_annotation {
            self.cursor.put_message_at(2, AFTER_ANNOTATION, true);
        } else if parent.is_some() {
            let inside_annotation = self
                .cursor
                .ancestors()
                .skip(1)
                .filter_map(|value| value.node())
                .any(|node| matches!(node.kind(), Kind::Annotation(_)));
            if !inside_annotation {
                // a declaration after an annotation on its own line lines up with it
                align_to_annotation = self
                    .cursor
                    .poll_nearest_message::<bool>(AFTER_ANNOTATION)
                    .is_some();
            }
        }

        if !space.has_newline() {
            return Ok(None);
        }
        if parent.is_none() {
            // the root keeps its own indentation and its children build on it
            if location == SpaceLocation::Prefix {
                self.record_line_start(space);
            }
            return Ok(None);
        }

        let base = self.last_indent();
        let mut policy = self
            .cursor
            .peek_nearest_message_from(1, INDENT_TYPE)
            .unwrap_or(IndentPolicy::Align);
        if location == SpaceLocation::BlockEnd || align_to_annotation {
            policy = IndentPolicy::Align;
        }

        let column = match policy {
            IndentPolicy::Align => base,
            IndentPolicy::Indent => base + self.style.indent_size,
            IndentPolicy::ContinuationIndent => base + self.continuation(),
        };

        let rewritten = self.indent_to(space, column);
        if !self.cursor.value().is_left_padded() {
            self.cursor.put_message(LAST_INDENT, column);
        }
        Ok(rewritten)
    }

    fn visit_right_padded(
        &mut self,
        padded: &'a RightPadded<Node>,
        location: RightPaddedLocation,
    ) -> VisitResult<RightPadded<Node>> {
        with_frame(
            self,
            CursorValue::RightPadded { location, padded },
            |visitor| visitor.right_padded(padded, location),
        )
    }

    fn visit_container(
        &mut self,
        container: &'a Container<Node>,
        location: ContainerLocation,
    ) -> VisitResult<Container<Node>> {
        with_frame(
            self,
            CursorValue::Container {
                location,
                container,
            },
            |visitor| visitor.container(container, location),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_core::tree::build::*;

    fn format_with(style: TabsAndIndentsStyle, node: &Node) -> Result<Option<Node>> {
        let mut visitor = TabsAndIndentsVisitor::new(style);
        visitor.visit(node)
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            classify(&Kind::Block(Block {
                statements: Vec::new(),
                end: Space::EMPTY
            })),
            IndentPolicy::Indent
        );
        assert_eq!(classify(ident("", "x").kind()), IndentPolicy::ContinuationIndent);
        let unit = compilation_unit(None, Vec::new(), Vec::new(), "");
        assert_eq!(classify(unit.kind()), IndentPolicy::Align);
    }

    #[test]
    fn test_block_statement_indent() {
        let body = block(
            "",
            vec![padded(return_statement("\n", None))],
            "\n",
        );
        let formatted = format_with(TabsAndIndentsStyle::default(), &body)
            .unwrap()
            .unwrap();
        assert_eq!(print(&formatted), "{\n    return;\n}");
    }

    #[test]
    fn test_intra_line_spacing_is_untouched() {
        let call = method_invocation(
            "",
            None,
            ident("", "foo"),
            container("   ", vec![padded_after(ident("  ", "a"), "  ")]),
        );
        assert!(format_with(TabsAndIndentsStyle::default(), &call)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_cursor_is_unwound_after_error() {
        let mut visitor = TabsAndIndentsVisitor::new(TabsAndIndentsStyle::default());
        let broken = for_loop("", ident(" ", "x"), padded(block(" ", Vec::new(), "")));
        let unit = block("", vec![padded(broken)], "\n");
        assert!(visitor.visit(&unit).is_err());
        assert_eq!(visitor.cursor().depth(), 1);
    }

    #[test]
    fn test_seeded_ancestors_provide_base_indent() {
        let outer = block("\n    ", Vec::new(), "\n    ");
        let statement = return_statement("\n", None);
        let mut visitor = TabsAndIndentsVisitor::new(TabsAndIndentsStyle::default());
        visitor.seed(&[&outer]);
        let formatted = visitor.visit(&statement).unwrap().unwrap();
        assert_eq!(formatted.prefix().whitespace(), "\n        ");
    }
}

//! Structural positions of whitespace and padded wrappers
//!
//! Visitors receive a location with every space and wrapper so they can
//! specialise behaviour per position (a block's closing brace, a method
//! argument, the receiver of a call) without inspecting the parent node.

/// Where a right-padded element sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RightPaddedLocation {
    Package,
    Import,
    BlockStatement,
    IfThen,
    ElseBody,
    ForInit,
    ForCondition,
    ForUpdate,
    ForBody,
    ForEachVariable,
    ForEachIterable,
    ForEachBody,
    WhileBody,
    DoWhileBody,
    CaseStatement,
    LabelName,
    NamedVariable,
    MethodSelect,
    MethodInvocationArgument,
    MethodDeclParameter,
    NewClassArgument,
    AnnotationArgument,
    TypeParameter,
    TypeBound,
    Implements,
    Throws,
    Parentheses,
    ArrayIndex,
    EnumValue,
}

/// Where a left-padded element sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeftPaddedLocation {
    ImportStatic,
    ClassKind,
    Extends,
    FieldAccessName,
    BinaryOperator,
    UnaryOperator,
    AssignmentValue,
    VariableInitializer,
    DoWhileCondition,
}

/// Where a container sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerLocation {
    MethodInvocationArguments,
    MethodDeclParameters,
    NewClassArguments,
    AnnotationArguments,
    TypeParameters,
    TypeBounds,
    Implements,
    Throws,
    CaseStatements,
}

impl ContainerLocation {
    /// Location of each element of a container at this location
    pub fn element_location(self) -> RightPaddedLocation {
        match self {
            ContainerLocation::MethodInvocationArguments => {
                RightPaddedLocation::MethodInvocationArgument
            }
            ContainerLocation::MethodDeclParameters => RightPaddedLocation::MethodDeclParameter,
            ContainerLocation::NewClassArguments => RightPaddedLocation::NewClassArgument,
            ContainerLocation::AnnotationArguments => RightPaddedLocation::AnnotationArgument,
            ContainerLocation::TypeParameters => RightPaddedLocation::TypeParameter,
            ContainerLocation::TypeBounds => RightPaddedLocation::TypeBound,
            ContainerLocation::Implements => RightPaddedLocation::Implements,
            ContainerLocation::Throws => RightPaddedLocation::Throws,
            ContainerLocation::CaseStatements => RightPaddedLocation::CaseStatement,
        }
    }

    /// Whether the container holds call or declaration arguments
    pub fn is_argument_list(self) -> bool {
        matches!(
            self,
            ContainerLocation::MethodInvocationArguments
                | ContainerLocation::MethodDeclParameters
                | ContainerLocation::NewClassArguments
        )
    }
}

/// Where a space sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceLocation {
    /// Leading whitespace of a node
    Prefix,
    /// Whitespace before a block's closing brace
    BlockEnd,
    /// Whitespace at the end of a compilation unit
    Eof,
    /// Whitespace after a right-padded element
    After(RightPaddedLocation),
    /// Whitespace before a left-padded element
    Before(LeftPaddedLocation),
    /// Whitespace before a container's opening delimiter
    ContainerBefore(ContainerLocation),
}

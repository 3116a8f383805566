use std::fmt::Display;

use super::keywords::KeywordClass;

/// Every non-terminal of the IR grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    ProgramDeclarationList,
    ProgramDeclaration,
    Target,
    DeclareFunction,
    DefineFunction,
    DeclareParameterList,
    DeclareParameter,
    DefineParameterList,
    DefineParameter,
    ParameterAttributeList,
    FunctionAttributeList,
    DeclareGlobal,
    DeclareGlobalModifiers,
    GlobalAlignment,
    Literal,
    LiteralString,
    LiteralNumber,
    StatementList,
    Statement,
    BinaryOp,
    BinaryTerm,
    StatementBinaryOpModifierList,
    ValueTerm,
    Call,
    CallModifierList,
    CallParameterWithTypeList,
    Return,
    Label,
    ConstantExpression,
    ConstantExpressionList,
    ConstantExpressionIdentifier,
    ConstantExpressionNumber,
    ConstantExpressionCstTo,
    ConstantExpressionGetElementPtr,
    Type,
    TypeList,
    TypeInteger,
    TypeVoid,
    TypeFloatingPoint,
    TypeEllipsis,
    TypePointer,
    TypeVector,
    TypeArray,
    TypeStruct,
    TypeFunction,
}

/// Leaf tokens that keep their text in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Number,
    String,
    Identifier,
    LabelName,
}

impl Terminal {
    pub fn name(&self) -> &'static str {
        match self {
            Terminal::Number => "NUMBER",
            Terminal::String => "STRING",
            Terminal::Identifier => "IDENTIFIER",
            Terminal::LabelName => "LABELNAME",
        }
    }
}

/// What may occupy one child slot of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Rule(Production),
    Terminal(Terminal),
    /// A fixed keyword, e.g. `define`.
    Keyword(&'static str),
    KeywordOf(KeywordClass),
    Choice(&'static [FieldKind]),
}

impl FieldKind {
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Rule(production) => production.name().to_string(),
            FieldKind::Terminal(terminal) => terminal.name().to_string(),
            FieldKind::Keyword(keyword) => format!("`{}`", keyword),
            FieldKind::KeywordOf(class) => class.describe().to_string(),
            FieldKind::Choice(kinds) => kinds
                .iter()
                .map(|kind| kind.describe())
                .collect::<Vec<String>>()
                .join(" or "),
        }
    }
}

/// A named child slot of a sequence production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

macro_rules! field {
    ($name:literal, $kind:expr $(,)?) => {
        Field {
            name: $name,
            kind: $kind,
        }
    };
}

/// The child layout of a production, shared by the parser and the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Exactly one child, one of the alternatives. Collapsed when lowering.
    Wrapper(&'static [FieldKind]),
    /// Zero or more children of one kind.
    List(FieldKind),
    /// A fixed sequence of named children.
    Sequence(&'static [Field]),
}

use FieldKind::{Keyword, KeywordOf, Rule};

const IDENTIFIER: FieldKind = FieldKind::Terminal(Terminal::Identifier);
const NUMBER: FieldKind = FieldKind::Terminal(Terminal::Number);
const STRING: FieldKind = FieldKind::Terminal(Terminal::String);
const TYPE: FieldKind = Rule(Production::Type);

impl Production {
    pub const ALL: [Production; 45] = [
        Production::ProgramDeclarationList,
        Production::ProgramDeclaration,
        Production::Target,
        Production::DeclareFunction,
        Production::DefineFunction,
        Production::DeclareParameterList,
        Production::DeclareParameter,
        Production::DefineParameterList,
        Production::DefineParameter,
        Production::ParameterAttributeList,
        Production::FunctionAttributeList,
        Production::DeclareGlobal,
        Production::DeclareGlobalModifiers,
        Production::GlobalAlignment,
        Production::Literal,
        Production::LiteralString,
        Production::LiteralNumber,
        Production::StatementList,
        Production::Statement,
        Production::BinaryOp,
        Production::BinaryTerm,
        Production::StatementBinaryOpModifierList,
        Production::ValueTerm,
        Production::Call,
        Production::CallModifierList,
        Production::CallParameterWithTypeList,
        Production::Return,
        Production::Label,
        Production::ConstantExpression,
        Production::ConstantExpressionList,
        Production::ConstantExpressionIdentifier,
        Production::ConstantExpressionNumber,
        Production::ConstantExpressionCstTo,
        Production::ConstantExpressionGetElementPtr,
        Production::Type,
        Production::TypeList,
        Production::TypeInteger,
        Production::TypeVoid,
        Production::TypeFloatingPoint,
        Production::TypeEllipsis,
        Production::TypePointer,
        Production::TypeVector,
        Production::TypeArray,
        Production::TypeStruct,
        Production::TypeFunction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Production::ProgramDeclarationList => "PROGRAM_DECLARATION_LIST",
            Production::ProgramDeclaration => "PROGRAM_DECLARATION",
            Production::Target => "TARGET",
            Production::DeclareFunction => "DECLARE_FUNCTION",
            Production::DefineFunction => "DEFINE_FUNCTION",
            Production::DeclareParameterList => "DECLARE_PARAMETER_LIST",
            Production::DeclareParameter => "DECLARE_PARAMETER",
            Production::DefineParameterList => "DEFINE_PARAMETER_LIST",
            Production::DefineParameter => "DEFINE_PARAMETER",
            Production::ParameterAttributeList => "PARAMETER_ATTRIBUTE_LIST",
            Production::FunctionAttributeList => "FUNCTION_ATTRIBUTE_LIST",
            Production::DeclareGlobal => "DECLARE_GLOBAL",
            Production::DeclareGlobalModifiers => "DECLARE_GLOBAL_MODIFIERS",
            Production::GlobalAlignment => "GLOBAL_ALIGNMENT",
            Production::Literal => "LITERAL",
            Production::LiteralString => "LITERAL_STRING",
            Production::LiteralNumber => "LITERAL_NUMBER",
            Production::StatementList => "STATEMENT_LIST",
            Production::Statement => "STATEMENT",
            Production::BinaryOp => "BINARY_OP",
            Production::BinaryTerm => "BINARY_TERM",
            Production::StatementBinaryOpModifierList => "STATEMENT_BINARY_OP_MODIFIER_LIST",
            Production::ValueTerm => "VALUE_TERM",
            Production::Call => "CALL",
            Production::CallModifierList => "CALL_MODIFIER_LIST",
            Production::CallParameterWithTypeList => "CALL_PARAMETER_WITH_TYPE_LIST",
            Production::Return => "RETURN",
            Production::Label => "LABEL",
            Production::ConstantExpression => "CONSTANT_EXPRESSION",
            Production::ConstantExpressionList => "CONSTANT_EXPRESSION_LIST",
            Production::ConstantExpressionIdentifier => "CONSTANT_EXPRESSION_IDENTIFIER",
            Production::ConstantExpressionNumber => "CONSTANT_EXPRESSION_NUMBER",
            Production::ConstantExpressionCstTo => "CONSTANT_EXPRESSION_CST_TO",
            Production::ConstantExpressionGetElementPtr => "CONSTANT_EXPRESSION_GETELEMENTPTR",
            Production::Type => "TYPE",
            Production::TypeList => "TYPE_LIST",
            Production::TypeInteger => "TYPE_INTEGER",
            Production::TypeVoid => "TYPE_VOID",
            Production::TypeFloatingPoint => "TYPE_FLOATING_POINT",
            Production::TypeEllipsis => "TYPE_ELLIPSIS",
            Production::TypePointer => "TYPE_POINTER",
            Production::TypeVector => "TYPE_VECTOR",
            Production::TypeArray => "TYPE_ARRAY",
            Production::TypeStruct => "TYPE_STRUCT",
            Production::TypeFunction => "TYPE_FUNCTION",
        }
    }

    pub fn from_name(name: &str) -> Option<Production> {
        Production::ALL
            .iter()
            .copied()
            .find(|production| production.name() == name)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Production::ProgramDeclarationList => Shape::List(Rule(Production::ProgramDeclaration)),
            Production::ProgramDeclaration => Shape::Wrapper(&[
                Rule(Production::Target),
                Rule(Production::DefineFunction),
                Rule(Production::DeclareFunction),
                Rule(Production::DeclareGlobal),
            ]),
            Production::Target => Shape::Sequence(&[
                field!("target", Keyword("target")),
                field!("kind", KeywordOf(KeywordClass::TargetKind)),
                field!("value", STRING),
            ]),
            Production::DeclareFunction => Shape::Sequence(&[
                field!("declare", Keyword("declare")),
                field!("return_type", TYPE),
                field!("name", IDENTIFIER),
                field!("parameters", Rule(Production::DeclareParameterList)),
                field!("attributes", Rule(Production::FunctionAttributeList)),
            ]),
            Production::DefineFunction => Shape::Sequence(&[
                field!("define", Keyword("define")),
                field!("return_type", TYPE),
                field!("name", IDENTIFIER),
                field!("parameters", Rule(Production::DefineParameterList)),
                field!("attributes", Rule(Production::FunctionAttributeList)),
                field!("body", Rule(Production::StatementList)),
            ]),
            Production::DeclareParameterList => Shape::List(Rule(Production::DeclareParameter)),
            Production::DeclareParameter => Shape::Sequence(&[
                field!("type", TYPE),
                field!("attributes", Rule(Production::ParameterAttributeList)),
            ]),
            Production::DefineParameterList => Shape::List(Rule(Production::DefineParameter)),
            Production::DefineParameter => Shape::Sequence(&[
                field!("type", TYPE),
                field!("attributes", Rule(Production::ParameterAttributeList)),
                field!("name", IDENTIFIER),
            ]),
            Production::ParameterAttributeList => {
                Shape::List(KeywordOf(KeywordClass::ParameterAttribute))
            }
            Production::FunctionAttributeList => {
                Shape::List(KeywordOf(KeywordClass::FunctionAttribute))
            }
            Production::DeclareGlobal => Shape::Sequence(&[
                field!("name", IDENTIFIER),
                field!("modifiers", Rule(Production::DeclareGlobalModifiers)),
                field!("storage", KeywordOf(KeywordClass::GlobalStorage)),
                field!("type", TYPE),
                field!("initializer", Rule(Production::Literal)),
                field!("alignment", Rule(Production::GlobalAlignment)),
            ]),
            Production::DeclareGlobalModifiers => Shape::List(KeywordOf(KeywordClass::GlobalModifier)),
            // `, align` is consumed by the parser, only the number is kept.
            Production::GlobalAlignment => Shape::List(NUMBER),
            Production::Literal => Shape::Wrapper(&[
                Rule(Production::LiteralString),
                Rule(Production::LiteralNumber),
            ]),
            Production::LiteralString => {
                Shape::Sequence(&[field!("c", Keyword("c")), field!("value", STRING)])
            }
            Production::LiteralNumber => Shape::Sequence(&[field!("value", NUMBER)]),
            Production::StatementList => Shape::List(Rule(Production::Statement)),
            Production::Statement => Shape::Wrapper(&[
                Rule(Production::BinaryOp),
                Rule(Production::Call),
                Rule(Production::Return),
                Rule(Production::Label),
            ]),
            Production::BinaryOp => Shape::Sequence(&[
                field!("destination", IDENTIFIER),
                field!("operator", Rule(Production::BinaryTerm)),
                field!("modifiers", Rule(Production::StatementBinaryOpModifierList)),
                field!("type", TYPE),
                field!("left", Rule(Production::ValueTerm)),
                field!("right", Rule(Production::ValueTerm)),
            ]),
            Production::BinaryTerm => Shape::Wrapper(&[KeywordOf(KeywordClass::BinaryOperator)]),
            Production::StatementBinaryOpModifierList => {
                Shape::List(KeywordOf(KeywordClass::BinaryOpModifier))
            }
            Production::ValueTerm => Shape::Wrapper(&[
                IDENTIFIER,
                NUMBER,
                KeywordOf(KeywordClass::ValueKeyword),
            ]),
            Production::Call => Shape::Sequence(&[
                field!("destination", IDENTIFIER),
                field!("modifiers", Rule(Production::CallModifierList)),
                field!("call", Keyword("call")),
                field!("type", TYPE),
                field!("function", IDENTIFIER),
                field!("arguments", Rule(Production::CallParameterWithTypeList)),
                field!("attributes", Rule(Production::FunctionAttributeList)),
            ]),
            Production::CallModifierList => Shape::List(KeywordOf(KeywordClass::CallModifier)),
            Production::CallParameterWithTypeList => {
                Shape::List(Rule(Production::ConstantExpression))
            }
            Production::Return => Shape::Sequence(&[
                field!("ret", Keyword("ret")),
                field!(
                    "value",
                    FieldKind::Choice(&[
                        Keyword("void"),
                        Rule(Production::ConstantExpression),
                        Rule(Production::ValueTerm),
                    ]),
                ),
            ]),
            Production::Label => Shape::Sequence(&[
                field!("name", FieldKind::Terminal(Terminal::LabelName)),
                field!("colon", Keyword(":")),
            ]),
            Production::ConstantExpression => Shape::Wrapper(&[
                Rule(Production::ConstantExpressionIdentifier),
                Rule(Production::ConstantExpressionNumber),
                Rule(Production::ConstantExpressionCstTo),
                Rule(Production::ConstantExpressionGetElementPtr),
            ]),
            Production::ConstantExpressionList => Shape::List(Rule(Production::ConstantExpression)),
            Production::ConstantExpressionIdentifier => {
                Shape::Sequence(&[field!("type", TYPE), field!("name", IDENTIFIER)])
            }
            Production::ConstantExpressionNumber => Shape::Sequence(&[
                field!("type", TYPE),
                field!("value", Rule(Production::ValueTerm)),
            ]),
            Production::ConstantExpressionCstTo => Shape::Sequence(&[
                field!("type", TYPE),
                field!("operator", KeywordOf(KeywordClass::CastOperator)),
                field!("value", Rule(Production::ConstantExpression)),
                field!("to", Keyword("to")),
                field!("target_type", TYPE),
            ]),
            Production::ConstantExpressionGetElementPtr => Shape::Sequence(&[
                field!("type", TYPE),
                field!("getelementptr", Keyword("getelementptr")),
                field!("inbounds", Keyword("inbounds")),
                field!("base", Rule(Production::ConstantExpression)),
                field!("indices", Rule(Production::ConstantExpressionList)),
            ]),
            Production::Type => Shape::Wrapper(&[
                Rule(Production::TypeInteger),
                Rule(Production::TypeVoid),
                Rule(Production::TypeFloatingPoint),
                Rule(Production::TypeEllipsis),
                Rule(Production::TypePointer),
                Rule(Production::TypeVector),
                Rule(Production::TypeArray),
                Rule(Production::TypeStruct),
                Rule(Production::TypeFunction),
            ]),
            Production::TypeList => Shape::List(TYPE),
            Production::TypeInteger => {
                Shape::Sequence(&[field!("width", KeywordOf(KeywordClass::IntegerType))])
            }
            Production::TypeVoid => Shape::Sequence(&[field!("void", Keyword("void"))]),
            Production::TypeFloatingPoint => {
                Shape::Sequence(&[field!("kind", KeywordOf(KeywordClass::FloatType))])
            }
            Production::TypeEllipsis => Shape::Sequence(&[field!("ellipsis", Keyword("..."))]),
            Production::TypePointer => {
                Shape::Sequence(&[field!("pointee", TYPE), field!("star", Keyword("*"))])
            }
            Production::TypeVector | Production::TypeArray => Shape::Sequence(&[
                field!("count", NUMBER),
                field!("x", Keyword("x")),
                field!("element", TYPE),
            ]),
            Production::TypeStruct => {
                Shape::Sequence(&[field!("members", Rule(Production::TypeList))])
            }
            Production::TypeFunction => Shape::Sequence(&[
                field!("return_type", TYPE),
                field!("parameters", Rule(Production::TypeList)),
            ]),
        }
    }

    /// Named fields of a sequence production, empty for wrappers and lists.
    pub fn fields(&self) -> &'static [Field] {
        match self.shape() {
            Shape::Sequence(fields) => fields,
            _ => &[],
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

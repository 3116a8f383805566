use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref INTEGER_TYPES: HashSet<&'static str> =
        HashSet::from(["i1", "i2", "i4", "i8", "i16", "i32", "i64", "i128"]);
    pub static ref FLOAT_TYPES: HashSet<&'static str> =
        HashSet::from(["half", "float", "double", "x86_fp80", "fp128", "ppc_fp128"]);
    pub static ref TARGET_KINDS: HashSet<&'static str> = HashSet::from(["datalayout", "triple"]);
    pub static ref GLOBAL_STORAGE: HashSet<&'static str> = HashSet::from(["constant", "global"]);
    pub static ref GLOBAL_MODIFIERS: HashSet<&'static str> = HashSet::from([
        // linkage
        "private",
        "linker_private",
        "linker_private_weak",
        "internal",
        "available_externally",
        "linkonce",
        "weak",
        "common",
        "appending",
        "extern_weak",
        "linkonce_odr",
        "weak_odr",
        "linkonce_odr_auto_hide",
        "external",
        "dllimport",
        "dllexport",
        // visibility
        "default",
        "hidden",
        "protected",
        "unnamed_addr",
    ]);
    pub static ref FUNCTION_ATTRIBUTES: HashSet<&'static str> = HashSet::from([
        "alignstack",
        "alwaysinline",
        "builtin",
        "cold",
        "inlinehint",
        "minsize",
        "naked",
        "nobuiltin",
        "noduplicate",
        "noimplicitfloat",
        "noinline",
        "nonlazybind",
        "noredzone",
        "noreturn",
        "nounwind",
        "optnone",
        "optsize",
        "readnone",
        "readonly",
        "returns_twice",
        "sanitize_address",
        "sanitize_memory",
        "sanitize_thread",
        "ssp",
        "sspreq",
        "sspstrong",
        "uwtable",
    ]);
    pub static ref PARAMETER_ATTRIBUTES: HashSet<&'static str> = HashSet::from([
        "zeroext", "signext", "inreg", "byval", "sret", "noalias", "nocapture", "nest", "returned",
    ]);
    pub static ref BINARY_OPERATORS: HashSet<&'static str> = HashSet::from([
        "add", "sub", "mul", "udiv", "sdiv", "urem", "srem", "shl", "lshr", "ashr", "and", "or",
        "xor", "fadd", "fsub", "fmul", "fdiv", "frem",
    ]);
    pub static ref BINARY_OP_MODIFIERS: HashSet<&'static str> =
        HashSet::from(["nuw", "nsw", "nnan", "ninf", "nsz", "arcp", "fast"]);
    pub static ref CAST_OPERATORS: HashSet<&'static str> = HashSet::from([
        "trunc", "zext", "sext", "fptrunc", "fpext", "fptoui", "fptosi", "uitofp", "sitofp",
        "ptrtoint", "inttoptr", "bitcast",
    ]);
    pub static ref VALUE_KEYWORDS: HashSet<&'static str> = HashSet::from(["true", "false", "null"]);
    pub static ref CALL_MODIFIERS: HashSet<&'static str> = HashSet::from(["tail"]);
}

/// A set of interchangeable keywords that may fill one grammar slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    IntegerType,
    FloatType,
    TargetKind,
    GlobalStorage,
    GlobalModifier,
    FunctionAttribute,
    ParameterAttribute,
    BinaryOperator,
    BinaryOpModifier,
    CastOperator,
    ValueKeyword,
    CallModifier,
}

impl KeywordClass {
    pub fn contains(&self, word: &str) -> bool {
        self.words().contains(word)
    }

    fn words(&self) -> &'static HashSet<&'static str> {
        match self {
            KeywordClass::IntegerType => &INTEGER_TYPES,
            KeywordClass::FloatType => &FLOAT_TYPES,
            KeywordClass::TargetKind => &TARGET_KINDS,
            KeywordClass::GlobalStorage => &GLOBAL_STORAGE,
            KeywordClass::GlobalModifier => &GLOBAL_MODIFIERS,
            KeywordClass::FunctionAttribute => &FUNCTION_ATTRIBUTES,
            KeywordClass::ParameterAttribute => &PARAMETER_ATTRIBUTES,
            KeywordClass::BinaryOperator => &BINARY_OPERATORS,
            KeywordClass::BinaryOpModifier => &BINARY_OP_MODIFIERS,
            KeywordClass::CastOperator => &CAST_OPERATORS,
            KeywordClass::ValueKeyword => &VALUE_KEYWORDS,
            KeywordClass::CallModifier => &CALL_MODIFIERS,
        }
    }

    /// Human readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            KeywordClass::IntegerType => "an integer type",
            KeywordClass::FloatType => "a floating point type",
            KeywordClass::TargetKind => "`datalayout` or `triple`",
            KeywordClass::GlobalStorage => "`constant` or `global`",
            KeywordClass::GlobalModifier => "a linkage or visibility keyword",
            KeywordClass::FunctionAttribute => "a function attribute",
            KeywordClass::ParameterAttribute => "a parameter attribute",
            KeywordClass::BinaryOperator => "a binary operator",
            KeywordClass::BinaryOpModifier => "a binary operator modifier",
            KeywordClass::CastOperator => "a cast operator",
            KeywordClass::ValueKeyword => "`true`, `false` or `null`",
            KeywordClass::CallModifier => "`tail`",
        }
    }
}

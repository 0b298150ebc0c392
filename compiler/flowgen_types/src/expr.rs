//! Type-expression grammar.
//!
//! A [`TypeExpr`] is the parsed form of a type hint attached to a slot:
//! a base (a concrete type token or one of the resolution directives)
//! wrapped by an optional marker and zero or more slice markers.
//!
//! # Textual Form
//!
//! ```text
//! ?[]int64            optional slice of int64
//! @any                wildcard: any type
//! @number             some numeric type
//! @single             exactly one instance of the partner type
//! @from[in,out]       the candidates of other slots
//! @type[int,string]   an explicit candidate list
//! untyped int         raw literal kinds (int, float, string)
//! ```
//!
//! Wrappers are stored as a flag and a depth rather than as a prefix
//! string, so `[]?T` and `?[]T` are the same value and always render
//! as `?[]T`.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::ParseError;

/// Concrete type tokens accepted by the `@number` directive.
const NUMERIC_KINDS: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "float32", "float64",
];

/// Spelling of the empty interface, the weakest concrete type.
const EMPTY_INTERFACE: &str = "interface{}";

const OPTIONAL_MARKER: char = '?';
const SLICE_MARKER: &str = "[]";

/// Name of a generically-typed slot (a port or type parameter).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotName(String);

impl SlotName {
    /// Create a slot name, rejecting names that cannot appear inside
    /// a `@from[...]` directive.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        let valid = !name.is_empty()
            && !name.contains(|c: char| c == ',' || c == '[' || c == ']' || c.is_whitespace());
        if valid {
            Ok(SlotName(name))
        } else {
            Err(ParseError::InvalidSlotName(name))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SlotName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SlotName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotName::new(s)
    }
}

/// Kind of an untyped literal hint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UntypedKind {
    /// `untyped int`: an integer literal.
    Int,
    /// `untyped float`: a floating-point literal.
    Float,
    /// `untyped string`: a string literal.
    String,
}

impl UntypedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "untyped int",
            Self::Float => "untyped float",
            Self::String => "untyped string",
        }
    }
}

/// The unwrapped part of a type expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeBase {
    /// A concrete type token (`int64`, `string`, `interface{}`, `map[string]int`).
    Named(String),
    /// `@any`: no information.
    Any,
    /// `@number`: some numeric kind.
    Number,
    /// `@single`: one instance of whatever the partner type is.
    Single,
    /// `@from[a,b]`: the raw candidates of the named slots.
    From(SmallVec<[SlotName; 2]>),
    /// `@type[t1,t2]`: an explicit candidate list.
    TypeList(Vec<TypeExpr>),
    /// `untyped int`, `untyped float`, `untyped string`.
    Untyped(UntypedKind),
}

impl TypeBase {
    /// Whether this base is a resolution directive rather than a type.
    #[inline]
    pub fn is_directive(&self) -> bool {
        !matches!(self, TypeBase::Named(_))
    }
}

/// A parsed type hint.
///
/// The derived ordering is the canonical order the combiner folds in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeExpr {
    optional: bool,
    slice_depth: u8,
    base: TypeBase,
}

impl TypeExpr {
    fn bare(base: TypeBase) -> Self {
        TypeExpr {
            optional: false,
            slice_depth: 0,
            base,
        }
    }

    /// A concrete type token.
    pub fn named(token: impl Into<String>) -> Result<Self, ParseError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ParseError::Empty);
        }
        if token.starts_with(OPTIONAL_MARKER)
            || token.starts_with(SLICE_MARKER)
            || token.starts_with('@')
        {
            return Err(ParseError::InvalidToken(token));
        }
        Ok(Self::bare(TypeBase::Named(token)))
    }

    pub fn any() -> Self {
        Self::bare(TypeBase::Any)
    }

    pub fn number() -> Self {
        Self::bare(TypeBase::Number)
    }

    pub fn single() -> Self {
        Self::bare(TypeBase::Single)
    }

    pub fn untyped(kind: UntypedKind) -> Self {
        Self::bare(TypeBase::Untyped(kind))
    }

    /// `@from[...]` over at least one slot.
    pub fn from_slots(slots: impl IntoIterator<Item = SlotName>) -> Result<Self, ParseError> {
        let slots: SmallVec<[SlotName; 2]> = slots.into_iter().collect();
        if slots.is_empty() {
            return Err(ParseError::EmptyArguments("@from".to_owned()));
        }
        Ok(Self::bare(TypeBase::From(slots)))
    }

    /// `@type[...]` over at least one type.
    pub fn type_list(types: impl IntoIterator<Item = TypeExpr>) -> Result<Self, ParseError> {
        let types: Vec<TypeExpr> = types.into_iter().collect();
        if types.is_empty() {
            return Err(ParseError::EmptyArguments("@type".to_owned()));
        }
        Ok(Self::bare(TypeBase::TypeList(types)))
    }

    /// Parse the textual form.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_expr(text)
    }

    // ========================================
    // Accessors
    // ========================================

    #[inline]
    pub fn base(&self) -> &TypeBase {
        &self.base
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    #[inline]
    pub fn slice_depth(&self) -> u8 {
        self.slice_depth
    }

    #[inline]
    pub fn is_slice(&self) -> bool {
        self.slice_depth > 0
    }

    /// No optional marker and no slice marker.
    #[inline]
    pub fn is_bare(&self) -> bool {
        !self.optional && self.slice_depth == 0
    }

    #[inline]
    pub fn is_directive(&self) -> bool {
        self.base.is_directive()
    }

    /// A concrete, non-optional type with no directive left in it.
    pub fn is_resolved(&self) -> bool {
        !self.optional && !self.is_directive()
    }

    // ========================================
    // Predicates
    // ========================================

    /// One of the fixed numeric kinds, unwrapped.
    pub fn is_numeric(&self) -> bool {
        self.is_bare() && matches!(&self.base, TypeBase::Named(t) if NUMERIC_KINDS.contains(&t.as_str()))
    }

    /// `@any`, under any wrapping.
    pub fn is_wildcard(&self) -> bool {
        self.base == TypeBase::Any
    }

    /// `interface{}` or `[]interface{}`.
    pub fn is_empty_interface(&self) -> bool {
        !self.optional
            && self.slice_depth <= 1
            && matches!(&self.base, TypeBase::Named(t) if t == EMPTY_INTERFACE)
    }

    /// `?bool`, which unifies with anything.
    pub fn is_optional_bool(&self) -> bool {
        self.optional
            && self.slice_depth == 0
            && matches!(&self.base, TypeBase::Named(t) if t == "bool")
    }

    /// Bare `@number`.
    pub fn is_number_directive(&self) -> bool {
        self.is_bare() && self.base == TypeBase::Number
    }

    /// Bare `@single`.
    pub fn is_single_directive(&self) -> bool {
        self.is_bare() && self.base == TypeBase::Single
    }

    // ========================================
    // Wrapper manipulation
    // ========================================

    /// Drop the optional marker.
    #[must_use]
    pub fn trim_optional(&self) -> TypeExpr {
        TypeExpr {
            optional: false,
            ..self.clone()
        }
    }

    /// Mark as optional.
    #[must_use]
    pub fn into_optional(self) -> TypeExpr {
        TypeExpr {
            optional: true,
            ..self
        }
    }

    /// Strip one slice level. Non-slices are returned unchanged.
    #[must_use]
    pub fn trim_slice(&self) -> TypeExpr {
        TypeExpr {
            slice_depth: self.slice_depth.saturating_sub(1),
            ..self.clone()
        }
    }

    /// Wrap in one more slice level.
    #[must_use]
    pub fn into_slice(self) -> TypeExpr {
        TypeExpr {
            slice_depth: self.slice_depth.saturating_add(1),
            ..self
        }
    }

    /// Wrap in a slice unless already a slice.
    #[must_use]
    pub fn ensure_slice(&self) -> TypeExpr {
        if self.is_slice() {
            self.clone()
        } else {
            self.clone().into_slice()
        }
    }

    /// Collapse any expression embedding `@any` into bare `@any`.
    ///
    /// Slice-of-optional needs no rewriting here: wrappers are stored
    /// as flag and depth, so it is already optional-of-slice.
    #[must_use]
    pub fn normalized(self) -> TypeExpr {
        if self.embeds_wildcard() {
            TypeExpr::any()
        } else {
            self
        }
    }

    fn embeds_wildcard(&self) -> bool {
        match &self.base {
            TypeBase::Any => true,
            TypeBase::Named(token) => token.contains("@any"),
            TypeBase::TypeList(types) => types.iter().any(TypeExpr::embeds_wildcard),
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            f.write_str("?")?;
        }
        for _ in 0..self.slice_depth {
            f.write_str(SLICE_MARKER)?;
        }
        match &self.base {
            TypeBase::Named(token) => f.write_str(token),
            TypeBase::Any => f.write_str("@any"),
            TypeBase::Number => f.write_str("@number"),
            TypeBase::Single => f.write_str("@single"),
            TypeBase::From(slots) => {
                f.write_str("@from[")?;
                write_joined(f, slots)?;
                f.write_str("]")
            }
            TypeBase::TypeList(types) => {
                f.write_str("@type[")?;
                write_joined(f, types)?;
                f.write_str("]")
            }
            TypeBase::Untyped(kind) => f.write_str(kind.as_str()),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// An unwrapped expression over `base`.
impl From<TypeBase> for TypeExpr {
    fn from(base: TypeBase) -> Self {
        TypeExpr::bare(base)
    }
}

impl FromStr for TypeExpr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expr(s)
    }
}

// ========================================
// Parsing
// ========================================

fn parse_expr(text: &str) -> Result<TypeExpr, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut optional = false;
    let mut slice_depth: u8 = 0;
    let mut rest = text;
    loop {
        if let Some(r) = rest.strip_prefix(OPTIONAL_MARKER) {
            optional = true;
            rest = r;
        } else if let Some(r) = rest.strip_prefix(SLICE_MARKER) {
            slice_depth = slice_depth
                .checked_add(1)
                .ok_or_else(|| ParseError::SliceTooDeep(text.to_owned()))?;
            rest = r;
        } else {
            break;
        }
    }

    if rest.is_empty() {
        return Err(ParseError::MissingBase(text.to_owned()));
    }

    let base = parse_base(rest)?;
    let expr = TypeExpr {
        optional,
        slice_depth,
        base,
    };
    Ok(expr)
}

fn parse_base(text: &str) -> Result<TypeBase, ParseError> {
    match text {
        "@any" => return Ok(TypeBase::Any),
        "@number" => return Ok(TypeBase::Number),
        "@single" => return Ok(TypeBase::Single),
        "untyped int" => return Ok(TypeBase::Untyped(UntypedKind::Int)),
        "untyped float" => return Ok(TypeBase::Untyped(UntypedKind::Float)),
        "untyped string" => return Ok(TypeBase::Untyped(UntypedKind::String)),
        _ => {}
    }

    if let Some(args) = directive_args(text, "@from")? {
        let slots = split_top_level(args)
            .into_iter()
            .map(|name| SlotName::new(name.trim()))
            .collect::<Result<SmallVec<[SlotName; 2]>, _>>()?;
        return Ok(TypeBase::From(slots));
    }

    if let Some(args) = directive_args(text, "@type")? {
        let types = split_top_level(args)
            .into_iter()
            .map(parse_expr)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(TypeBase::TypeList(types));
    }

    if text.starts_with('@') {
        return Err(ParseError::UnknownDirective(text.to_owned()));
    }

    Ok(TypeBase::Named(text.to_owned()))
}

/// Extract the bracketed argument text of `name[...]`.
///
/// Returns `Ok(None)` when `text` is not this directive at all.
fn directive_args<'t>(text: &'t str, name: &str) -> Result<Option<&'t str>, ParseError> {
    let Some(rest) = text.strip_prefix(name) else {
        return Ok(None);
    };
    let Some(rest) = rest.strip_prefix('[') else {
        return Ok(None);
    };
    let Some(args) = rest.strip_suffix(']') else {
        return Err(ParseError::Unterminated(text.to_owned()));
    };
    if args.trim().is_empty() {
        return Err(ParseError::EmptyArguments(name.to_owned()));
    }
    Ok(Some(args))
}

/// Split on commas that are not nested inside brackets or braces.
fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&args[start..]);
    parts
}

#[cfg(test)]
mod tests;

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn ty(text: &str) -> TypeExpr {
    TypeExpr::parse(text).unwrap()
}

fn slot(name: &str) -> SlotName {
    SlotName::new(name).unwrap()
}

#[test]
fn parse_named_with_wrappers() {
    let t = ty("?[][]int64");
    assert!(t.is_optional());
    assert_eq!(t.slice_depth(), 2);
    assert_eq!(t.base(), &TypeBase::Named("int64".to_owned()));
}

#[test]
fn slice_of_optional_is_optional_of_slice() {
    assert_eq!(ty("[]?string"), ty("?[]string"));
    assert_eq!(ty("[]?string").to_string(), "?[]string");
}

#[test]
fn parse_simple_directives() {
    assert_eq!(ty("@any"), TypeExpr::any());
    assert_eq!(ty("@number"), TypeExpr::number());
    assert_eq!(ty("@single"), TypeExpr::single());
    assert_eq!(ty("untyped int"), TypeExpr::untyped(UntypedKind::Int));
    assert_eq!(ty("untyped float"), TypeExpr::untyped(UntypedKind::Float));
    assert_eq!(ty("untyped string"), TypeExpr::untyped(UntypedKind::String));
    assert_eq!(ty("[]@single"), TypeExpr::single().into_slice());
}

#[test]
fn parse_from_reference() {
    let t = ty("@from[left, right]");
    assert_eq!(
        t,
        TypeExpr::from_slots([slot("left"), slot("right")]).unwrap()
    );
    assert_eq!(t.to_string(), "@from[left,right]");
}

#[test]
fn parse_type_list_keeps_nested_brackets() {
    let t = ty("@type[map[string]int,[]byte]");
    let TypeBase::TypeList(types) = t.base() else {
        panic!("expected type list, got {t:?}");
    };
    assert_eq!(types, &vec![ty("map[string]int"), ty("[]byte")]);
}

#[test]
fn parse_errors() {
    assert_eq!(TypeExpr::parse(""), Err(ParseError::Empty));
    assert_eq!(TypeExpr::parse("   "), Err(ParseError::Empty));
    assert_eq!(
        TypeExpr::parse("?[]"),
        Err(ParseError::MissingBase("?[]".to_owned()))
    );
    assert_eq!(
        TypeExpr::parse("@from[a"),
        Err(ParseError::Unterminated("@from[a".to_owned()))
    );
    assert_eq!(
        TypeExpr::parse("@type[]"),
        Err(ParseError::EmptyArguments("@type".to_owned()))
    );
    assert_eq!(
        TypeExpr::parse("@many"),
        Err(ParseError::UnknownDirective("@many".to_owned()))
    );
    assert_eq!(
        TypeExpr::parse("@from[a,]"),
        Err(ParseError::InvalidSlotName(String::new()))
    );
}

#[test]
fn named_rejects_marked_tokens() {
    assert!(TypeExpr::named("int").is_ok());
    assert_eq!(
        TypeExpr::named("[]int"),
        Err(ParseError::InvalidToken("[]int".to_owned()))
    );
    assert_eq!(TypeExpr::named(""), Err(ParseError::Empty));
}

#[test]
fn display_round_trips_canonical_spellings() {
    for text in [
        "int",
        "?bool",
        "[]interface{}",
        "?[][]float64",
        "@any",
        "@from[a]",
        "@type[int,?string]",
        "untyped string",
    ] {
        assert_eq!(ty(text).to_string(), text);
    }
}

#[test]
fn numeric_kinds() {
    for kind in NUMERIC_KINDS {
        assert!(ty(kind).is_numeric(), "{kind} should be numeric");
    }
    assert!(!ty("string").is_numeric());
    assert!(!ty("[]int").is_numeric());
    assert!(!ty("?int").is_numeric());
    assert!(!ty("complex128").is_numeric());
}

#[test]
fn empty_interface_spellings() {
    assert!(ty("interface{}").is_empty_interface());
    assert!(ty("[]interface{}").is_empty_interface());
    assert!(!ty("[][]interface{}").is_empty_interface());
    assert!(!ty("?interface{}").is_empty_interface());
    assert!(!ty("any").is_empty_interface());
}

#[test]
fn wildcard_and_optional_bool() {
    assert!(ty("@any").is_wildcard());
    assert!(ty("[]@any").is_wildcard());
    assert!(ty("?bool").is_optional_bool());
    assert!(!ty("bool").is_optional_bool());
    assert!(!ty("?[]bool").is_optional_bool());
}

#[test]
fn slice_helpers() {
    assert_eq!(ty("[][]int").trim_slice(), ty("[]int"));
    assert_eq!(ty("int").trim_slice(), ty("int"));
    assert_eq!(ty("int").ensure_slice(), ty("[]int"));
    assert_eq!(ty("[]int").ensure_slice(), ty("[]int"));
    assert_eq!(ty("?[]int").trim_optional(), ty("[]int"));
    assert_eq!(ty("int").into_optional(), ty("?int"));
}

#[test]
fn normalization_collapses_wildcard() {
    assert_eq!(ty("[]@any").normalized(), TypeExpr::any());
    assert_eq!(ty("?[]@any").normalized(), TypeExpr::any());
    assert_eq!(ty("@type[int,@any]").normalized(), TypeExpr::any());
    assert_eq!(ty("[]int").normalized(), ty("[]int"));
}

#[test]
fn resolved_means_concrete_and_required() {
    assert!(ty("[]string").is_resolved());
    assert!(!ty("?string").is_resolved());
    assert!(!ty("@number").is_resolved());
    assert!(!ty("[]@single").is_resolved());
}

#[test]
fn slot_name_validation() {
    assert!(SlotName::new("input_0").is_ok());
    assert_eq!(
        SlotName::new("a,b"),
        Err(ParseError::InvalidSlotName("a,b".to_owned()))
    );
    assert!(SlotName::new("").is_err());
    assert!(SlotName::new("has space").is_err());
}

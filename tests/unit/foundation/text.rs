use super::*;

#[test]
fn join_skips_empty_fragments() {
    assert_eq!(join_fragments(["a", "", "b", ""]), "a, b");
    assert_eq!(join_fragments(Vec::<&str>::new()), "");
    assert_eq!(join_fragments(["", ""]), "");
}

#[test]
fn placeholder_uppercases_role_id() {
    assert_eq!(placeholder_for("r1"), "[R1]");
    assert_eq!(placeholder_for("hero2"), "[HERO2]");
}

#[test]
fn replace_first_leaves_later_duplicates() {
    let out = replace_first("[R1] and [R1]", "[R1]", "(x)");
    assert_eq!(out, "(x) and [R1]");
}

#[test]
fn replacement_text_is_literal() {
    let out = replace_first("a [R1]", "[R1]", "($0 $&)");
    assert_eq!(out, "a ($0 $&)");
}

#[test]
fn strip_removes_only_uppercase_tokens() {
    let out = strip_placeholders("a [R1], [R22] [r3] [] [A-B] b");
    assert_eq!(out, "a ,  [r3] [] [A-B] b");
    assert!(!has_placeholder(&out));
}

#[test]
fn placeholders_are_listed_in_order() {
    assert_eq!(
        placeholders_in("[R2] x [R1] y [R2]"),
        vec!["[R2]", "[R1]", "[R2]"]
    );
}

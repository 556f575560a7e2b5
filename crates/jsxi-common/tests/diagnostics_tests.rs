use jsxi_common::diagnostics::{
    Diagnostic, DiagnosticCategory, diagnostic_codes, get_diagnostic_category,
    get_message_template,
};
use jsxi_common::format_message;

#[test]
fn formats_positional_arguments() {
    let template = get_message_template(diagnostic_codes::INTRINSIC_JSX_ELEMENT_DOES_NOT_EXIST_IN_FACTORY)
        .expect("template should exist");
    assert_eq!(
        format_message(template, &["blink", "createElement"]),
        "Intrinsic JSX element 'blink' does not exist in factory 'createElement'"
    );
}

#[test]
fn repeated_placeholders_are_all_replaced() {
    let diag = Diagnostic::from_code(
        "a.tsx".to_string(),
        3,
        8,
        diagnostic_codes::ARE_SPECIFIED_TWICE_THE_ATTRIBUTE_NAMED_WILL_BE_OVERWRITTEN,
        &["children"],
    );
    assert_eq!(
        diag.message_text,
        "'children' are specified twice. The attribute named 'children' will be overwritten."
    );
    assert_eq!(diag.category, DiagnosticCategory::Warning);
    assert!(!diag.is_error());
}

#[test]
fn every_code_has_a_category() {
    for code in [
        diagnostic_codes::CANNOT_USE_JSX_UNLESS_THE_JSX_FLAG_IS_PROVIDED,
        diagnostic_codes::NO_JSX_INTRINSIC_FACTORY_DEFINED,
        diagnostic_codes::INVALID_JSX_INTRINSIC_FACTORY,
        diagnostic_codes::THE_GLOBAL_TYPE_JSX_MAY_NOT_HAVE_MORE_THAN_ONE_PROPERTY,
    ] {
        assert_eq!(get_diagnostic_category(code), Some(DiagnosticCategory::Error));
    }
    assert_eq!(get_diagnostic_category(1), None);
}

#[test]
fn unknown_code_falls_back_to_generic_text() {
    let diag = Diagnostic::from_code("a.tsx".to_string(), 0, 0, 99999, &[]);
    assert_eq!(diag.message_text, "Unexpected checker diagnostic code.");
    assert!(diag.is_error());
}

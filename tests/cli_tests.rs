// tests/cli_tests.rs

use filterql::cli::{
    CliError, CompileOptions, DocCategory, Emit, execute_check, execute_compile,
    get_doc_category, get_docs_overview, list_fields,
};

fn compile(query: &str, emit: Emit, pretty: bool) -> Result<String, CliError> {
    execute_compile(&CompileOptions {
        query: query.to_string(),
        emit,
        pretty,
    })
}

// ============================================================================
// Compile
// ============================================================================

#[test]
fn test_compile_filter_is_default() {
    let options = CompileOptions {
        query: "a.b == 1".to_string(),
        ..Default::default()
    };
    assert_eq!(execute_compile(&options).unwrap(), r#"{"a":{"b":{"$eq":1}}}"#);
}

#[test]
fn test_compile_filter_pretty() {
    assert_eq!(
        compile("a == 1", Emit::Filter, true).unwrap(),
        "{\n  \"a\": {\n    \"$eq\": 1\n  }\n}"
    );
}

#[test]
fn test_compile_json_quotes_regex() {
    assert_eq!(
        compile("name ~ 'Jo'", Emit::Json, false).unwrap(),
        r#"{"name":{"$regex":"/^Jo/"}}"#
    );
}

#[test]
fn test_compile_tokens() {
    let output = compile("a in [1]", Emit::Tokens, false).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "identifier   a");
    assert_eq!(lines[1], "operator     in");
    assert_eq!(lines[2], "array        [");
    assert_eq!(lines[3], "literal      1");
}

#[test]
fn test_compile_ast() {
    assert_eq!(
        compile("A==5&&!B==6||(c in[1,2])", Emit::Ast, false).unwrap(),
        "A == 5 and not B == 6 or c in [1, 2]"
    );

    let debug = compile("a == 1", Emit::Ast, true).unwrap();
    assert!(debug.starts_with("Clause {"));
}

#[test]
fn test_compile_reports_stage_errors() {
    let err = compile("a == 'x", Emit::Tokens, false).unwrap_err();
    assert!(matches!(err, CliError::Query(filterql::Error::Lex(_))));

    // Tokens mode stops before parsing
    assert!(compile("a == == 1", Emit::Tokens, false).is_ok());
    assert!(compile("a == == 1", Emit::Ast, false).is_err());

    // Ast mode stops before conversion
    assert!(compile("a in 5", Emit::Ast, false).is_ok());
    let err = compile("a in 5", Emit::Filter, false).unwrap_err();
    assert!(err.to_string().starts_with("Conversion error: "));
}

#[test]
fn test_emit_from_str() {
    assert_eq!(Emit::from_str("TOKENS"), Some(Emit::Tokens));
    assert_eq!(Emit::from_str("tree"), Some(Emit::Ast));
    assert_eq!(Emit::from_str("json"), Some(Emit::Json));
    assert_eq!(Emit::from_str("yaml"), None);
}

// ============================================================================
// Check and Fields
// ============================================================================

#[test]
fn test_check() {
    assert!(execute_check("a == 1 or b != null").is_ok());
    assert!(execute_check("a == 1 or").is_err());
    assert!(execute_check("a not-in 'x'").is_err());
}

#[test]
fn test_list_fields_deduplicates() {
    assert_eq!(
        list_fields("user.age > 1 and (user.name ~ 'x' or user.age < 9)").unwrap(),
        vec!["user.age".to_string(), "user.name".to_string()]
    );
}

// ============================================================================
// Docs
// ============================================================================

#[test]
fn test_docs_overview_lists_categories() {
    let overview = get_docs_overview();
    for category in ["syntax", "operators", "logic", "literals", "output"] {
        assert!(overview.contains(category), "missing {}", category);
        assert!(get_doc_category(category).is_ok());
    }
}

#[test]
fn test_doc_category_aliases() {
    assert_eq!(DocCategory::from_str("ops"), Some(DocCategory::Operators));
    assert_eq!(DocCategory::from_str("Precedence"), Some(DocCategory::Logic));
    assert_eq!(get_doc_category("ops").unwrap(), get_doc_category("operators").unwrap());
}

#[test]
fn test_unknown_doc_category() {
    let err = get_doc_category("nope").unwrap_err();
    assert!(matches!(err, CliError::UnknownCategory(ref c) if c == "nope"));
    assert!(err.to_string().contains("filterql docs"));
}

//! # Value Normalizer Unit Tests
//!
//! Verifies that YAML string scalars are unwrapped and that everything else
//! passes through untouched.

use kms_secrets_controller::controller::reconciler::normalize::normalize_value;

#[test]
fn test_double_quoted_scalar_unwraps() {
    assert_eq!(normalize_value(b"\"apikey\""), b"apikey");
}

#[test]
fn test_single_quoted_scalar_unwraps() {
    assert_eq!(normalize_value(b"'apikey'"), b"apikey");
}

#[test]
fn test_plain_scalar_is_unchanged() {
    assert_eq!(normalize_value(b"apikey"), b"apikey");
}

#[test]
fn test_trailing_newline_is_stripped() {
    // CLI tools emit a document-final newline; the scalar content has none
    assert_eq!(normalize_value(b"\"apikey\"\n"), b"apikey");
}

#[test]
fn test_escaped_sequences_are_decoded() {
    assert_eq!(normalize_value(b"\"line1\\nline2\""), b"line1\nline2");
}

#[test]
fn test_literal_block_scalar_unwraps() {
    // Literal block scalars keep their final newline as content
    assert_eq!(normalize_value(b"|\n  apikey\n"), b"apikey\n");
}

#[test]
fn test_folded_block_scalar_unwraps() {
    assert_eq!(normalize_value(b">\n  apikey\n"), b"apikey\n");
}

#[test]
fn test_numeric_document_is_unchanged() {
    // A bare number is not a string scalar; the raw bytes survive
    assert_eq!(normalize_value(b"123"), b"123");
}

#[test]
fn test_mapping_document_passes_through() {
    let raw: &[u8] = b"username: admin\npassword: hunter2\n";
    assert_eq!(normalize_value(raw), raw);
}

#[test]
fn test_sequence_document_passes_through() {
    let raw: &[u8] = b"- one\n- two\n";
    assert_eq!(normalize_value(raw), raw);
}

#[test]
fn test_invalid_utf8_passes_through() {
    let raw = [0x00u8, 0x9f, 0x92, 0x96];
    assert_eq!(normalize_value(&raw), raw);
}

#[test]
fn test_malformed_yaml_passes_through() {
    // Unterminated quote is not an error, just not a wrapped scalar
    let raw: &[u8] = b"\"unterminated";
    assert_eq!(normalize_value(raw), raw);
}

#[test]
fn test_empty_input_passes_through() {
    assert_eq!(normalize_value(b""), b"");
}

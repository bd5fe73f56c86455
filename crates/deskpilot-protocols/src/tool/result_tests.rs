use super::*;

#[test]
fn test_tool_result_success() {
    let result = ToolResult::success("OK");
    assert_eq!(result.output, "OK");
    assert!(!result.has_error());
    assert!(!result.has_image());
}

#[test]
fn test_tool_result_failure() {
    let result = ToolResult::failure("Something went wrong");
    assert!(result.output.is_empty());
    assert_eq!(result.error, "Something went wrong");
    assert!(result.has_error());
}

#[test]
fn test_tool_result_default_is_empty() {
    let result = ToolResult::default();
    assert!(result.output.is_empty());
    assert!(result.error.is_empty());
    assert!(result.base64_image.is_none());
}

#[test]
fn test_replace_overrides_only_supplied_fields() {
    let original = ToolResult::new("120, 45", "warn", Some("aW1n".to_string()));
    let replaced = original.replace(ToolResultPatch::output("X=117,Y=44"));

    assert_eq!(replaced.output, "X=117,Y=44");
    assert_eq!(replaced.error, "warn");
    assert_eq!(replaced.base64_image.as_deref(), Some("aW1n"));
}

#[test]
fn test_replace_leaves_receiver_untouched() {
    let original = ToolResult::success("before");
    let replaced = original.replace(ToolResultPatch::output("after").with_error("oops"));

    assert_eq!(original.output, "before");
    assert!(original.error.is_empty());
    assert_eq!(replaced.output, "after");
    assert_eq!(replaced.error, "oops");
}

#[test]
fn test_replace_with_empty_patch_is_identity() {
    let original = ToolResult::new("out", "err", Some("aW1n".to_string()));
    assert_eq!(original.replace(ToolResultPatch::default()), original);
}

#[test]
fn test_replace_image() {
    let original = ToolResult::success("done");
    let replaced = original.replace(ToolResultPatch::image("bmV3"));
    assert_eq!(replaced.output, "done");
    assert_eq!(replaced.base64_image.as_deref(), Some("bmV3"));
}

#[test]
fn test_with_image() {
    let result = ToolResult::success("OK").with_image("aW1n");
    assert!(result.has_image());
    assert_eq!(result.output, "OK");
}

#[test]
fn test_tool_result_serialization_skips_missing_image() {
    let result = ToolResult::success("OK");
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"output\":\"OK\""));
    assert!(!json.contains("base64_image"));
}

#[test]
fn test_tool_result_deserialization_with_defaults() {
    let json = r#"{"output":"OK"}"#;
    let result: ToolResult = serde_json::from_str(json).unwrap();
    assert_eq!(result.output, "OK");
    assert!(result.error.is_empty());
    assert!(result.base64_image.is_none());
}

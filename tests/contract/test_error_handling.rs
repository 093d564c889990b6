use cwl2nxf::core::{self, AppError, ErrorCategory, ErrorSeverity, RenderConfig};

const BASE: &str = r#"
class: CommandLineTool
id: tool
baseCommand: [tool]
requirements:
  - class: DockerRequirement
    dockerPull: img:1
inputs:
  value:
    type: int
outputs: {}
"#;

fn convert(text: &str) -> Result<String, AppError> {
    core::convert_str(text, None, &RenderConfig::default())
}

#[test]
fn base_descriptor_converts() {
    assert!(convert(BASE).is_ok());
}

#[test]
fn missing_inputs_is_reported_by_field() {
    let err = convert(&BASE.replace("inputs:", "params:")).unwrap_err();
    assert_eq!(err.category, ErrorCategory::MissingField);
    assert_eq!(err.context.get("field").map(String::as_str), Some("inputs"));
    assert_eq!(err.severity, ErrorSeverity::Error);
}

#[test]
fn missing_base_command_is_reported() {
    let err = convert(&BASE.replace("baseCommand: [tool]", "arguments: [tool]")).unwrap_err();
    assert_eq!(err.category, ErrorCategory::MissingField);
    assert!(err.to_string().contains("baseCommand"));
}

#[test]
fn unresolved_container_is_a_hard_failure() {
    let err = convert(&BASE.replace("dockerPull: img:1", "dockerImageId: img")).unwrap_err();
    assert_eq!(err.category, ErrorCategory::UnresolvedContainer);
    assert_eq!(err.code, "UNRESOLVED_CONTAINER");
}

#[test]
fn unsupported_types_are_rejected() {
    for type_name in ["Directory", "string[]", "Any", "enum"] {
        let err = convert(&BASE.replace("type: int", &format!("type: {}", type_name)))
            .unwrap_err();
        assert_eq!(err.category, ErrorCategory::UnsupportedType, "{}", type_name);
        assert!(err.message.contains(type_name));
    }
}

#[test]
fn invalid_position_is_rejected() {
    let text = BASE.replace(
        "type: int\n",
        "type: int\n    inputBinding:\n      position: $(1 + 1)\n",
    );
    let err = convert(&text).unwrap_err();
    assert_eq!(err.category, ErrorCategory::InvalidValue);
    assert!(err.message.contains("inputs.value.inputBinding.position"));
}

#[test]
fn unusable_process_id_is_rejected() {
    let err = convert(&BASE.replace("id: tool", "id: '---'")).unwrap_err();
    assert_eq!(err.category, ErrorCategory::InvalidValue);
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = convert("inputs: {reads: File\n").unwrap_err();
    assert_eq!(err.category, ErrorCategory::ParseError);
}

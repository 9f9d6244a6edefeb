//! Tool domain traits
//!
//! Pure validation of a call against its definition. The async executor
//! port lives in the application layer.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks required parameters are present, no unknown parameters are
/// passed, and enumerated parameters carry one of their allowed values.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let value = call.arguments.get(&param.name);
            if param.required && value.is_none_or(|v| v.is_null()) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
            if !param.allowed_values.is_empty()
                && let Some(v) = value.and_then(|v| v.as_str())
                && !param.allowed_values.iter().any(|a| a == v)
            {
                return Err(format!(
                    "Invalid value '{}' for parameter '{}' of tool '{}' (expected one of: {})",
                    v,
                    param.name,
                    definition.name,
                    param.allowed_values.join(", ")
                ));
            }
        }

        for arg_name in call.arguments.keys() {
            if !definition.parameters.iter().any(|p| &p.name == arg_name) {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ToolEffect, ToolParameter};

    fn write_definition() -> ToolDefinition {
        ToolDefinition::new("write_readme", "write", ToolEffect::FileWrite)
            .with_parameter(ToolParameter::new("content", "Markdown", true))
            .with_parameter(
                ToolParameter::new("mode", "overwrite or append", false)
                    .with_allowed_values(["overwrite", "append"]),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("write_readme");
        let result = DefaultToolValidator.validate(&call, &write_definition());
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("write_readme")
            .with_arg("content", "# Title")
            .with_arg("colour", "blue");
        let result = DefaultToolValidator.validate(&call, &write_definition());
        assert!(result.unwrap_err().contains("Unknown parameter"));
    }

    #[test]
    fn test_validator_rejects_value_outside_enum() {
        let call = ToolCall::new("write_readme")
            .with_arg("content", "# Title")
            .with_arg("mode", "prepend");
        let result = DefaultToolValidator.validate(&call, &write_definition());
        assert!(result.unwrap_err().contains("expected one of: overwrite, append"));
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("write_readme")
            .with_arg("content", "# Title")
            .with_arg("mode", "append");
        assert!(DefaultToolValidator.validate(&call, &write_definition()).is_ok());
    }
}

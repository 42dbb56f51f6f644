//! Tool descriptors consumed by the classifier
//!
//! The classifier only ever reads a tool's name and description. Callers that
//! already have their own tool type (an MCP client tool, an agent framework
//! tool definition) implement [`ToolMetadata`] for it instead of converting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ClassifierError, Result};

/// Read-only view of a tool used for classification
pub trait ToolMetadata {
    /// Stable identifier, matched exactly
    fn name(&self) -> &str;

    /// Free-text description, may be empty
    fn description(&self) -> &str;
}

impl<T: ToolMetadata + ?Sized> ToolMetadata for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

/// A discovered tool: name + description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl ToolMetadata for ToolDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepted shapes of a tool list document
#[derive(Deserialize)]
#[serde(untagged)]
enum RawToolList {
    Bare(Vec<ToolDescriptor>),
    /// MCP `tools/list` result
    Wrapped { tools: Vec<ToolDescriptor> },
}

/// Parse a tool list from JSON
///
/// Accepts either a bare array of `{name, description}` objects or an object
/// with a `tools` array (the MCP `tools/list` result shape). Unknown fields such
/// as `inputSchema` are ignored.
pub fn parse_tool_list(json: &str) -> Result<Vec<ToolDescriptor>> {
    let raw: RawToolList =
        serde_json::from_str(json).map_err(|e| ClassifierError::InvalidToolList {
            message: e.to_string(),
        })?;

    let tools = match raw {
        RawToolList::Bare(tools) => tools,
        RawToolList::Wrapped { tools } => tools,
    };

    if let Some(tool) = tools.iter().find(|t| t.name.trim().is_empty()) {
        return Err(ClassifierError::InvalidToolList {
            message: format!("tool with empty name (description: {:?})", tool.description),
        });
    }

    Ok(tools)
}

/// Load a tool list from a JSON file
pub fn load_tool_list(path: &Path) -> Result<Vec<ToolDescriptor>> {
    let content = fs::read_to_string(path)?;
    parse_tool_list(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let tools = parse_tool_list(
            r#"[
                {"name": "book_meeting_room", "description": "預約會議室。"},
                {"name": "ping_server", "description": "health check"}
            ]"#,
        )
        .unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "book_meeting_room");
        assert_eq!(tools[1].description, "health check");
    }

    #[test]
    fn test_parse_mcp_tools_list_result() {
        let tools = parse_tool_list(
            r#"{
                "tools": [
                    {
                        "name": "cancel_reservation",
                        "description": "取消會議室預約。",
                        "inputSchema": {"type": "object"}
                    }
                ],
                "nextCursor": null
            }"#,
        )
        .unwrap();
        assert_eq!(tools, vec![ToolDescriptor::new("cancel_reservation", "取消會議室預約。")]);
    }

    #[test]
    fn test_missing_or_null_description_is_empty() {
        let tools =
            parse_tool_list(r#"[{"name": "a"}, {"name": "b", "description": null}]"#).unwrap();
        assert_eq!(tools[0].description, "");
        assert_eq!(tools[1].description, "");
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let err = parse_tool_list(r#"{"name": "lonely"}"#).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidToolList { .. }));
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = parse_tool_list(r#"[{"name": "  ", "description": "x"}]"#).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidToolList { .. }));
    }

    #[test]
    fn test_load_tool_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.json");
        fs::write(&path, r#"[{"name": "list_rooms", "description": "list"}]"#).unwrap();

        let tools = load_tool_list(&path).unwrap();
        assert_eq!(tools[0].name(), "list_rooms");
    }
}

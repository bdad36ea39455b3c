//! Tool Registry - the list of every tool the server exposes.

use rmcp::model::Tool;

use super::definitions::{
    AddAaaaRecordTool, AddARecordTool, AddCaaRecordTool, AddCnameRecordTool, AddMxRecordTool,
    AddNsRecordTool, AddSrvRecordTool, AddTxtRecordTool, ClearZoneTool, GetRecordsTool,
    RemoveRecordTool, UpdateRecordsTool, UpdateSoaTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            GetRecordsTool::NAME,
            AddARecordTool::NAME,
            AddAaaaRecordTool::NAME,
            AddCnameRecordTool::NAME,
            AddMxRecordTool::NAME,
            AddTxtRecordTool::NAME,
            AddNsRecordTool::NAME,
            AddSrvRecordTool::NAME,
            AddCaaRecordTool::NAME,
            RemoveRecordTool::NAME,
            UpdateRecordsTool::NAME,
            UpdateSoaTool::NAME,
            ClearZoneTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetRecordsTool::to_tool(),
            AddARecordTool::to_tool(),
            AddAaaaRecordTool::to_tool(),
            AddCnameRecordTool::to_tool(),
            AddMxRecordTool::to_tool(),
            AddTxtRecordTool::to_tool(),
            AddNsRecordTool::to_tool(),
            AddSrvRecordTool::to_tool(),
            AddCaaRecordTool::to_tool(),
            RemoveRecordTool::to_tool(),
            UpdateRecordsTool::to_tool(),
            UpdateSoaTool::to_tool(),
            ClearZoneTool::to_tool(),
        ]
    }
}

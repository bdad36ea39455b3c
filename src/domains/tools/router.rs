//! Tool Router - builds the rmcp ToolRouter from the tool definitions.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AddAaaaRecordTool, AddARecordTool, AddCaaRecordTool, AddCnameRecordTool, AddMxRecordTool,
    AddNsRecordTool, AddSrvRecordTool, AddTxtRecordTool, ClearZoneTool, GetRecordsTool,
    RemoveRecordTool, UpdateRecordsTool, UpdateSoaTool,
};
use crate::domains::registrar::RegistrarApi;

/// Build the tool router with all registered tools, sharing one registrar client.
pub fn build_tool_router<S>(api: Arc<dyn RegistrarApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetRecordsTool::create_route(api.clone()))
        .with_route(AddARecordTool::create_route(api.clone()))
        .with_route(AddAaaaRecordTool::create_route(api.clone()))
        .with_route(AddCnameRecordTool::create_route(api.clone()))
        .with_route(AddMxRecordTool::create_route(api.clone()))
        .with_route(AddTxtRecordTool::create_route(api.clone()))
        .with_route(AddNsRecordTool::create_route(api.clone()))
        .with_route(AddSrvRecordTool::create_route(api.clone()))
        .with_route(AddCaaRecordTool::create_route(api.clone()))
        .with_route(RemoveRecordTool::create_route(api.clone()))
        .with_route(UpdateRecordsTool::create_route(api.clone()))
        .with_route(UpdateSoaTool::create_route(api.clone()))
        .with_route(ClearZoneTool::create_route(api))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::registrar::mock::MockRegistrar;

    struct TestServer {}

    fn test_api() -> Arc<dyn RegistrarApi> {
        Arc::new(MockRegistrar::succeeding())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_api());
        let tools = router.list_all();
        assert_eq!(tools.len(), 13);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"regru_get_dns_records"));
        assert!(names.contains(&"regru_add_srv_record"));
        assert!(names.contains(&"regru_update_records"));
        assert!(names.contains(&"regru_clear_zone"));
    }

    #[test]
    fn test_registry_matches_router() {
        let registry_names = ToolRegistry::tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(test_api());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}

//! Generic zone tool runner.
//!
//! Every tool follows the same path: deserialize the arguments into its
//! parameter struct, validate them, make exactly one registrar call, and
//! render the outcome. [`ZoneOperation`] captures what differs between tools;
//! [`ZoneTool`] is the one runner they all share.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool, ToolAnnotations},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use super::common::error_result;
use crate::domains::registrar::{ApiResponse, RegistrarApi, RegistrarResult};
use crate::domains::tools::ToolError;

/// Behavior hints published with a tool.
///
/// Every zone tool talks to a remote service, so the open-world hint is
/// always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolHints {
    pub read_only: bool,
    pub destructive: bool,
    pub idempotent: bool,
}

impl ToolHints {
    pub const READ_ONLY: Self = Self {
        read_only: true,
        destructive: false,
        idempotent: true,
    };

    /// Additive change that can be repeated safely.
    pub const ADDITIVE: Self = Self {
        read_only: false,
        destructive: false,
        idempotent: true,
    };

    pub const DESTRUCTIVE: Self = Self {
        read_only: false,
        destructive: true,
        idempotent: true,
    };
}

/// One registrar operation exposed as a tool.
#[async_trait]
pub trait ZoneOperation: DeserializeOwned + JsonSchema + Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;
    const TITLE: &'static str;
    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;
    const HINTS: ToolHints;

    /// Domain the call targets.
    fn domain(&self) -> &str;

    /// Check constraints the type system does not express.
    fn validate(&self) -> Result<(), ToolError>;

    /// Make the registrar call.
    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse>;

    /// Text returned on success.
    fn summary(&self, response: &ApiResponse) -> String;

    /// Machine-readable copy of the result, if the tool publishes one.
    fn structured(&self, _response: &ApiResponse) -> Option<serde_json::Value> {
        None
    }

    fn output_schema() -> Option<Arc<JsonObject>> {
        None
    }
}

/// Tool adapter around a [`ZoneOperation`].
pub struct ZoneTool<P>(PhantomData<P>);

impl<P: ZoneOperation> ZoneTool<P> {
    pub const NAME: &'static str = P::NAME;

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        let annotations = ToolAnnotations::with_title(P::TITLE)
            .read_only(P::HINTS.read_only)
            .destructive(P::HINTS.destructive)
            .idempotent(P::HINTS.idempotent)
            .open_world(true);

        Tool {
            name: P::NAME.into(),
            description: Some(P::DESCRIPTION.into()),
            input_schema: schema_for_type::<P>().into(),
            annotations: Some(annotations),
            output_schema: P::output_schema(),
            icons: None,
            meta: None,
            title: Some(P::TITLE.into()),
        }
    }

    /// Deserialize and validate raw tool arguments.
    pub fn parse(arguments: JsonObject) -> Result<P, ToolError> {
        let params: P = serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Run one validated call against the registrar.
    #[instrument(skip_all, fields(tool = P::NAME, domain = %params.domain()))]
    pub async fn execute(params: &P, api: &dyn RegistrarApi) -> CallToolResult {
        match params.submit(api).await {
            Ok(response) => {
                info!("{} succeeded", P::NAME);
                CallToolResult {
                    content: vec![Content::text(params.summary(&response))],
                    structured_content: params.structured(&response),
                    is_error: Some(false),
                    meta: None,
                }
            }
            Err(e) => {
                warn!("{} failed: {}", P::NAME, e);
                error_result(e.user_message())
            }
        }
    }

    /// Handle a raw tool call. Never fails: every problem becomes an error result.
    pub async fn call(arguments: JsonObject, api: &dyn RegistrarApi) -> CallToolResult {
        match Self::parse(arguments) {
            Ok(params) => Self::execute(&params, api).await,
            Err(e) => {
                warn!("{} rejected arguments: {}", P::NAME, e);
                error_result(e.user_message())
            }
        }
    }

    /// Create a ToolRoute bound to the shared registrar client.
    pub fn create_route<S>(api: Arc<dyn RegistrarApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let api = api.clone();
            async move { Ok::<_, McpError>(Self::call(args, api.as_ref()).await) }.boxed()
        })
    }
}

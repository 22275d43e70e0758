//! MCP Server for catalog-mcp
//!
//! MCP Protocol (stdio) <-> application::CatalogService / CardRenderer
//!
//! 7 tools: book_add, book_remove, catalog_list, catalog_sort, catalog_filter,
//! page_style, feature_toggle

use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::render::CardRenderer;
use crate::application::service::CatalogService;
use crate::domain::model::book::Book;
use crate::domain::model::page::{FontSize, PageSettings};
use crate::infra::json_store::JsonCatalogRepository;

// =============================================================================
// Public entry point
// =============================================================================

/// MCP Serverを起動する。catalog_pathはBook配列を保持する単一JSONファイル。
pub async fn run(catalog_path: PathBuf) -> anyhow::Result<()> {
    let service = CatalogService::open(JsonCatalogRepository::new(catalog_path))?;
    let server = CatalogMcpServer::new(service);
    let running = server.serve(stdio()).await?;
    running.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct CatalogMcpServer {
    service: Arc<RwLock<CatalogService<JsonCatalogRepository>>>,
    page: Arc<RwLock<PageSettings>>,
    tool_router: ToolRouter<Self>,
}

impl CatalogMcpServer {
    fn new(service: CatalogService<JsonCatalogRepository>) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
            page: Arc::new(RwLock::new(PageSettings::new())),
            tool_router: Self::tool_router(),
        }
    }

    fn service_read(
        &self,
    ) -> Result<RwLockReadGuard<'_, CatalogService<JsonCatalogRepository>>, McpError> {
        self.service
            .read()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    fn service_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, CatalogService<JsonCatalogRepository>>, McpError> {
        self.service
            .write()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    fn page_write(&self) -> Result<RwLockWriteGuard<'_, PageSettings>, McpError> {
        self.page
            .write()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    /// AppError → MCPエラー。検証エラーはalert相当のinvalid_paramsにし、
    /// 原因フィールドがあれば案内を添える（focus復帰相当）。
    fn to_mcp_error(e: AppError) -> McpError {
        match e {
            AppError::Domain(domain) => {
                let focus = domain
                    .field()
                    .map(|f| format!(" — check the `{f}` field"))
                    .unwrap_or_default();
                McpError::invalid_params(format!("{domain}{focus}"), None)
            }
            AppError::Storage(_) => McpError::internal_error(format!("{e}"), None),
        }
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for CatalogMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "catalog-mcp".to_string(),
                title: Some("Catalog MCP — Book Catalog Manager".to_string()),
                description: Some(
                    "Book catalog with positional indices. \
                     Every mutation persists the whole catalog and re-renders the card list."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage a book catalog (name, price, image URL).\n\
                 \n\
                 Intended flow: `catalog_list` to see cards with their indices, \
                 `book_add` / `book_remove` to mutate (persisted immediately), \
                 `catalog_sort` to reorder, `catalog_filter` for a price-range view. \
                 `page_style` and `feature_toggle` adjust page-wide UI state \
                 unrelated to book data."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpBookAddRequest {
    #[schemars(description = "Book name (required, non-empty)")]
    pub name: String,
    #[schemars(description = "Book price (must be a positive number)")]
    pub price: f64,
    #[schemars(description = "Cover image URL (required, non-empty)")]
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpBookRemoveRequest {
    #[schemars(description = "Positional index from `catalog_list` output (0-based)")]
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpCatalogListRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpCatalogSortRequest {
    #[schemars(description = "Sort key: price or name")]
    pub by: String,
    #[schemars(description = "Sort order: asc (default) or desc")]
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpCatalogFilterRequest {
    #[schemars(description = "Lower price bound (inclusive, >= 0)")]
    pub min: f64,
    #[schemars(description = "Upper price bound (inclusive, >= min)")]
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpPageStyleRequest {
    #[schemars(
        description = "Background color name (e.g. 'beige'). Empty string resets. Omit to keep current."
    )]
    pub background: Option<String>,
    #[schemars(
        description = "Font size: small, medium, or large. Selecting the current size again deselects it. Omit to keep current."
    )]
    pub font_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpFeatureToggleRequest {
    #[schemars(description = "Feature label to toggle (checkbox behavior: first toggle checks it)")]
    pub feature: String,
}

// =============================================================================
// Parse helpers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Price,
    Name,
}

fn parse_sort_key(s: &str) -> Result<SortKey, McpError> {
    match s {
        "price" => Ok(SortKey::Price),
        "name" => Ok(SortKey::Name),
        other => Err(McpError::invalid_params(
            format!("Unknown sort key: '{other}'. Use: price, name"),
            None,
        )),
    }
}

/// order文字列 → ascending フラグ。省略時はasc。
fn parse_sort_order(s: Option<&str>) -> Result<bool, McpError> {
    match s {
        None | Some("asc") => Ok(true),
        Some("desc") => Ok(false),
        Some(other) => Err(McpError::invalid_params(
            format!("Unknown sort order: '{other}'. Use: asc, desc"),
            None,
        )),
    }
}

fn parse_font_size(s: &str) -> Result<FontSize, McpError> {
    match s {
        "small" => Ok(FontSize::Small),
        "medium" => Ok(FontSize::Medium),
        "large" => Ok(FontSize::Large),
        other => Err(McpError::invalid_params(
            format!("Unknown font size: '{other}'. Use: small, medium, large"),
            None,
        )),
    }
}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl CatalogMcpServer {
    #[tool(
        name = "book_add",
        description = "Add a book to the catalog. Validates name, price, and image URL (first failing field is reported), persists the whole catalog, and returns the re-rendered card list.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn book_add(
        &self,
        Parameters(req): Parameters<McpBookAddRequest>,
    ) -> Result<CallToolResult, McpError> {
        let book = Book::new(req.name, req.price, req.image_url)
            .map_err(|e| Self::to_mcp_error(AppError::Domain(e)))?;
        let name = book.name().to_string();

        let mut svc = self.service_write()?;
        svc.add_book(book).map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Added: [{}] {}\n\n{}",
            svc.len() - 1,
            name,
            CardRenderer::render(svc.books())
        ))]))
    }

    #[tool(
        name = "book_remove",
        description = "Remove the book at a positional index from `catalog_list` output. Indices shift after removal, so re-read the returned card list before removing again.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn book_remove(
        &self,
        Parameters(req): Parameters<McpBookRemoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut svc = self.service_write()?;
        let removed = svc.remove_book(req.index).map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Removed: [{}] {}\n\n{}",
            req.index,
            removed.name(),
            CardRenderer::render(svc.books())
        ))]))
    }

    #[tool(
        name = "catalog_list",
        description = "Render the current card list: one card per book with its positional index, price, image URL, and delete affordance. Run this first.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn catalog_list(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpCatalogListRequest>,
    ) -> Result<CallToolResult, McpError> {
        let svc = self.service_read()?;
        Ok(CallToolResult::success(vec![Content::text(
            CardRenderer::render(svc.books()),
        )]))
    }

    #[tool(
        name = "catalog_sort",
        description = "Sort the catalog in place by price (numeric) or name (case-insensitive). The new order shows in every later render; it reaches disk with the next add/remove.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn catalog_sort(
        &self,
        Parameters(req): Parameters<McpCatalogSortRequest>,
    ) -> Result<CallToolResult, McpError> {
        let key = parse_sort_key(&req.by)?;
        let ascending = parse_sort_order(req.order.as_deref())?;

        let mut svc = self.service_write()?;
        match key {
            SortKey::Price => svc.sort_by_price(ascending),
            SortKey::Name => svc.sort_by_name(ascending),
        }

        let direction = if ascending { "ascending" } else { "descending" };
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Sorted by {} ({direction}).\n\n{}",
            req.by,
            CardRenderer::render(svc.books())
        ))]))
    }

    #[tool(
        name = "catalog_filter",
        description = "Render only the books with price in [min, max]. The catalog itself is not modified. Rejects min > max or negative bounds and leaves the prior view unchanged.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn catalog_filter(
        &self,
        Parameters(req): Parameters<McpCatalogFilterRequest>,
    ) -> Result<CallToolResult, McpError> {
        let svc = self.service_read()?;
        let filtered = svc
            .filter_by_price(req.min, req.max)
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Filtered: {} of {} books with price in [{}, {}]\n\n{}",
            filtered.len(),
            svc.len(),
            req.min,
            req.max,
            CardRenderer::render(&filtered)
        ))]))
    }

    #[tool(
        name = "page_style",
        description = "Adjust page-wide style: background color and/or font size. Selecting the current font size again deselects it (radio deselect). Independent of book data, never persisted.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn page_style(
        &self,
        Parameters(req): Parameters<McpPageStyleRequest>,
    ) -> Result<CallToolResult, McpError> {
        let font_size = req.font_size.as_deref().map(parse_font_size).transpose()?;

        let mut page = self.page_write()?;
        if let Some(color) = req.background.as_deref() {
            page.set_background(color);
        }
        if let Some(size) = font_size {
            page.select_font_size(size);
        }

        Ok(CallToolResult::success(vec![Content::text(
            CardRenderer::render_page(&page),
        )]))
    }

    #[tool(
        name = "feature_toggle",
        description = "Toggle a page feature checkbox. The checked-feature list is rebuilt from scratch and returned with the rest of the page state. Independent of book data.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn feature_toggle(
        &self,
        Parameters(req): Parameters<McpFeatureToggleRequest>,
    ) -> Result<CallToolResult, McpError> {
        if req.feature.is_empty() {
            return Err(McpError::invalid_params("feature must not be empty", None));
        }

        let mut page = self.page_write()?;
        let checked = page.toggle_feature(&req.feature);

        let state = if checked { "checked" } else { "unchecked" };
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Feature '{}' {state}.\n\n{}",
            req.feature,
            CardRenderer::render_page(&page)
        ))]))
    }
}

// =============================================================================
// Tests
// =============================================================================

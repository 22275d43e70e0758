//! Book catalog manager as an MCP server.
//!
//! - `domain` — Book / Catalog / PageSettings と永続化抽象
//! - `application` — ユースケース（CatalogService）とカードレンダラ
//! - `infra` — JSONファイルによる永続化
//! - `interface` — MCP (stdio) サーバ

pub mod application;
pub mod domain;
pub mod infra;
pub mod interface;

pub mod error;
pub mod genai;
pub mod mcp_api;
pub mod redis;

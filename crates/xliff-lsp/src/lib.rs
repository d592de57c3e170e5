//! XLIFF Language Server Protocol implementation.
//!
//! This crate provides the LSP server for XLIFF files, wrapping
//! `xliff-lsp-core` with the tower-lsp framework.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          xliff-lsp                             │
//! │        tower-lsp wrapper, JSON-RPC/stdio, `xliff-lsp` binary   │
//! │                                                                │
//! │  ┌─────────────┐  ┌─────────────┐  ┌───────────────────────┐  │
//! │  │  server.rs  │  │ convert.rs  │  │    capabilities.rs    │  │
//! │  │LanguageServer│ │ Core ↔ LSP  │  │ Capability negotiation│  │
//! │  └──────┬──────┘  └──────┬──────┘  └───────────────────────┘  │
//! │         │                │                                     │
//! │         └────────────────┴──────────────────┐                  │
//! │                                             │                  │
//! │  ┌──────────────────────────────────────────▼───────────────┐  │
//! │  │                    xliff-lsp-core                         │  │
//! │  │     (outline, diagnostics, translation-memory completion) │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```bash
//! xliff-lsp --config xliff.toml
//! ```
//!
//! Or programmatically:
//!
//! ```rust,ignore
//! xliff_lsp::run_server(XliffConfig::default()).await?;
//! ```

pub mod capabilities;
pub mod convert;
pub mod server;

pub use server::run_server;

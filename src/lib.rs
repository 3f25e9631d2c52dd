//! cookbook-audit - compliance reporting for a Chef Infra Server
//!
//! This library lists every cookbook version on a Chef Infra Server, runs a
//! static analyzer over each one, looks up which nodes use it, and renders
//! the results as text or CSV. It can also report the node inventory.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`cookbook_analysis`): Cookbook versions, findings, records and nodes
//! - **Application Layer** (`application`): Aggregation use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Chef server client, cookstyle, formatters, console, filesystem
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cookbook_audit::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let pem = std::fs::read_to_string("/home/me/.chef/me.pem")?;
//! let signer = RequestSigner::from_pem("me", &pem)?;
//! let client = ChefServerClient::new(
//!     "https://chef.example.com/organizations/acme",
//!     signer,
//!     false,
//! )?;
//!
//! let use_case = AggregateCookbooksUseCase::new(
//!     client.clone(),
//!     client,
//!     CookstyleAnalyzer::default(),
//!     StderrProgressReporter::new(),
//! );
//! let report = use_case.execute(ReportOptions::default()).await?;
//!
//! let output = TextFormatter::summary().format(&report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod cookbook_analysis;
pub mod credentials;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::analyzer::CookstyleAnalyzer;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{
        CsvFormatter, ErrorSummaryFormatter, NodeTableFormatter, TextFormatter,
    };
    pub use crate::adapters::outbound::network::{ChefServerClient, RequestSigner};
    pub use crate::application::dto::{CookbookReport, NodeReport, OutputFormat, ReportOptions};
    pub use crate::application::use_cases::{AggregateCookbooksUseCase, AggregateNodesUseCase};
    pub use crate::cookbook_analysis::domain::{
        CatalogEntry, CookbookName, CookbookRecord, CookbookVersion, CookbookVersionRef,
        ErrorSummary, FileOffenses, NodeRaw, NodeReportItem, Offense, StageError, StageKind,
    };
    pub use crate::cookbook_analysis::services::NodeResolver;
    pub use crate::ports::outbound::{
        CookbookCatalog, CookbookReportFormatter, NodeReportFormatter, OutputPresenter,
        ProgressReporter, StaticAnalyzer, UsageIndex,
    };
    pub use crate::shared::Result;
}

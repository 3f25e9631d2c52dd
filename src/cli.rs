use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;

/// Compliance reports for cookbooks and nodes on a Chef Infra Server
#[derive(Parser, Debug)]
#[command(name = "cookbook-audit")]
#[command(version)]
#[command(about = "Compliance reports for cookbooks and nodes on a Chef Infra Server", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection options shared by every report
#[derive(ClapArgs, Debug, Default)]
pub struct GlobalArgs {
    /// Path to the Chef credentials file (defaults to ~/.chef/credentials)
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Client name used to sign requests
    #[arg(short = 'n', long, global = true)]
    pub client_name: Option<String>,

    /// Client key: path to a PEM file
    #[arg(short = 'k', long, global = true, value_name = "FILE")]
    pub client_key: Option<String>,

    /// Chef Infra Server URL including the organization
    #[arg(short = 's', long, global = true, value_name = "URL")]
    pub chef_server_url: Option<String>,

    /// Credentials profile (defaults to $CHEF_PROFILE, then "default")
    #[arg(short = 'p', long, global = true)]
    pub profile: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub no_ssl_verify: bool,

    /// Report defaults file (defaults to ./cookbook-audit.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a report
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Style violations and node usage for every cookbook version
    Cookbooks(CookbooksArgs),
    /// Chef version, platform and applied cookbooks for every node
    Nodes(NodesArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct CookbooksArgs {
    /// List each offense instead of per-file counts
    #[arg(short, long)]
    pub detailed: bool,

    /// Omit cookbook versions that no node uses
    #[arg(short = 'u', long)]
    pub skip_unused: bool,

    /// Output format: txt or csv
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Number of cookbook versions processed concurrently (default 10)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: Option<u16>,

    /// Stop starting new work after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Upper bound in seconds for each download, analysis or usage lookup
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub stage_timeout: Option<u64>,

    /// Static analyzer executable (defaults to cookstyle)
    #[arg(long, value_name = "PROGRAM")]
    pub analyzer: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct NodesArgs {
    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

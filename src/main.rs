use clap::Parser;
use cookbook_audit::adapters::outbound::analyzer::{CookstyleAnalyzer, DEFAULT_ANALYZER};
use cookbook_audit::adapters::outbound::console::StderrProgressReporter;
use cookbook_audit::adapters::outbound::formatters::{
    ErrorSummaryFormatter, NodeTableFormatter, MIN_TERMINAL_WIDTH,
};
use cookbook_audit::adapters::outbound::network::{ChefServerClient, RequestSigner};
use cookbook_audit::application::dto::{OutputFormat, ReportOptions};
use cookbook_audit::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use cookbook_audit::application::use_cases::{AggregateCookbooksUseCase, AggregateNodesUseCase};
use cookbook_audit::cli::{Args, Command, CookbooksArgs, GlobalArgs, NodesArgs, ReportCommand};
use cookbook_audit::config::{self, ConfigFile};
use cookbook_audit::credentials::{self, CredentialOverrides, PROFILE_ENV_VAR};
use cookbook_audit::ports::outbound::NodeReportFormatter;
use cookbook_audit::shared::error::{ExitCode, ReportError};
use cookbook_audit::shared::Result;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are reported through the error path too
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args.global)?;
    let client = connect(&args.global, &config)?;

    match args.command {
        Command::Report {
            report: ReportCommand::Cookbooks(cookbooks),
        } => report_cookbooks(client, cookbooks, config).await,
        Command::Report {
            report: ReportCommand::Nodes(nodes),
        } => report_nodes(client, nodes).await,
    }
}

fn load_config(global: &GlobalArgs) -> Result<ConfigFile> {
    let config = match &global.config_file {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    Ok(config.unwrap_or_default())
}

/// Resolves credentials once and builds the shared server client
fn connect(global: &GlobalArgs, config: &ConfigFile) -> Result<ChefServerClient> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let profile = credentials::resolve_profile(
        global.profile.as_deref(),
        std::env::var(PROFILE_ENV_VAR).ok().as_deref(),
    );
    let credentials_path = global
        .credentials
        .clone()
        .or_else(|| credentials::default_credentials_path(home.as_deref()));
    let overrides = CredentialOverrides {
        client_name: global.client_name.clone(),
        client_key: global.client_key.clone(),
        chef_server_url: global.chef_server_url.clone(),
    };

    let server = credentials::load_credentials(
        credentials_path.as_deref(),
        &profile,
        &overrides,
        home.as_deref(),
    )?;
    let signer = RequestSigner::from_pem(server.client_name.as_str(), &server.client_key_pem)
        .map_err(|e| ReportError::ClientKeyError {
            source_name: server.key_source.clone(),
            details: e.to_string(),
        })?;

    let no_ssl_verify = global.no_ssl_verify || config.no_ssl_verify.unwrap_or(false);
    ChefServerClient::new(&server.server_url, signer, no_ssl_verify)
}

/// Cookbook report settings after merging flags over the defaults file
#[derive(Debug, PartialEq)]
struct CookbookSettings {
    options: ReportOptions,
    format: OutputFormat,
    detailed: bool,
    analyzer: String,
}

fn merge_cookbook_settings(args: &CookbooksArgs, config: &ConfigFile) -> Result<CookbookSettings> {
    let format = match (args.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(format)) => format
            .parse()
            .map_err(|message| ReportError::Validation { message })?,
        (None, None) => OutputFormat::default(),
    };

    let mut builder = ReportOptions::builder()
        .skip_unused(args.skip_unused || config.skip_unused.unwrap_or(false));
    if let Some(workers) = args.workers.map(usize::from).or(config.workers) {
        builder = builder.workers(workers);
    }
    if let Some(secs) = args.timeout.or(config.timeout_seconds) {
        builder = builder.deadline(Duration::from_secs(secs));
    }
    if let Some(secs) = args.stage_timeout.or(config.stage_timeout_seconds) {
        builder = builder.stage_timeout(Duration::from_secs(secs));
    }

    Ok(CookbookSettings {
        options: builder.build()?,
        format,
        detailed: args.detailed || config.detailed.unwrap_or(false),
        analyzer: args
            .analyzer
            .clone()
            .or_else(|| config.analyzer.clone())
            .unwrap_or_else(|| DEFAULT_ANALYZER.to_string()),
    })
}

async fn report_cookbooks(
    client: ChefServerClient,
    args: CookbooksArgs,
    config: ConfigFile,
) -> Result<()> {
    let settings = merge_cookbook_settings(&args, &config)?;

    // One client serves as both catalog and usage index
    let use_case = AggregateCookbooksUseCase::new(
        client.clone(),
        client,
        CookstyleAnalyzer::new(settings.analyzer),
        StderrProgressReporter::new(),
    );
    let report = use_case.execute(settings.options).await?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format, settings.detailed);
    let output = formatter.format(&report)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&output)?;

    let errors = ErrorSummaryFormatter::format(&report.error_summary);
    if !errors.is_empty() {
        eprint!("{}", errors);
    }
    Ok(())
}

async fn report_nodes(client: ChefServerClient, args: NodesArgs) -> Result<()> {
    let use_case = AggregateNodesUseCase::new(client, StderrProgressReporter::new());
    let report = use_case.execute().await?;

    let output = NodeTableFormatter::new(terminal_width()).format(&report)?;
    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&output)
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|&w: &usize| w > 0)
        .unwrap_or(MIN_TERMINAL_WIDTH)
}

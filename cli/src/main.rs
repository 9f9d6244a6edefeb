//! CLI entrypoint for readme-crew
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use crew_application::{
    CompositeObserver, SessionRequest, SessionRunner, WorkflowObserver, WorkflowOrchestrator,
};
use crew_domain::AgentRoster;
use crew_infrastructure::{
    ConfigLoader, FileConfig, JsonSchemaToolConverter, JsonlEventLogger, LocalToolExecutor,
    McpToolServer, NoteStore, OpenAiCompatibleGateway, RootResolver, RuntimeFile,
    TracingEventLogger,
};
use crew_presentation::{Cli, ConsoleFormatter, ConsoleReporter};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

/// Fold CLI overrides into the loaded configuration.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if cli.temperature.is_some() {
        config.sampling.temperature = cli.temperature;
    }
    if cli.top_p.is_some() {
        config.sampling.top_p = cli.top_p;
    }
    if cli.max_tokens.is_some() {
        config.sampling.max_tokens = cli.max_tokens;
    }
    if let Some(n) = cli.max_iterations {
        config.workflow.max_iterations = n;
    }
    if let Some(n) = cli.max_retries {
        config.workflow.max_retries = n;
    }
    if cli.max_handoffs.is_some() {
        config.workflow.max_handoffs = cli.max_handoffs;
    }
}

fn print_config_sources(cli: &Cli) {
    println!("Configuration sources (in priority order):");
    for source in ConfigLoader::sources(cli.config.as_deref()) {
        let mark = if source.found { "FOUND" } else { "     " };
        println!("  [{}] {:<8} {}", mark, format!("{}:", source.label), source.location);
    }
}

/// Serve the tools to MCP clients until stdin closes. Without an API key
/// every tool but `review_readme` still works.
async fn serve_mcp(cli: &Cli, config: &FileConfig) -> Result<ExitCode> {
    let mut executor = LocalToolExecutor::new().with_search(config.search.to_settings());
    match OpenAiCompatibleGateway::from_env(
        &config.llm.base_url,
        &config.llm.api_key_env,
        config.llm.timeout(),
    ) {
        Ok(gateway) => {
            executor = executor.with_critic(Arc::new(gateway), config.llm.model.clone());
        }
        Err(e) => warn!("review_readme unavailable: {}", e),
    }

    let roots = RootResolver::new(cli.path.clone(), RuntimeFile::in_dir(&config.logging.dir));
    let server = McpToolServer::new(
        Arc::new(executor),
        roots,
        NoteStore::load(&config.logging.dir),
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server
        .serve(stdin, tokio::io::stdout())
        .await
        .context("MCP server stopped")?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        print_config_sources(&cli);
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let _log_guard = logging::init(cli.log_level(), &config.logging.dir);
    info!("Starting readme-crew");

    if cli.mcp {
        return serve_mcp(&cli, &config).await;
    }

    let project_root = cli
        .path
        .clone()
        .context("--path is required")?;

    // === Dependency Injection ===
    let gateway = Arc::new(
        OpenAiCompatibleGateway::from_env(
            &config.llm.base_url,
            &config.llm.api_key_env,
            config.llm.timeout(),
        )
        .context("Failed to create model gateway")?,
    );

    let roster = AgentRoster::readme_crew(&config.llm.model, config.sampling.to_overrides());

    let executor = LocalToolExecutor::new()
        .with_search(config.search.to_settings())
        .with_critic(gateway.clone(), config.llm.model.clone());

    let mut observers: Vec<Arc<dyn WorkflowObserver>> = vec![Arc::new(TracingEventLogger::new())];
    if config.logging.jsonl {
        match JsonlEventLogger::in_dir(&config.logging.dir) {
            Some(logger) => observers.push(Arc::new(logger)),
            None => warn!("JSONL event log disabled: could not open {}", config.logging.dir.display()),
        }
    }
    if !cli.quiet {
        observers.push(Arc::new(ConsoleReporter::new()));
    }

    let orchestrator = WorkflowOrchestrator::new(
        Arc::new(roster),
        gateway,
        Arc::new(executor),
        Arc::new(JsonSchemaToolConverter),
    )
    .with_observer(Arc::new(CompositeObserver::new(observers)));

    let runner = SessionRunner::new(orchestrator, config.workflow.to_execution_params());

    let mut request = SessionRequest::new(project_root).with_requirements(cli.requirements.clone());
    if let Some(readme) = &cli.readme_path {
        request = request.with_existing_readme(readme.clone());
    }

    let root = request.resolved_root();
    if !root.is_dir() {
        anyhow::bail!("Project path is not a directory: {}", root.display());
    }
    if let Err(e) = RuntimeFile::in_dir(&config.logging.dir).record_project_root(&root) {
        warn!("Could not record the project root for the MCP server: {}", e);
    }

    info!(
        project_root = %root.display(),
        model = %config.llm.model,
        max_iterations = runner.params().max_iterations,
        max_retries = runner.params().max_retries,
        "Running README session"
    );

    let outcome = runner.run(&request).await;

    println!("{}", ConsoleFormatter::render(&outcome, cli.output));

    Ok(if outcome.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

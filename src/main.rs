use anyhow::Context;
use clap::Parser;
use research_editor::cli::output::Output;
use research_editor::cli::{Cli, Commands};
use research_editor::types::TaskConfig;
use research_editor::utils::logging::init_tracing;
use research_editor::{EditorAgent, EditorConfig, FanOutPolicy, ResearchState};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::warn;

const DEFAULT_CONFIG: &str = "editor.toml";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    let config = read_config(&cli.config)?;

    match cli.command {
        Commands::Config { validate } => show_config(&config, &cli.config, validate, output),
        Commands::Plan {
            summary,
            summary_file,
            max_sections,
        } => {
            config.validate()?;
            init_tracing(&config.logging, cli.verbose);

            let summary = match (summary, summary_file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read summary file {}", path.display()))?,
                (None, None) => String::new(),
            };
            let state = ResearchState {
                task: Some(TaskConfig {
                    max_sections: Some(
                        max_sections.unwrap_or(config.research.default_max_sections),
                    ),
                    ..Default::default()
                }),
                initial_research: Some(summary),
                ..Default::default()
            };

            plan(&config, &state, output).await
        }
        Commands::Run { state } => {
            config.validate()?;
            init_tracing(&config.logging, cli.verbose);

            let raw = fs::read_to_string(&state)
                .with_context(|| format!("Failed to read state file {}", state.display()))?;
            let mut state = ResearchState::from_json(&raw)?;
            let task = state.task.get_or_insert_with(TaskConfig::default);
            if task.max_sections.is_none() {
                task.max_sections = Some(config.research.default_max_sections);
            }

            research(&config, &state, output).await
        }
    }
}

/// A missing file is only tolerated for the default path.
fn read_config(path: &Path) -> anyhow::Result<EditorConfig> {
    match fs::read_to_string(path) {
        Ok(content) => EditorConfig::parse(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound && path == Path::new(DEFAULT_CONFIG) => {
            Ok(EditorConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

fn show_config(
    config: &EditorConfig,
    path: &Path,
    validate: bool,
    output: &Output,
) -> anyhow::Result<()> {
    if validate {
        config.validate()?;
        output.success(&format!("Configuration is valid ({})", path.display()));
        return Ok(());
    }

    output.header("Configuration");
    output.kv("file", &path.display().to_string());
    output.kv("service", &config.service.base_url);
    output.kv("fan_out", &format!("{:?}", config.research.fan_out));
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight runs");
            watcher.cancel();
        }
    });
    cancel
}

async fn plan(config: &EditorConfig, state: &ResearchState, output: &Output) -> anyhow::Result<()> {
    let cancel = cancel_on_ctrl_c();
    let editor = EditorAgent::from_config(config, cancel.clone())?;

    output.step(1, 1, "Planning outline");
    let outline = editor.plan_research_with_cancel(state, &cancel).await?;
    output.success(&format!(
        "Planned '{}' with {} sections",
        outline.title,
        outline.sections.len()
    ));

    println!("{}", serde_json::to_string_pretty(&outline)?);
    Ok(())
}

async fn research(
    config: &EditorConfig,
    state: &ResearchState,
    output: &Output,
) -> anyhow::Result<()> {
    let cancel = cancel_on_ctrl_c();
    let editor = EditorAgent::from_config(config, cancel.clone())?;

    let outline = match state.outline() {
        Some(outline) => {
            output.info(&format!("Using outline '{}' from state", outline.title));
            outline
        }
        None => {
            output.step(1, 2, "Planning outline");
            editor.plan_research_with_cancel(state, &cancel).await?
        }
    };
    for section in &outline.sections {
        output.list_item(section);
    }

    output.step(2, 2, "Researching sections");
    match config.research.fan_out {
        FanOutPolicy::FailFast => {
            let result = editor.run_parallel_research(&outline).await?;
            output.success(&format!(
                "Researched {} sections",
                result.research_data.len()
            ));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        FanOutPolicy::Settled => {
            let outcomes = editor.run_parallel_research_settled(&outline).await;
            let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
            if failed > 0 {
                output.warning(&format!(
                    "{} of {} sections failed",
                    failed,
                    outcomes.len()
                ));
            } else {
                output.success(&format!("Researched {} sections", outcomes.len()));
            }
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
    }

    Ok(())
}

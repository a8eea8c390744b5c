use anyhow::{Context, Result};
use clap::Parser;
use dsfind::core::config::{Config, IndexSource};
use dsfind::index::loader::load_for;
use dsfind::index::model::Index;
use dsfind::search::matcher::match_query;
use dsfind::ui::cli::{Cli, Commands};
use dsfind::ui::render::{render_json, render_text};
use dsfind::ui::tui::SearchTui;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut config = Config {
        source: IndexSource::parse(&cli.index),
        timeout: Duration::from_secs(cli.timeout),
        ..Config::default()
    };

    match cli.command {
        Commands::Search {
            query,
            limit,
            json,
            matching,
        } => {
            config.limit = limit;
            config.match_options = matching.options();
            config.validate().context("invalid search options")?;

            let index = load_for(&config).await;
            handle_search(&config, &index, query.as_deref().unwrap_or_default(), json)
        }
        Commands::Interactive {
            query,
            limit,
            debounce_ms,
            matching,
        } => {
            config.limit = limit;
            config.debounce = Duration::from_millis(debounce_ms);
            config.match_options = matching.options();
            config.validate().context("invalid interactive options")?;

            let index = load_for(&config).await;
            SearchTui::new(&index, config.match_options.clone(), config.limit, config.debounce)
                .with_query(&query)
                .run()
                .context("interactive search failed")?;
            Ok(())
        }
        Commands::Inspect { json } => {
            config.validate().context("invalid inspect options")?;

            let index = load_for(&config).await;
            handle_inspect(&config, &index, json)
        }
    }
}

/// Log to stderr so stdout only carries results
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_search(config: &Config, index: &Index, query: &str, json: bool) -> Result<()> {
    let hits = match_query(query, index, &config.match_options);
    tracing::debug!("query {:?} -> {} hits", query, hits.len());

    if json {
        println!("{}", render_json(&hits, config.limit)?);
    } else {
        println!("{}", render_text(&hits, config.limit));
        if hits.len() > config.limit {
            println!("\n({} av {} treff vist)", config.limit, hits.len());
        }
    }
    Ok(())
}

fn handle_inspect(config: &Config, index: &Index, json: bool) -> Result<()> {
    if json {
        let summary = serde_json::json!({
            "source": config.source.to_string(),
            "patterns": index.patterns.len(),
            "components": index.components.len(),
            "crawl": index.crawl.len(),
            "aliases": index.aliases.len(),
            "generated_at": index.generated_at,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Index: {}", config.source);
    if let Some(generated_at) = &index.generated_at {
        println!("  Generated:    {}", generated_at);
    }
    println!("  Patterns:     {}", index.patterns.len());
    println!("  Components:   {}", index.components.len());
    println!("  Docs:         {}", index.crawl.len());
    println!("  Alias groups: {}", index.aliases.len());
    let with_images = index.components.iter().filter(|c| c.image.is_some()).count();
    if with_images > 0 {
        println!("  Screenshots:  {}", with_images);
    }
    Ok(())
}

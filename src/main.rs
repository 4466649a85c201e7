use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use newsboard::cli::{BuildArgs, Cli, Commands, SourceArgs};
use newsboard::config::Config;
use newsboard::domain::{default_sources, source_label, FeedSource};
use newsboard::errors::NewsboardResult;
use newsboard::render::{render, write_document, RenderContext};
use newsboard::services::{
    DigestService, GeminiTranslator, NormalizeSettings, RunStatus, Translator,
};
use newsboard::sources::{catalog, FeedLoader, RssAtomFetcher};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run() {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            error!(error = %e, "run aborted");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<RunStatus> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Build(args) => cmd_build(&mut config, args),
        Commands::Sources {
            selection,
            opml_out,
        } => {
            cmd_sources(&config, &selection, opml_out)?;
            Ok(RunStatus::Complete)
        }
    }
}

fn resolve_sources(selection: &SourceArgs, config: &Config) -> NewsboardResult<Vec<FeedSource>> {
    if let Some(path) = &selection.opml {
        return catalog::load_opml(path);
    }

    match selection.sources.as_ref().or(config.sources_path.as_ref()) {
        Some(path) => catalog::load_sources_json(path),
        None => Ok(default_sources()),
    }
}

fn cmd_sources(config: &Config, selection: &SourceArgs, opml_out: bool) -> anyhow::Result<()> {
    let sources = resolve_sources(selection, config)?;

    if opml_out {
        println!("{}", catalog::export_opml(&sources)?);
        return Ok(());
    }

    if sources.is_empty() {
        println!("No sources configured.");
        return Ok(());
    }

    println!("Configured sources:\n");
    for source in &sources {
        println!("  {}", source.name);
        println!("    URL: {}", source.url);
        for (name, value) in &source.headers {
            println!("    Header: {}: {}", name, value);
        }
        println!();
    }

    Ok(())
}

fn cmd_build(config: &mut Config, args: BuildArgs) -> anyhow::Result<RunStatus> {
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(max) = args.max_articles {
        anyhow::ensure!(max > 0, "--max-articles must be at least 1");
        config.max_articles = max;
    }
    if args.per_source.is_some() {
        config.per_source_limit = args.per_source;
    }

    let sources = resolve_sources(&args.selection, config).context("could not load sources")?;

    let translator: Option<Box<dyn Translator>> = if args.no_translate || !config.translation_enabled() {
        info!("translation disabled, articles stay in their original language");
        None
    } else {
        Some(Box::new(GeminiTranslator::from_config(config)?))
    };

    let loader = FeedLoader::new(RssAtomFetcher::from_config(config)?)
        .with_per_source_limit(config.per_source_limit);
    let service = DigestService::new(loader, NormalizeSettings::from_config(config))
        .with_translator(translator)
        .with_newest_first(!args.keep_order);

    // Keep stdout clean for the page itself on dry runs.
    let report = |line: String| {
        if args.dry_run {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    report(format!("Fetching {} feeds...", sources.len()));
    let outcome = service.run(&sources);
    let status = outcome.status();

    let html = render(RenderContext {
        generated_at: Utc::now(),
        source_label: source_label(&sources),
        articles: outcome.articles,
    });

    if args.dry_run {
        println!("{}", html);
    } else {
        write_document(Path::new(&config.output_path), &html)
            .with_context(|| format!("could not write {}", config.output_path))?;
        report(format!("Wrote {}", config.output_path));
    }

    for failure in &outcome.feed_failures {
        report(format!("  ! {}: {}", failure.source, failure.reason));
    }
    report(match status {
        RunStatus::Complete => "Done.".to_string(),
        RunStatus::Partial => format!(
            "Done with {} feed failures and {} untranslated articles.",
            outcome.feed_failures.len(),
            outcome.translation_failures
        ),
        RunStatus::Empty => "No articles found; rendered the empty page.".to_string(),
    });

    Ok(status)
}

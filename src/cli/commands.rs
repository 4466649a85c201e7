use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsboard")]
#[command(about = "Build a translated news digest page from RSS/Atom feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all feeds and write the digest page
    Build(BuildArgs),

    /// List configured feed sources
    Sources {
        #[command(flatten)]
        selection: SourceArgs,

        /// Print the sources as OPML instead of a list
        #[arg(long)]
        opml_out: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// JSON file with [{"name", "url", "headers"}] sources
    #[arg(long, conflicts_with = "opml")]
    pub sources: Option<String>,

    /// OPML file to read sources from
    #[arg(long)]
    pub opml: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub selection: SourceArgs,

    /// Output HTML file (overwritten on every run)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum number of articles across all feeds
    #[arg(long)]
    pub max_articles: Option<usize>,

    /// Maximum number of entries taken from each feed
    #[arg(long)]
    pub per_source: Option<usize>,

    /// Skip translation and render every article in its original language
    #[arg(long)]
    pub no_translate: bool,

    /// Keep feed order instead of sorting newest first
    #[arg(long)]
    pub keep_order: bool,

    /// Print the page to stdout instead of writing the output file
    #[arg(long)]
    pub dry_run: bool,
}

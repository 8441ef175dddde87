use clap::Parser;
use graphe::output::{self, OutputFormat};
use graphe::{PipelineBuilder, PipelineError};
use std::fs;
use std::path::PathBuf;

/// Parses a Graphe markup document, runs path queries on it and writes the
/// styled content or the re-serialized markup.
#[derive(Parser, Debug)]
#[command(name = "graphe", version, about)]
struct Cli {
    /// Markup source file.
    source: PathBuf,

    /// JSON style sheet applied to the content.
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the document here. Without it the document goes to standard
    /// output, unless queries were given.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path expression to evaluate against the markup. May be repeated.
    #[arg(short, long)]
    query: Vec<String>,

    /// Log pipeline stages at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), PipelineError> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut builder = PipelineBuilder::new();
    if let Some(style) = &cli.style {
        log::info!("Loading style sheet from {}", style.display());
        builder = builder.with_style_file(style)?;
    }
    let pipeline = builder.build();

    log::info!("Parsing {}", cli.source.display());
    let markup = pipeline.parse_file(&cli.source)?;

    for path in &cli.query {
        println!("{}", output::query(&markup, path)?);
    }

    let rendered = output::render(&pipeline, &markup, cli.format)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)?;
            log::info!("Wrote {}", path.display());
        }
        None if cli.query.is_empty() => println!("{}", rendered),
        None => {}
    }
    Ok(())
}

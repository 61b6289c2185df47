use anyhow::{Context, Result, bail};
use clap::Parser;
use panelmark_config::Config;
use panelmark_engine::{Delimiters, DocumentParser, MarkdownOptions, html, io};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "panelmark", version)]
#[command(about = "Render Markdown with panel, dropdown and button directives to HTML")]
struct Args {
    /// Markdown file to render; reads stdin when missing or `-`
    input: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file (default: ~/.config/panelmark/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Panel, header and footer delimiter characters
    #[arg(
        long,
        num_args = 3,
        value_names = ["PANEL", "HEADER", "FOOTER"],
        allow_hyphen_values = true
    )]
    delimiters: Option<Vec<String>>,

    /// Wrap the output in a complete HTML document
    #[arg(long)]
    standalone: bool,

    /// Title of the standalone document
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,
}

impl Args {
    fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_none_or(|p| p == Path::new("-"))
    }
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => {
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => bail!("Config file not found: {}", path.display()),
        },
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn markdown_options(config: &Config) -> MarkdownOptions {
    let md = config.markdown;
    MarkdownOptions {
        tables: md.tables,
        strikethrough: md.strikethrough,
        footnotes: md.footnotes,
        tasklists: md.tasklists,
    }
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) if !args.reads_stdin() => {
            io::read_source(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

fn document_title(args: &Args, config: &Config) -> String {
    args.title
        .clone()
        .or_else(|| config.output.title.clone())
        .or_else(|| {
            args.input
                .as_deref()
                .filter(|_| !args.reads_stdin())
                .and_then(Path::file_stem)
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "panelmark".to_string())
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    let delimiters = args
        .delimiters
        .as_deref()
        .unwrap_or(&config.panels.delimiters);
    let delimiters = Delimiters::from_strs(delimiters).context("Invalid delimiter configuration")?;

    let parser = DocumentParser::with_delimiters(delimiters).with_markdown(markdown_options(&config));
    let source = read_input(&args)?;
    let mut output = parser.render(&source).context("Failed to render document")?;

    if args.standalone || config.output.standalone {
        output = html::standalone(&output, &document_title(&args, &config));
    }

    match &args.output {
        Some(path) => {
            io::write_output(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => std::io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write stdout")?,
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    run(Args::parse())
}

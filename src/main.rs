use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rss2json::config::Config;
use rss2json::util::{atomic_write, to_json_string};

#[derive(Parser, Debug)]
#[command(
    name = "rss2json",
    version,
    about = "Convert RSS 2 XML to JSON",
    after_help = "Examples:\n  rss2json rss.xml rss.json\n  rss2json -p -f .channel.title -f '.item[0-2].link' < rss.xml"
)]
struct Args {
    /// RSS XML file to read ("-" or omitted for stdin)
    #[arg(value_name = "INPUT_RSS_XML_FILENAME")]
    input_file: Option<PathBuf>,

    /// JSON file to write ("-" or omitted for stdout)
    #[arg(value_name = "OUTPUT_JSON_FILENAME")]
    output_file: Option<PathBuf>,

    /// Set input filename
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Set output filename
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Add trailing newline
    #[arg(long = "newline", visible_alias = "nl")]
    newline: bool,

    /// Suppress error messages
    #[arg(long)]
    quiet: bool,

    /// Only output the data selected by PATH (repeatable), e.g. .channel.title or '.item[2-4].link'
    #[arg(short = 'f', long = "filter", value_name = "PATH")]
    filters: Vec<String>,

    /// Config file (defaults to ~/.config/rss2json/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Effective output options after merging the config file with flags.
#[derive(Debug)]
struct Options {
    pretty: bool,
    newline: bool,
    quiet: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with JSON on stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            if !args.quiet {
                eprintln!("Error: {:#}", e);
            }
            return ExitCode::FAILURE;
        }
    };
    let options = Options {
        pretty: args.pretty || config.pretty,
        newline: args.newline || config.newline,
        quiet: args.quiet || config.quiet,
    };

    match run(&args, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !options.quiet {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match Config::default_path() {
            Some(path) => path,
            None => {
                tracing::debug!("HOME not set, using default configuration");
                return Ok(Config::default());
            }
        },
    };
    Config::load(&path).with_context(|| format!("Failed to load config '{}'", path.display()))
}

fn run(args: &Args, options: &Options) -> Result<()> {
    // Positional arguments take precedence over -i/-o
    let input = args.input_file.as_deref().or(args.input.as_deref());
    let output = args.output_file.as_deref().or(args.output.as_deref());

    let src = read_input(input)?;
    let feed = rss2json::parse(&src).with_context(|| match input {
        Some(path) if !is_stdio(path) => format!("Failed to parse '{}'", path.display()),
        _ => "Failed to parse standard input".to_string(),
    })?;

    let mut json = if args.filters.is_empty() {
        to_json_string(&feed, options.pretty)?
    } else {
        let result = feed.filter(args.filters.as_slice())?;
        to_json_string(&result, options.pretty)?
    };
    if options.newline {
        json.push('\n');
    }

    write_output(output, json.as_bytes())
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) if !is_stdio(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display())),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("Failed to read standard input")?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, content: &[u8]) -> Result<()> {
    match output {
        Some(path) if !is_stdio(path) => atomic_write(path, content),
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|_| stdout.flush())
                .context("Failed to write standard output")
        }
    }
}

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tweetspan::config::HintUnit;
use tweetspan::model::{EntityHint, TextRange};
use tweetspan::tweet;
use tweetspan::{EntityLocator, LocatorOptions, OutputFormat};

/// Recover hashtag, URL and mention ranges in tweet text from drifting API indices.
#[derive(Debug, Parser)]
#[command(name = "tweetspan", version, about)]
struct Cli {
    #[command(flatten)]
    options: OptionFlags,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct OptionFlags {
    /// YAML options file (default: ./tweetspan.yaml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Unit the API used for entity indices.
    #[arg(long, global = true, value_enum)]
    hint_unit: Option<HintUnit>,

    /// Decode HTML entities in tweet text before locating.
    #[arg(long, global = true)]
    decode_html_entities: bool,

    /// Include decode/locate diagnostics in the output.
    #[arg(long, global = true)]
    with_diagnostics: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a single hint against a text and print the entity as JSON.
    ///
    /// `--hint-unit` and `--decode-html-entities` apply; the printed range is
    /// in UTF-16 units of the (decoded) text.
    Locate(LocateArgs),

    /// Resolve every tweet in a search-response JSON file.
    Resolve {
        input: PathBuf,

        /// Write the result here instead of only printing it.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Resolve every `.json` file under INPUT_DIR into OUTPUT_DIR.
    ResolveAll { input_dir: PathBuf, output_dir: PathBuf },
}

#[derive(Debug, Args)]
struct LocateArgs {
    #[arg(long)]
    text: String,

    /// Entity prefix, e.g. `#`, `@` or `http`.
    #[arg(long)]
    prefix: String,

    #[arg(long)]
    start: usize,

    #[arg(long)]
    length: usize,

    /// Keyword text reported by the API, with or without the prefix.
    #[arg(long)]
    literal: Option<String>,
}

fn main() -> ExitCode {
    // quiet by default; use RUST_LOG=tweetspan=debug to see dropped hints.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tweetspan=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> tweetspan::Result<()> {
    let opts = load_options(&cli.options)?;

    match cli.command {
        Command::Locate(args) => {
            // same edge conversions as decoded records: the range is checked
            // against the decoded text, in UTF-16 units.
            let text = tweet::prepare_text(args.text, &opts);
            let mut hint = EntityHint::new(args.prefix, TextRange::new(args.start, args.length));
            if let Some(lit) = args.literal {
                hint = hint.with_literal(lit);
            }
            let hint = tweet::hint_to_utf16(hint, &text, opts.hint_unit);
            let entity = EntityLocator::new(&text).resolve(&hint);
            println!("{}", serde_json::to_string_pretty(&entity)?);
        }
        Command::Resolve {
            input,
            output,
            format,
        } => {
            let rendered = tweetspan::run(&input, output.as_deref(), format, &opts)?;
            if output.is_none() {
                println!("{rendered}");
            }
        }
        Command::ResolveAll {
            input_dir,
            output_dir,
        } => {
            let count = tweetspan::resolve_all_in_dirs(&input_dir, &output_dir, &opts)?;
            eprintln!("Resolved {count} files into {}", output_dir.display());
        }
    }
    Ok(())
}

fn load_options(flags: &OptionFlags) -> tweetspan::Result<LocatorOptions> {
    let mut opts = LocatorOptions::discover(flags.config.as_deref(), Path::new("."))?;
    if let Some(unit) = flags.hint_unit {
        opts.hint_unit = unit;
    }
    if flags.decode_html_entities {
        opts.decode_html_entities = true;
    }
    if flags.with_diagnostics {
        opts.collect_diagnostics = true;
    }
    Ok(opts)
}

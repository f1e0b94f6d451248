mod config;
mod logging;
mod render;
mod serve;
mod watch;

use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use netpad_core::Document;
use netpad_server::Address;
use netpad_syntax::Language;

use crate::{config::Config, render::Format, serve::ServeOptions};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Turn debugging information on
    #[arg(short, long, global = true)]
    debug: bool,

    /// Use a configuration file instead of the default one
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a file with syntax highlighting
    Highlight {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Language tag, detected from the file if not given
        #[arg(short, long)]
        language: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },

    /// Mirror a file to connected clients as it changes on disk
    Serve {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Language tag, detected from the file if not given
        #[arg(short, long)]
        language: Option<String>,

        /// Address to listen on, `<ip>:<port>` or `unix:<path>`
        #[arg(long, value_name = "ADDRESS")]
        listen: Option<String>,
    },

    /// Connect to a mirror and print what it sends
    Watch {
        /// Mirror address, `<ip>:<port>` or `unix:<path>`
        #[arg(long, value_name = "ADDRESS")]
        connect: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::setup(cli.debug, &config.log.file) {
        eprintln!("Failed to set up logging to {:?}: {e}", config.log.file);
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("netpad: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Highlight {
            file,
            language,
            format,
        } => highlight(&file, language.as_deref(), format),
        Command::Serve {
            file,
            language,
            listen,
        } => {
            let listen = listen.as_deref().unwrap_or(&config.mirror.listen);
            serve::run(ServeOptions {
                file: &file,
                language: language.as_deref().map(Language::from_tag),
                listen: parse_address(listen)?,
                poll_interval: Duration::from_millis(config.mirror.poll_interval_ms.max(1)),
            })
        }
        Command::Watch { connect, format } => {
            let connect = connect.as_deref().unwrap_or(&config.mirror.listen);
            watch::run(&parse_address(connect)?, format)
        }
    }
}

fn parse_address(addr: &str) -> anyhow::Result<Address> {
    addr.parse::<Address>()
        .with_context(|| format!("Invalid address {addr:?}"))
}

fn highlight(file: &Path, language: Option<&str>, format: Format) -> anyhow::Result<()> {
    let mut doc = Document::open(file)?;
    if let Some(tag) = language {
        doc.set_language(Language::from_tag(tag));
    }

    let out = render::render(&doc.tokens(), format);
    io::stdout().lock().write_all(out.as_bytes())?;
    Ok(())
}

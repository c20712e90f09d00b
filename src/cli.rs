//! Command line interface.

use crate::commands::{self, Context, InstallRequest, WebfontRequest, source};
use crate::config::FontyConfig;
use crate::error::FontyError;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "fonty",
    version,
    about = "A friendly CLI tool for installing, managing and converting fonts"
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the one in the fonty directory
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a font family from a source, URLs or local files
    Install {
        /// Family name, font URLs, or file patterns with --files
        #[arg(required = true, value_name = "NAME|URL|FILE")]
        args: Vec<String>,

        /// Only install these variants, e.g. -V 400,700i or -V "Bold Italic"
        #[arg(short = 'V', long, value_delimiter = ',')]
        variants: Vec<String>,

        /// Install into this directory instead of the system font directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Treat the arguments as local font files
        #[arg(short, long)]
        files: bool,
    },

    /// Uninstall a font family or some of its variants
    Uninstall {
        /// Family name
        #[arg(required = true, value_name = "NAME")]
        name: Vec<String>,

        /// Only uninstall these variants
        #[arg(short = 'V', long, value_delimiter = ',')]
        variants: Vec<String>,
    },

    /// List installed fonts
    List,

    /// Manage font sources
    #[command(subcommand)]
    Source(SourceCommand),

    /// Generate web fonts and @font-face rules
    Webfont {
        /// Font files or glob patterns
        #[arg(value_name = "FILE", required_unless_present = "typeface")]
        files: Vec<String>,

        /// Convert an installed family instead
        #[arg(short, long, value_name = "NAME", conflicts_with = "files")]
        typeface: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SourceCommand {
    /// Subscribe to a font repository
    Add { url: String },

    /// Unsubscribe by id, name or URL
    Remove { identifier: String },

    /// List subscribed sources
    List,

    /// Refetch all subscribed sources
    Update {
        /// Rewrite local copies even when unchanged
        #[arg(long)]
        force: bool,
    },
}

/// Default log filter for a `-v` count.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes env_logger. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbose: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(verbose)))
        .format_timestamp(None)
        .init();
}

pub fn run(cli: Cli) -> Result<(), FontyError> {
    let config = FontyConfig::load(cli.config.as_deref())?;
    let ctx = Context::new(config)?;
    let start = Instant::now();

    match cli.command {
        Commands::Install {
            args,
            variants,
            output,
            files,
        } => {
            let request = InstallRequest {
                targets: args,
                variants,
                output,
                from_files: files,
            };
            print!("{}", commands::install(&ctx, &request)?);
        }
        Commands::Uninstall { name, variants } => {
            print!("{}", commands::uninstall(&ctx, &name.join(" "), &variants)?);
        }
        Commands::List => {
            let families = commands::list(&ctx)?;
            if families.is_empty() {
                println!("No fonts installed in {}", ctx.config.font_dir.display());
            }
            for family in families {
                print!("{}", family);
            }
        }
        Commands::Source(command) => run_source(&ctx, command)?,
        Commands::Webfont {
            files,
            typeface,
            output,
        } => {
            let request = WebfontRequest {
                files,
                typeface,
                output,
            };
            print!("{}", commands::webfont(&ctx, &request)?);
        }
    }

    log::info!("Done in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn run_source(ctx: &Context, command: SourceCommand) -> Result<(), FontyError> {
    match command {
        SourceCommand::Add { url } => {
            let summary = source::add(ctx, &url)?;
            println!("Subscribed to '{}'", summary.name);
            print!("{}", summary);
        }
        SourceCommand::Remove { identifier } => {
            let removed = source::remove(ctx, &identifier)?;
            println!("Unsubscribed from '{}'", removed.name);
        }
        SourceCommand::List => {
            let sources = source::list(ctx)?;
            if sources.is_empty() {
                println!("You are not subscribed to any font sources");
            }
            for summary in sources {
                print!("{}", summary);
            }
        }
        SourceCommand::Update { force } => {
            for report in source::update(ctx, force)? {
                match report.outcome {
                    Ok(true) => println!("Updated '{}'", report.name),
                    Ok(false) => println!("'{}' is up to date", report.name),
                    Err(err) => println!("Failed to update '{}': {}", report.name, err),
                }
            }
        }
    }
    Ok(())
}

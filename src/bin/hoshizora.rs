use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hoshizora",
    version,
    about = "Fuse a front and a back line-art layer into one transparent image"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hard-key both layers at a threshold and blend them 50/50 (format from output extension).
    Keyed(KeyedArgs),
    /// Derive gray and alpha per pixel and write a gray+alpha PNG.
    Fuse(LayerArgs),
}

#[derive(Parser, Debug)]
struct LayerArgs {
    /// Front layer (dark ink on light paper).
    #[arg(short = 'f', long = "front")]
    front: PathBuf,

    /// Back layer (light ink on dark base).
    #[arg(short = 'b', long = "back")]
    back: PathBuf,

    /// Output image path.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct KeyedArgs {
    #[command(flatten)]
    layers: LayerArgs,

    /// Keying threshold (0-255).
    #[arg(short = 't', long = "threshold", default_value_t = hoshizora::DEFAULT_THRESHOLD)]
    threshold: u8,
}

impl Command {
    fn into_config(self) -> hoshizora::CompositeConfig {
        let (layers, strategy) = match self {
            Command::Keyed(args) => (
                args.layers,
                hoshizora::StrategyKind::Keyed {
                    threshold: args.threshold,
                },
            ),
            Command::Fuse(layers) => (layers, hoshizora::StrategyKind::GrayAlpha),
        };
        hoshizora::CompositeConfig {
            front: layers.front,
            back: layers.back,
            output: layers.output,
            strategy,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // help and version go to stdout and are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();

    let cfg = cli.cmd.into_config();
    match hoshizora::run(&cfg) {
        Ok(summary) => {
            eprintln!(
                "wrote {} ({}, {})",
                cfg.output.display(),
                summary.canvas,
                summary.strategy
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", anyhow::Error::from(err));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

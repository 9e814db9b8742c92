use anyhow::Result;
use clap::Parser;
use keyprobe::{checks::format::MISSING_KEY_MESSAGE, output::Console, Config, KeyTester, Runtime};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_INTERRUPTED: i32 = 1;
const EXIT_CONFIG: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "keyprobe")]
#[command(about = "Check that an OpenAI-compatible API key works", long_about = None)]
struct Args {
    #[arg(long, help = "Load variables from this file instead of ./.env")]
    env_file: Option<PathBuf>,

    #[arg(long, help = "Stop after a failed connectivity check")]
    fail_fast: bool,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,

    #[arg(long, help = "Disable colored output")]
    no_color: bool,

    #[arg(short, long, help = "Only print failures, and the summary when a check fails")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the report on stdout stays readable
    let filter = if args.debug {
        EnvFilter::from_default_env()
            .add_directive("keyprobe=debug".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::from_default_env()
            .add_directive("keyprobe=warn".parse()?)
            .add_directive("warn".parse()?)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting keyprobe v{}", env!("CARGO_PKG_VERSION"));

    let use_color = !args.no_color && console::colors_enabled();
    let console = Console::new(use_color, args.quiet);

    let config = match Config::load(args.env_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            console.error(&e.to_string());
            std::process::exit(EXIT_CONFIG);
        }
    };

    if !config.has_api_key() {
        console.error(MISSING_KEY_MESSAGE);
        std::process::exit(EXIT_CONFIG);
    }

    let runtime = Runtime::new()?;
    let code = runtime.block_on(async_main(args, config, console));

    std::process::exit(code)
}

async fn async_main(args: Args, config: Config, console: Console) -> i32 {
    let use_color = console.use_color;
    info!("Testing key against {} (model: {})", config.api_base, config.model);

    let tester = KeyTester::new(config, console).fail_fast(args.fail_fast);

    tokio::select! {
        report = tester.run() => report.exit_code(),
        _ = tokio::signal::ctrl_c() => {
            let console = Console::new(use_color, false);
            console.blank();
            console.warning("Testing interrupted by user.");
            EXIT_INTERRUPTED
        }
    }
}

mod cmd;

use clap::Parser;
use cmd::config::{DumpArgs, Effective};

#[derive(Parser)]
#[command(name = "colfmt-dump", about = "Format JSON-encoded result rows as text")]
struct Cli {
    #[command(flatten)]
    args: DumpArgs,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::dump::run(&eff) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

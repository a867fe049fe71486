use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transport_catalogue::requests::{build_and_serialize, deserialize_and_answer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Read base requests from stdin, build the catalogue and write its snapshot
    #[command(name = "make_base")]
    MakeBase,

    /// Load the snapshot and answer stat requests from stdin as JSON on stdout
    #[command(name = "process_requests")]
    ProcessRequests,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only answers
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdin = BufReader::new(io::stdin().lock());

    let result = match args.cmd {
        Command::MakeBase => build_and_serialize(stdin).map(|summary| {
            info!(
                path = %summary.path.display(),
                stops = summary.stops,
                buses = summary.buses,
                "snapshot written"
            );
        }),
        Command::ProcessRequests => {
            deserialize_and_answer(stdin, io::stdout().lock()).map(|_| ())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed");
            ExitCode::FAILURE
        }
    }
}

use clap::Parser;
use famcount::cli::{execute_command, output, Cli};
use famcount::exitcode;
use famcount::util::logging;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let code = match execute_command(&cli) {
        Ok(()) => exitcode::OK,
        Err(e) => {
            output::error(&e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn setup_logging(verbosity: u8) {
    let filter = logging::level_filter(verbosity);
    logging::subscriber(filter, std::io::stderr).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

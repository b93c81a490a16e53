use clap::Parser;
use tracing::info;
use wordrank::app::{self, AppConfig, RunRequest};
use wordrank::cli::Cli;

fn main() {
    let cli = Cli::parse();
    let config = AppConfig::from_env(cli.verbose);
    app::init_logging(&config);

    let verbose = cli.verbose;
    if let Err(e) = run(RunRequest::from(cli)) {
        app::handle_fatal_error(e, verbose);
    }
}

fn run(request: RunRequest) -> anyhow::Result<()> {
    let report = app::execute(&request)?;
    info!(
        "Wrote {} ranked documents to {}",
        report.results.len(),
        request.output.display()
    );
    Ok(())
}

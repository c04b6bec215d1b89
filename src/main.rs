use market_entry::{
    cli::{Cli, CliHandler, ReportFormatter},
    logging,
};
use std::process;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", ReportFormatter::new(false, false).format_error(&e));
            process::exit(e.exit_code());
        }
    };

    logging::setup("market_entry", logging::level_for(cli.is_verbose(), cli.is_debug()));

    let use_colors = cli.should_use_color();
    let handler = CliHandler::new(cli);

    let exit_code = match handler.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", ReportFormatter::new(use_colors, false).format_error(&e));
            e.exit_code()
        }
    };

    process::exit(exit_code);
}

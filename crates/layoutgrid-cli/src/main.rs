mod analyze_cmd;
mod cli;
mod input;
mod page_range;
mod place_cmd;
mod rows_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_tracing(cli.verbose);

    let result = match cli.command {
        cli::Commands::Place {
            ref file,
            ref pages,
            ref format,
            scale,
            ref layout,
        } => place_cmd::run(file, pages.as_deref(), format, scale, layout),
        cli::Commands::Rows {
            ref file,
            ref pages,
            ref format,
            ref layout,
        } => rows_cmd::run(file, pages.as_deref(), format, layout),
        cli::Commands::Analyze {
            ref file,
            ref pages,
            ref format,
            ref layout,
        } => analyze_cmd::run(file, pages.as_deref(), format, layout),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

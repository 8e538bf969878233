use clap::Parser;
use miette::Result;
use uqt::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for readable diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::MonteCarlo(args) => uqt::cli::commands::rod::run_monte_carlo(&args),
        Commands::Chaos(args) => uqt::cli::commands::rod::run_chaos(&args),
        Commands::Taguchi(args) => uqt::cli::commands::taguchi::run(&args),
        Commands::Oscillator(args) => uqt::cli::commands::oscillator::run(&args),
        Commands::Pca(args) => uqt::cli::commands::pca::run(&args),
    }
}

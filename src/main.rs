use clap::Parser;
use miette::Result;
use atlas_extract::cli::{Cli, Commands};
use atlas_extract::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().verbose_mode(cli.verbose);

    match cli.command.unwrap_or_default() {
        Commands::Run(args) => atlas_extract::cli::run::run(args, &printer)?,
        Commands::Export(args) => atlas_extract::cli::export::run(args, &printer)?,
        Commands::List(args) => atlas_extract::cli::list::run(args, &printer)?,
        Commands::Init(args) => atlas_extract::cli::init::run(args, &printer)?,
        Commands::Completions(args) => atlas_extract::cli::completions::run(args)?,
    }

    Ok(())
}

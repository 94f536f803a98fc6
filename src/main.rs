use clap::Parser;
use dtk::cli::{Cli, Commands};
use dtk::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Build(args) => dtk::cli::build::run(args, &printer)?,
        Commands::Validate(args) => dtk::cli::validate::run(args, &printer)?,
        Commands::List(args) => dtk::cli::list::run(args, &printer)?,
        Commands::Init(args) => dtk::cli::init::run(args, &printer)?,
        Commands::Completions(args) => dtk::cli::completions::run(args)?,
    }

    Ok(())
}

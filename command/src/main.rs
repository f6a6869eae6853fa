use adjacent_command::Cli;
use adjacent_command::init_tracing;
use adjacent_command::run;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug_requested());
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("adjacent: {err:#}");
            std::process::exit(2);
        }
    }
}

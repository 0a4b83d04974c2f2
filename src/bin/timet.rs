use std::io;
use std::process;

fn main() {
    let cli = timet::cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    let code = match timet::cli::commands::run_command(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(code);
}

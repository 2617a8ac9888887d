use clap::Parser;
use covdot::{Args, Config};
use log::info;

fn main() {
    let args = Args::parse();

    // Initialize logger based on verbosity
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    info!("Starting figure...");

    let config = match Config::from_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error processing command line options: {:#}", e);
            std::process::exit(1);
        }
    };

    match covdot::run(&config) {
        Ok(report) => {
            if let Some(path) = &report.output {
                info!("Figure written to {}", path.display());
            }
            info!("Done.");
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

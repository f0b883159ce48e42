use clap::FromArgMatches;

use screengrab::cli::{self, Args, Command, Session};
use screengrab::{HostEnvironment, OptionCatalog};

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

fn main() {
    // .env must be loaded before the host environment is captured.
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
    init_logging();

    let host = HostEnvironment::detect();
    let catalog = OptionCatalog::build(&host);

    let matches = cli::command(&catalog).get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    let cli_values = cli::cli_values(&catalog, &matches);

    let session = Session {
        catalog: &catalog,
        host: &host,
        cli: &cli_values,
        config_path: args.config.as_deref(),
        json: args.json,
    };

    let result = match args.command {
        Some(Command::Options) => {
            cli::list_options(&catalog);
            Ok(())
        }
        Some(Command::Config { action }) => cli::handle_config_action(action, &session),
        None => cli::run(&session),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod cli;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::GenieCli::parse();

    let err_exit = ExitCode::from(1);
    let ok_exit = ExitCode::from(0);

    let config = match cli.config() {
        Ok(config) => config,
        Err(err) => {
            println!("Error parsing config.toml: {err}");
            return err_exit;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match cli::run(cli, config) {
        Ok(_) => ok_exit,
        Err(err) => {
            log::error!("{err}");
            err_exit
        }
    }
}

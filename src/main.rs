use msatile::cli::Cli;
use clap::Parser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => match cli.run() {
            Ok(()) => 0,
            Err(error) => {
                log::error!("{}", error);
                error.exit_code()
            }
        },
        Err(error) => {
            // clap already printed usage/help to stdout/stderr
            eprint!("{}", error);
            1
        }
    };

    std::process::exit(exit_code);
}

use dotenvy::dotenv;
use log::*;
use msg_common::cli::handle_command_line_args;
use passport_server::{config::PassportConfig, server::run_server, CLI_HELP, DISPLAY_ENVS};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args(CLI_HELP, &DISPLAY_ENVS) {
        return;
    }
    let config = match PassportConfig::try_from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("🚀️ {e}");
            eprintln!("{e}");
            std::process::exit(1);
        },
    };
    info!("🚀️ Starting passport on {}:{}", config.host, config.port);
    match run_server(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}

use api_gateway::{config::GatewayConfig, server::run_server, CLI_HELP, DISPLAY_ENVS};
use dotenvy::dotenv;
use log::*;
use msg_common::cli::handle_command_line_args;

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args(CLI_HELP, &DISPLAY_ENVS) {
        return;
    }
    let config = match GatewayConfig::try_from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("🚀️ {e}");
            eprintln!("{e}");
            std::process::exit(1);
        },
    };
    info!("🚀️ Starting gateway on {}:{}", config.host, config.port);
    if let Err(e) = run_server(config).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

use dotenvy::dotenv;
use log::*;
use msg_common::cli::handle_command_line_args;
use posts_server::{config::PostsConfig, server::run_server, CLI_HELP, DISPLAY_ENVS};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args(CLI_HELP, &DISPLAY_ENVS) {
        return;
    }
    let config = match PostsConfig::try_from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("🚀️ {e}");
            eprintln!("{e}");
            std::process::exit(1);
        },
    };
    info!("🚀️ Starting posts service on {}:{}", config.host, config.port);
    if let Err(e) = run_server(config).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

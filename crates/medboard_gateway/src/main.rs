use log::LevelFilter;
use medboard_gateway::{serve, GatewayConfig};
use medboard_logging::board_error;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("gateway configuration error: {err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = serve(config).await {
        board_error!("gateway failed: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

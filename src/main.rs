use anyhow::Context;
use clap::Parser;
use netaddr::utils::{logger, validation::Validate};
use netaddr::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let address = match config.resolve() {
        Ok(address) => address,
        Err(e) => {
            tracing::error!("Failed to resolve address: {}", e);
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::debug!(host = address.host(), port = address.port(), "resolved address");

    let output = config
        .render(&address)
        .with_context(|| format!("failed to render {}", address))?;
    println!("{}", output);

    Ok(())
}

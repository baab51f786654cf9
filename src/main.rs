use clap::Parser;
use messaging::utils::{logger, validation::Validate};
use messaging::{Adapter, CliConfig, Message, MessagingConfig, MessagingError};

async fn run(cli: &CliConfig) -> Result<String, MessagingError> {
    cli.validate()?;

    let config = MessagingConfig::from_file(&cli.config)?;
    config.validate()?;

    let adapter = config.build_adapter(&cli.adapter)?;
    let raw = std::fs::read_to_string(&cli.message)?;
    let message: Message = serde_json::from_str(&raw)?;

    if message.message_type().as_str() != adapter.adapter_type() {
        tracing::warn!(
            "Sending a {} message through {} adapter '{}'",
            message.message_type(),
            adapter.adapter_type(),
            adapter.name()
        );
    }
    if message.recipients().len() > adapter.max_messages_per_request() {
        tracing::warn!(
            "{} recipients exceed the per-request limit of {} for '{}'",
            message.recipients().len(),
            adapter.max_messages_per_request(),
            adapter.name()
        );
    }

    tracing::info!("Sending via {} ({})", adapter.name(), adapter.url());
    let response = adapter.send(&message).await?;
    Ok(response)
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli).await {
        Ok(response) => {
            tracing::info!("Message delivered");
            println!("{}", response);
        }
        Err(e) => {
            tracing::error!("Delivery failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

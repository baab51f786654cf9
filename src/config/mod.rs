pub mod toml_config;

pub use toml_config::{HttpConfig, MessagingConfig, WebhookConfig};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "messaging")]
    #[command(about = "Deliver a message through a configured provider adapter")]
    pub struct CliConfig {
        #[arg(long, default_value = "messaging.toml")]
        pub config: String,

        #[arg(long, help = "Name of the adapter to deliver through")]
        pub adapter: String,

        #[arg(long, help = "Path to the message JSON file")]
        pub message: String,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("config", &self.config)?;
            validation::validate_non_empty_string("adapter", &self.adapter)?;
            validation::validate_path("message", &self.message)
        }
    }
}

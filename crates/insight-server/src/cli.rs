use clap::Parser;
use insight_config::InsightsConfig;

/// Command-line flags for the `insightd` binary.
#[derive(Debug, Parser)]
#[command(name = "insightd", version, about = "Insight card service with CSV import and export")]
pub struct Cli {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database file path, or :memory: (overrides database.path)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut InsightsConfig) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = &self.database {
            config.database.path.clone_from(path);
        }
    }
}

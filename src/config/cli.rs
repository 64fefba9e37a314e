use crate::config::toml_config::AuditConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gmail-audit")]
#[command(about = "Inventory the services a mailbox is registered with")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Maximum number of messages to scan; non-numeric values are ignored
    #[arg(long, env = "MAX_MESSAGES", global = true)]
    pub max_messages: Option<String>,

    /// Gmail search query
    #[arg(long, env = "GMAIL_QUERY", global = true)]
    pub query: Option<String>,

    /// OAuth access token with the gmail.readonly scope
    #[arg(long, env = "GMAIL_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub access_token: Option<String>,

    /// Directory the CSV and YAML files live in
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output", global = true)]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Scan the mailbox and write the per-domain sites CSV
    Aggregate,
    /// Categorize the sites CSV into the catalog CSV
    Catalog,
    /// Aggregate, then build the catalog
    Run,
}

impl CliConfig {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve(&self) -> Result<AuditConfig> {
        let mut config = match &self.config {
            Some(path) => AuditConfig::from_file(path)?,
            None => AuditConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AuditConfig) {
        if let Some(raw) = &self.max_messages {
            match raw.trim().parse::<usize>() {
                Ok(max_messages) => config.gmail.max_messages = max_messages,
                Err(_) => tracing::warn!(
                    "⚠️ Ignoring non-numeric max_messages {:?}, keeping {}",
                    raw,
                    config.gmail.max_messages
                ),
            }
        }
        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            config.gmail.query = query.clone();
        }
        if let Some(token) = &self.access_token {
            config.gmail.access_token = Some(token.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = CliConfig::try_parse_from([
            "gmail-audit",
            "--max-messages",
            "20",
            "--query",
            "subject:verify",
            "--output-dir",
            "/tmp/audit",
            "aggregate",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Aggregate);

        let mut config = AuditConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.gmail.max_messages, 20);
        assert_eq!(config.gmail.query, "subject:verify");
        assert_eq!(config.output.directory, "/tmp/audit");
    }

    #[test]
    fn test_empty_query_keeps_default() {
        let cli = CliConfig::try_parse_from(["gmail-audit", "catalog", "--query", ""]).unwrap();
        let mut config = AuditConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.gmail.query, AuditConfig::default().gmail.query);
    }

    #[test]
    fn test_non_numeric_max_messages_keeps_default() {
        let cli =
            CliConfig::try_parse_from(["gmail-audit", "run", "--max-messages", "lots"]).unwrap();
        let mut config = AuditConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.gmail.max_messages, 500);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(CliConfig::try_parse_from(["gmail-audit"]).is_err());
    }
}

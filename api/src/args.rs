use std::{path::PathBuf, time::Duration};

use caltrax_core::domain::common::{
    BillingConfig, CaltraxConfig, DatabaseConfig, LLMConfig, LocalStorageConfig, SyncConfig,
};
use clap::{Args as ClapArgs, Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "caltrax-api", version, about = "CalTrax nutrition API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub sync: SyncArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub billing: BillingArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StorageArgs {
    #[arg(long = "data-dir", env = "DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    /// Remote mirror and billing source. Omit to run local-only.
    #[arg(long = "database-url", env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(
        long = "database-max-connections",
        env = "DATABASE_MAX_CONNECTIONS",
        default_value_t = 10
    )]
    pub max_connections: u32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SyncArgs {
    #[arg(long = "sync-timeout-secs", env = "SYNC_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", default_value = "")]
    pub openai_api_key: String,

    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub openai_model: String,

    #[arg(
        long = "openai-base-url",
        env = "OPENAI_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub openai_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AuthArgs {
    /// PEM encoded RSA public key of the identity provider (RS256).
    #[arg(long = "auth-jwt-public-key", env = "AUTH_JWT_PUBLIC_KEY")]
    pub jwt_public_key: Option<String>,

    /// Shared secret for HS256 tokens, used when no public key is set.
    #[arg(long = "auth-jwt-secret", env = "AUTH_JWT_SECRET")]
    pub jwt_secret: Option<String>,

    #[arg(long = "auth-issuer", env = "AUTH_ISSUER")]
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BillingArgs {
    #[arg(
        long = "require-subscription",
        env = "REQUIRE_SUBSCRIPTION",
        default_value_t = false
    )]
    pub require_subscription: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-format", env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub format: LogFormat,
}

impl From<Args> for CaltraxConfig {
    fn from(args: Args) -> Self {
        CaltraxConfig {
            storage: LocalStorageConfig {
                data_dir: args.storage.data_dir,
            },
            database: args.database.database_url.map(|url| DatabaseConfig {
                url,
                max_connections: args.database.max_connections,
            }),
            sync: SyncConfig {
                timeout: Duration::from_secs(args.sync.timeout_secs),
            },
            llm: LLMConfig {
                openai_api_key: args.llm.openai_api_key,
                openai_model: args.llm.openai_model,
                openai_base_url: args.llm.openai_base_url,
            },
            billing: BillingConfig {
                require_subscription: args.billing.require_subscription,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_map_onto_core_config() {
        let args = Args::parse_from([
            "caltrax-api",
            "--data-dir",
            "/tmp/caltrax",
            "--auth-jwt-secret",
            "secret",
            "--sync-timeout-secs",
            "2",
        ]);
        let config = CaltraxConfig::from(args);

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/caltrax"));
        assert_eq!(config.sync.timeout, Duration::from_secs(2));
    }

    #[test]
    fn origins_are_comma_separated() {
        let args = Args::parse_from([
            "caltrax-api",
            "--allowed-origins",
            "https://app.caltrax.ai,http://localhost:5173",
        ]);

        assert_eq!(
            args.server.allowed_origins,
            vec!["https://app.caltrax.ai", "http://localhost:5173"]
        );
    }
}

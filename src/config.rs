use std::{path::Path, time::Duration};

use ethers::types::Address;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment error: {0}")]
    Env(#[from] envy::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
/// Configuration for the faucet client.
///
/// Content of this configuration is loaded from environment variables or
/// an env file when the [Config::load()] is called.
/// Variable names in the enviroment and `.env` file must be prefixed with
/// [FAUCET_](Config::CONFIG_PREFIX) and written as SCREAMING_SNAKE_CASE
/// (e.g. `FAUCET_CONTRACT_ADDRESS`).
pub struct Config {
    /// JSON-RPC endpoint of the wallet; no wallet is available if unset
    pub wallet_rpc_url: Option<String>,
    /// Address of the deployed faucet contract
    pub contract_address: String,
    /// How often the wallet is asked for its accounts to detect changes
    #[serde(default = "default_accounts_poll_interval_ms")]
    pub accounts_poll_interval_ms: u64,
    /// Where logs are written, the terminal itself is taken by the UI
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_accounts_poll_interval_ms() -> u64 {
    1000
}

fn default_log_file() -> String {
    "uplift-faucet.log".to_owned()
}

impl Config {
    /// Prefix of configuration options in the environment variables and `.env`
    /// file.
    const CONFIG_PREFIX: &'static str = "FAUCET_";

    /// Loads a configuration from operating system environment variables and
    /// the `env_file`.
    ///
    /// Failing to read `env_file` is not fatal, the error is returned next to
    /// the configuration so it can be logged once logging is set up.
    pub fn load(
        env_file: impl AsRef<Path>,
    ) -> Result<(Self, Option<dotenvy::Error>), ConfigError> {
        let env_file_error = dotenvy::from_path(env_file).err();

        let config: Self = envy::prefixed(Self::CONFIG_PREFIX).from_env()?;
        config.validate()?;

        Ok((config, env_file_error))
    }

    /// Builds a configuration from explicit key-value pairs, keys are expected
    /// to carry the [FAUCET_](Config::CONFIG_PREFIX) prefix.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(Self::CONFIG_PREFIX).from_iter(pairs)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!("{:?}", self)))
        }
    }

    /// Check if configuration is set
    pub fn is_valid(&self) -> bool {
        self.accounts_poll_interval_ms != 0
            && self
                .contract_address()
                .is_ok_and(|address| !address.is_zero())
            && self
                .wallet_rpc_url
                .as_ref()
                .map_or(true, |url| !url.trim().is_empty())
    }

    /// Faucet contract address
    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        self.contract_address
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("bad address {}", self.contract_address)))
    }

    pub fn accounts_poll_interval(&self) -> Duration {
        Duration::from_millis(self.accounts_poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_contract_is_set() {
        let config = Config::from_pairs(pairs(&[("FAUCET_CONTRACT_ADDRESS", CONTRACT)]))
            .expect("valid config");

        assert!(config.wallet_rpc_url.is_none());
        assert_eq!(config.accounts_poll_interval(), Duration::from_secs(1));
        assert_eq!(config.log_file, "uplift-faucet.log");
        assert_eq!(
            config.contract_address().unwrap(),
            CONTRACT.parse::<Address>().unwrap()
        );
    }

    #[test]
    fn wallet_url_and_interval_are_read() {
        let config = Config::from_pairs(pairs(&[
            ("FAUCET_CONTRACT_ADDRESS", CONTRACT),
            ("FAUCET_WALLET_RPC_URL", "http://127.0.0.1:1248"),
            ("FAUCET_ACCOUNTS_POLL_INTERVAL_MS", "250"),
        ]))
        .expect("valid config");

        assert_eq!(
            config.wallet_rpc_url.as_deref(),
            Some("http://127.0.0.1:1248")
        );
        assert_eq!(config.accounts_poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn missing_contract_is_an_error() {
        let result = Config::from_pairs(pairs(&[("FAUCET_WALLET_RPC_URL", "http://x")]));
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn zero_or_malformed_contract_is_rejected() {
        for address in ["0x0000000000000000000000000000000000000000", "0x1234", "faucet"] {
            let result = Config::from_pairs(pairs(&[("FAUCET_CONTRACT_ADDRESS", address)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid(_))),
                "{address} accepted"
            );
        }
    }

    #[test]
    fn env_file_is_read_and_missing_file_is_reported() {
        let env_file =
            std::env::temp_dir().join(format!("uplift-faucet-{}.env", std::process::id()));
        std::fs::write(
            &env_file,
            format!("FAUCET_CONTRACT_ADDRESS={CONTRACT}\nFAUCET_LOG_FILE=from-env-file.log\n"),
        )
        .unwrap();

        let (config, env_file_error) = Config::load(&env_file).expect("valid config");
        std::fs::remove_file(&env_file).unwrap();
        assert!(env_file_error.is_none());
        assert_eq!(config.log_file, "from-env-file.log");

        // values loaded above stay in the process environment
        let (config, env_file_error) = Config::load(&env_file).expect("valid config");
        assert!(env_file_error.is_some());
        assert_eq!(config.log_file, "from-env-file.log");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let result = Config::from_pairs(pairs(&[
            ("FAUCET_CONTRACT_ADDRESS", CONTRACT),
            ("FAUCET_ACCOUNTS_POLL_INTERVAL_MS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}

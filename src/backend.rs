//! Application backend.
//! This includes all logic unrelated to UI.

pub mod contract;
pub mod error;
pub(crate) mod faucet;
pub mod provider;
pub mod state;
pub(crate) mod wallet;

use std::sync::Arc;

use ethers::{providers::Http, types::Address};
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::Mutex;

pub use self::{
    error::{FaucetError, WalletError},
    faucet::FaucetTask,
    provider::{RpcWalletProvider, WalletProvider},
    state::{AppState, FaucetForm, FaucetSnapshot, FormUpdate, RequestOutcome, UpliftInfo},
    wallet::WalletTask,
};
use crate::config::{Config, ConfigError};

#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Wallet(WalletTask),
    Faucet(FaucetTask),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppStateUpdate {
    Faucet(FaucetSnapshot),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    TaskCompleted {
        task: Task,
        execution_result: Result<String, String>,
    },
    TaskCompletedStateChange {
        task: Task,
        execution_result: Result<String, String>,
        app_state_update: AppStateUpdate,
    },
    AppStateUpdated(AppStateUpdate),
    None,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

pub struct Backend {
    wallet: Option<Arc<dyn WalletProvider>>,
    contract_address: Address,
    app_state: Mutex<AppState>,
}

impl Backend {
    /// Creates a backend, `wallet` is `None` when no wallet is available.
    pub fn new(wallet: Option<Arc<dyn WalletProvider>>, contract_address: Address) -> Self {
        Backend {
            wallet,
            contract_address,
            app_state: Mutex::new(AppState::default()),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let wallet = match &config.wallet_rpc_url {
            Some(url) => {
                let provider =
                    RpcWalletProvider::<Http>::connect(url, config.accounts_poll_interval())?;
                Some(Arc::new(provider) as Arc<dyn WalletProvider>)
            }
            None => {
                tracing::warn!("no wallet configured, set FAUCET_WALLET_RPC_URL to connect one");
                None
            }
        };

        Ok(Self::new(wallet, config.contract_address()?))
    }

    pub async fn snapshot(&self) -> FaucetSnapshot {
        self.app_state.lock().await.snapshot()
    }

    /// Account changes pushed by the wallet, never yields without one.
    pub fn account_changes(&self) -> BoxStream<'static, Vec<String>> {
        match &self.wallet {
            Some(wallet) => wallet.account_changes(),
            None => stream::pending().boxed(),
        }
    }

    /// Runs a task and yields every event it produces, the last one marks its
    /// completion. Only a token request reports an intermediate state.
    pub fn task_events(&self, task: Task) -> BoxStream<'_, BackendEvent> {
        match task {
            Task::Faucet(FaucetTask::RequestTokens) => {
                faucet::request_tokens_events(&self.app_state)
            }
            task => stream::once(self.run_task(task)).boxed(),
        }
    }

    pub async fn run_task(&self, task: Task) -> BackendEvent {
        match task {
            Task::Wallet(task) => {
                wallet::run_wallet_task(
                    self.wallet.as_deref(),
                    self.contract_address,
                    &self.app_state,
                    task,
                )
                .await
            }
            Task::Faucet(task) => faucet::run_faucet_task(&self.app_state, task).await,
        }
    }
}

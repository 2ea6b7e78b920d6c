//! Wallet connection tasks.

use ethers::types::Address;
use tokio::sync::Mutex;

use super::{
    error::WalletError,
    provider::WalletProvider,
    state::{AppState, Session},
    AppStateUpdate, BackendEvent, Task,
};

#[derive(Debug, Clone, PartialEq)]
pub enum WalletTask {
    /// Ask the wallet for account access
    Connect,
    /// Pick up accounts the wallet authorized in an earlier run
    RestoreSession,
    /// Wallet reported a new account list
    AccountsChanged(Vec<String>),
}

pub(super) async fn run_wallet_task(
    wallet: Option<&dyn WalletProvider>,
    contract_address: Address,
    app_state: &Mutex<AppState>,
    task: WalletTask,
) -> BackendEvent {
    let Some(wallet) = wallet else {
        tracing::warn!(?task, "no wallet available, please install one");
        return BackendEvent::None;
    };

    match task {
        WalletTask::Connect => match wallet.request_accounts().await {
            Ok(accounts) => {
                match open_session(wallet, contract_address, app_state, &accounts).await {
                    Ok(address) => state_changed(
                        app_state,
                        Task::Wallet(WalletTask::Connect),
                        Ok(format!("Connected {address}")),
                    )
                    .await,
                    Err(err) => {
                        tracing::error!(%err, "wallet connection failed");
                        BackendEvent::None
                    }
                }
            }
            Err(err) => {
                tracing::error!(%err, "wallet connection failed");
                BackendEvent::None
            }
        },
        WalletTask::RestoreSession => match wallet.accounts().await {
            Ok(accounts) if accounts.is_empty() => {
                tracing::info!("connect to the wallet using the connect command");
                BackendEvent::None
            }
            Ok(accounts) => {
                match open_session(wallet, contract_address, app_state, &accounts).await {
                    Ok(address) => state_changed(
                        app_state,
                        Task::Wallet(WalletTask::RestoreSession),
                        Ok(format!("Connected {address}")),
                    )
                    .await,
                    Err(err) => {
                        tracing::error!(%err, "failed to restore wallet session");
                        BackendEvent::None
                    }
                }
            }
            Err(err) => {
                tracing::error!(%err, "failed to query wallet accounts");
                BackendEvent::None
            }
        },
        WalletTask::AccountsChanged(accounts) if accounts.is_empty() => {
            tracing::info!("wallet has no accounts anymore, closing session");
            app_state.lock().await.close_session();
            state_changed(
                app_state,
                Task::Wallet(WalletTask::AccountsChanged(accounts)),
                Ok("Disconnected".to_owned()),
            )
            .await
        }
        WalletTask::AccountsChanged(accounts) => {
            match open_session(wallet, contract_address, app_state, &accounts).await {
                Ok(address) => {
                    state_changed(
                        app_state,
                        Task::Wallet(WalletTask::AccountsChanged(accounts)),
                        Ok(format!("Switched to {address}")),
                    )
                    .await
                }
                Err(err) => {
                    tracing::error!(%err, "failed to switch account");
                    BackendEvent::None
                }
            }
        }
    }
}

/// Binds signer and faucet to the first account, returns that account.
async fn open_session(
    wallet: &dyn WalletProvider,
    contract_address: Address,
    app_state: &Mutex<AppState>,
    accounts: &[String],
) -> Result<String, WalletError> {
    let account = accounts.first().ok_or(WalletError::NoAccounts)?;
    let signer: Address = account
        .parse()
        .map_err(|_| WalletError::InvalidAccount(account.clone()))?;

    let session = Session {
        signer,
        faucet: wallet.bind_faucet(contract_address, signer),
    };

    tracing::info!(%account, "wallet session opened");
    app_state
        .lock()
        .await
        .open_session(account.clone(), session);

    Ok(account.clone())
}

async fn state_changed(
    app_state: &Mutex<AppState>,
    task: Task,
    execution_result: Result<String, String>,
) -> BackendEvent {
    BackendEvent::TaskCompletedStateChange {
        task,
        execution_result,
        app_state_update: AppStateUpdate::Faucet(app_state.lock().await.snapshot()),
    }
}

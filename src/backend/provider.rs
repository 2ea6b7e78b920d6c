//! Wallet provider bridge.
//!
//! The wallet is an external program that holds the user's keys and speaks
//! the EIP-1193 account methods over JSON-RPC. The application only asks it
//! for account access, looks up already authorized accounts and listens for
//! account changes, everything else (signing, chain selection) stays inside
//! the wallet.

use std::{sync::Arc, time::Duration};

use ethers::{
    providers::{Http, JsonRpcClient, Provider},
    types::Address,
};
use futures::{
    future::BoxFuture,
    stream::{self, BoxStream},
    FutureExt, StreamExt,
};

use super::{
    contract::{RpcTokenFaucet, TokenFaucet},
    error::WalletError,
};

/// Operations the application needs from a wallet.
pub trait WalletProvider: Send + Sync {
    /// Asks the user to authorize accounts (`eth_requestAccounts`).
    fn request_accounts(&self) -> BoxFuture<'_, Result<Vec<String>, WalletError>>;

    /// Returns accounts authorized earlier without prompting (`eth_accounts`).
    fn accounts(&self) -> BoxFuture<'_, Result<Vec<String>, WalletError>>;

    /// Stream of account lists, one item per change. The list the wallet
    /// reports on subscription is not emitted.
    fn account_changes(&self) -> BoxStream<'static, Vec<String>>;

    /// Binds the faucet contract deployed at `contract` to `signer`.
    fn bind_faucet(&self, contract: Address, signer: Address) -> Arc<dyn TokenFaucet>;
}

/// [WalletProvider] talking to a wallet's JSON-RPC endpoint.
pub struct RpcWalletProvider<P> {
    client: Arc<Provider<P>>,
    poll_interval: Duration,
}

impl RpcWalletProvider<Http> {
    pub fn connect(url: &str, poll_interval: Duration) -> Result<Self, WalletError> {
        let provider = Provider::<Http>::try_from(url)
            .map_err(|err| WalletError::Rpc(format!("invalid wallet url {url}: {err}")))?;

        Ok(Self::new(provider, poll_interval))
    }
}

impl<P: JsonRpcClient + 'static> RpcWalletProvider<P> {
    pub fn new(provider: Provider<P>, poll_interval: Duration) -> Self {
        RpcWalletProvider {
            client: Arc::new(provider),
            poll_interval,
        }
    }
}

impl<P: JsonRpcClient + 'static> WalletProvider for RpcWalletProvider<P> {
    fn request_accounts(&self) -> BoxFuture<'_, Result<Vec<String>, WalletError>> {
        async move { Ok(self.client.request("eth_requestAccounts", ()).await?) }.boxed()
    }

    fn accounts(&self) -> BoxFuture<'_, Result<Vec<String>, WalletError>> {
        async move { Ok(self.client.request("eth_accounts", ()).await?) }.boxed()
    }

    fn account_changes(&self) -> BoxStream<'static, Vec<String>> {
        let poll_interval = self.poll_interval;

        stream::unfold(
            (Arc::clone(&self.client), None::<Vec<String>>),
            move |(client, mut last_seen)| async move {
                loop {
                    tokio::time::sleep(poll_interval).await;

                    match client.request::<_, Vec<String>>("eth_accounts", ()).await {
                        Ok(accounts) => {
                            let changed = last_seen
                                .as_ref()
                                .is_some_and(|previous| *previous != accounts);
                            last_seen = Some(accounts.clone());
                            if changed {
                                return Some((accounts, (client, last_seen)));
                            }
                        }
                        Err(err) => tracing::debug!(?err, "accounts poll failed"),
                    }
                }
            },
        )
        .boxed()
    }

    fn bind_faucet(&self, contract: Address, signer: Address) -> Arc<dyn TokenFaucet> {
        Arc::new(RpcTokenFaucet::new(
            Arc::clone(&self.client),
            contract,
            signer,
        ))
    }
}

//! Binding to the deployed faucet contract.

use std::sync::Arc;

use ethers::{
    contract::abigen,
    providers::{JsonRpcClient, Provider},
    types::Address,
};
use futures::{future::BoxFuture, FutureExt};

use super::error::FaucetError;

abigen!(
    UpliftFaucet,
    r#"[
        function requestTokens()
    ]"#
);

/// A faucet handle already bound to a contract address and a signer.
pub trait TokenFaucet: Send + Sync {
    /// Requests the faucet's fixed token amount for the bound signer and
    /// returns the transaction hash as the wallet reported it.
    fn request_tokens(&self) -> BoxFuture<'_, Result<String, FaucetError>>;
}

/// [TokenFaucet] that hands the contract call to the wallet as
/// `eth_sendTransaction`, the wallet fills gas and signs it.
pub struct RpcTokenFaucet<P> {
    client: Arc<Provider<P>>,
    contract: UpliftFaucet<Provider<P>>,
    signer: Address,
}

impl<P: JsonRpcClient + 'static> RpcTokenFaucet<P> {
    pub fn new(client: Arc<Provider<P>>, contract: Address, signer: Address) -> Self {
        RpcTokenFaucet {
            contract: UpliftFaucet::new(contract, Arc::clone(&client)),
            client,
            signer,
        }
    }
}

impl<P: JsonRpcClient + 'static> TokenFaucet for RpcTokenFaucet<P> {
    fn request_tokens(&self) -> BoxFuture<'_, Result<String, FaucetError>> {
        async move {
            let tx = self
                .contract
                .request_tokens()
                .from(self.signer)
                .legacy()
                .tx;

            tracing::debug!(?tx, "sending requestTokens");

            // the transaction is already out once the wallet answers, its hash
            // is not reparsed
            let tx_hash: String = self.client.request("eth_sendTransaction", [tx]).await?;
            Ok(tx_hash)
        }
        .boxed()
    }
}

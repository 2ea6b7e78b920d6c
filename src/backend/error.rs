use ethers::providers::{ProviderError, RpcError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WalletError {
    #[error("{0}")]
    Rpc(String),
    #[error("wallet returned an invalid account {0}")]
    InvalidAccount(String),
    #[error("wallet granted no accounts")]
    NoAccounts,
}

impl From<ProviderError> for WalletError {
    fn from(value: ProviderError) -> Self {
        WalletError::Rpc(rpc_error_message(&value))
    }
}

/// Failure of a faucet call. Only the message text reaches the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct FaucetError(pub String);

impl From<ProviderError> for FaucetError {
    fn from(value: ProviderError) -> Self {
        FaucetError(rpc_error_message(&value))
    }
}

/// Extracts the message a wallet put in its JSON-RPC error response, falling
/// back to the whole error text for transport failures.
pub(crate) fn rpc_error_message(error: &ProviderError) -> String {
    error
        .as_error_response()
        .map(|response| response.message.clone())
        .unwrap_or_else(|| error.to_string())
}

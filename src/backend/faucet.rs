//! Faucet form and token request tasks.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::Mutex;

use super::{
    contract::TokenFaucet,
    state::{AppState, FaucetSnapshot, FormUpdate, RequestOutcome, UpliftInfo, SUCCESS_MESSAGE},
    AppStateUpdate, BackendEvent, Task,
};

#[derive(Debug, Clone, PartialEq)]
pub enum FaucetTask {
    UpdateForm(FormUpdate),
    RequestTokens,
}

/// Token request that passed the checks and is waiting for the wallet.
struct PendingRequest {
    faucet: Arc<dyn TokenFaucet>,
    uplift: UpliftInfo,
    /// State right after the previous outcome was dropped
    reset: FaucetSnapshot,
}

pub(super) async fn run_faucet_task(app_state: &Mutex<AppState>, task: FaucetTask) -> BackendEvent {
    match task {
        FaucetTask::UpdateForm(update) => {
            let mut state = app_state.lock().await;
            state.form.apply(update.clone());
            BackendEvent::TaskCompletedStateChange {
                task: Task::Faucet(FaucetTask::UpdateForm(update)),
                execution_result: Ok("Uplift details updated".to_owned()),
                app_state_update: AppStateUpdate::Faucet(state.snapshot()),
            }
        }
        FaucetTask::RequestTokens => match begin_request(app_state).await {
            Some(request) => finish_request(app_state, request).await,
            None => BackendEvent::None,
        },
    }
}

/// Token request as a stream: the reset state is published before the wallet
/// is called, the result follows once it answers.
pub(super) fn request_tokens_events(
    app_state: &Mutex<AppState>,
) -> BoxStream<'_, BackendEvent> {
    stream::once(begin_request(app_state))
        .flat_map(move |request| match request {
            Some(request) => {
                let reset =
                    BackendEvent::AppStateUpdated(AppStateUpdate::Faucet(request.reset.clone()));
                stream::iter([reset])
                    .chain(stream::once(finish_request(app_state, request)))
                    .boxed()
            }
            None => stream::iter([BackendEvent::None]).boxed(),
        })
        .boxed()
}

async fn begin_request(app_state: &Mutex<AppState>) -> Option<PendingRequest> {
    let mut state = app_state.lock().await;

    if state.form.wallet_address.is_empty() {
        tracing::warn!("no wallet address entered, token request ignored");
        return None;
    }
    let Some(session) = state.session.as_ref() else {
        tracing::warn!("wallet is not connected, token request ignored");
        return None;
    };

    let faucet = Arc::clone(&session.faucet);
    let uplift = UpliftInfo::from(&state.form);
    state.outcome = RequestOutcome::Idle;

    Some(PendingRequest {
        faucet,
        uplift,
        reset: state.snapshot(),
    })
}

async fn finish_request(app_state: &Mutex<AppState>, request: PendingRequest) -> BackendEvent {
    // not holding the state lock while the wallet waits for the user
    let result = request.faucet.request_tokens().await;

    let mut state = app_state.lock().await;
    let execution_result = match result {
        Ok(transaction_hash) => {
            tracing::info!(%transaction_hash, "tokens requested");
            state.outcome = RequestOutcome::Succeeded {
                message: SUCCESS_MESSAGE.to_owned(),
                transaction_hash,
                uplift: request.uplift,
            };
            Ok(SUCCESS_MESSAGE.to_owned())
        }
        Err(err) => {
            tracing::error!(%err, "token request failed");
            state.outcome = RequestOutcome::Failed {
                message: err.to_string(),
            };
            Err(err.to_string())
        }
    };

    BackendEvent::TaskCompletedStateChange {
        task: Task::Faucet(FaucetTask::RequestTokens),
        execution_result,
        app_state_update: AppStateUpdate::Faucet(state.snapshot()),
    }
}

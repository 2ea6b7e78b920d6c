//! Application state module.
//! Holds the wallet session and the outcome of the last faucet request,
//! nothing of it survives a restart.

use std::{fmt, sync::Arc};

use ethers::types::Address;

use super::contract::TokenFaucet;

pub(crate) const SUCCESS_MESSAGE: &str = "Uplifting completed!";

const SHORT_ADDRESS_EDGE: usize = 6;

/// Signer and contract handle obtained from a connected wallet.
#[derive(Clone)]
pub struct Session {
    pub signer: Address,
    pub faucet: Arc<dyn TokenFaucet>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

/// What the user typed into the uplift details form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaucetForm {
    pub wallet_address: String,
    pub uplift_action: String,
    pub uplift_date: String,
}

/// Values from a completed uplift details form. The wallet address is `None`
/// when the user left it as it was, so an account switched in the meantime
/// is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormUpdate {
    pub wallet_address: Option<String>,
    pub uplift_action: String,
    pub uplift_date: String,
}

impl FaucetForm {
    pub(crate) fn apply(&mut self, update: FormUpdate) {
        if let Some(wallet_address) = update.wallet_address {
            self.wallet_address = wallet_address;
        }
        self.uplift_action = update.uplift_action;
        self.uplift_date = update.uplift_date;
    }
}

/// Form values captured when a request succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpliftInfo {
    pub wallet_address: String,
    pub uplift_action: String,
    pub uplift_date: String,
}

impl From<&FaucetForm> for UpliftInfo {
    fn from(form: &FaucetForm) -> Self {
        UpliftInfo {
            wallet_address: form.wallet_address.clone(),
            uplift_action: form.uplift_action.clone(),
            uplift_date: form.uplift_date.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Succeeded {
        message: String,
        /// As reported by the wallet, only ever displayed
        transaction_hash: String,
        uplift: UpliftInfo,
    },
    Failed {
        message: String,
    },
}

impl RequestOutcome {
    pub fn success_message(&self) -> Option<&str> {
        match self {
            RequestOutcome::Succeeded { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn transaction_hash(&self) -> Option<&str> {
        match self {
            RequestOutcome::Succeeded {
                transaction_hash, ..
            } => Some(transaction_hash),
            _ => None,
        }
    }

    pub fn uplift(&self) -> Option<&UpliftInfo> {
        match self {
            RequestOutcome::Succeeded { uplift, .. } => Some(uplift),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub form: FaucetForm,
    pub session: Option<Session>,
    pub outcome: RequestOutcome,
}

impl AppState {
    pub fn snapshot(&self) -> FaucetSnapshot {
        FaucetSnapshot {
            form: self.form.clone(),
            connected: self.session.is_some(),
            outcome: self.outcome.clone(),
        }
    }

    pub(crate) fn open_session(&mut self, address: String, session: Session) {
        self.form.wallet_address = address;
        self.session = Some(session);
    }

    pub(crate) fn close_session(&mut self) {
        self.form.wallet_address.clear();
        self.session = None;
    }
}

/// Owned copy of [AppState] handed to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaucetSnapshot {
    pub form: FaucetForm,
    pub connected: bool,
    pub outcome: RequestOutcome,
}

impl FaucetSnapshot {
    /// Requesting tokens makes sense only with an address to show it for.
    pub fn can_request_tokens(&self) -> bool {
        !self.form.wallet_address.is_empty()
    }

    pub fn connection_label(&self) -> String {
        if self.form.wallet_address.is_empty() {
            "Connect Wallet".to_owned()
        } else {
            format!("Connected: {}", short_address(&self.form.wallet_address))
        }
    }

    pub fn transaction_label(&self) -> String {
        match self.outcome.transaction_hash() {
            Some(hash) => format!("Transaction hash: {hash}"),
            None => "--".to_owned(),
        }
    }

    pub fn description(&self) -> String {
        let mut lines = vec!["Uplift Coin Faucet".to_owned(), "10 UPLC".to_owned(), String::new()];

        if let Some(error) = self.outcome.error_message() {
            lines.push(format!("Error: {}", error));
        }
        if let Some(success) = self.outcome.success_message() {
            lines.push(success.to_owned());
        }

        lines.push(String::new());
        lines.push("Transaction Data".to_owned());
        lines.push(self.transaction_label());

        if let Some(uplift) = self.outcome.uplift() {
            lines.push(format!("Wallet: {}", or_dashes(&uplift.wallet_address)));
            lines.push(format!("Uplifting Action: {}", or_dashes(&uplift.uplift_action)));
            lines.push(format!("Date: {}", or_dashes(&uplift.uplift_date)));
        }

        lines.push(String::new());
        lines.push(format!("Address: {}", or_dashes(&self.form.wallet_address)));
        lines.push(format!("Uplifting action: {}", or_dashes(&self.form.uplift_action)));
        lines.push(format!("Date of uplifting: {}", or_dashes(&self.form.uplift_date)));

        lines.join("\n")
    }
}

/// Shortens an address to its first and last six characters.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= SHORT_ADDRESS_EDGE * 2 {
        return address.to_owned();
    }

    let head: String = chars[..SHORT_ADDRESS_EDGE].iter().collect();
    let tail: String = chars[chars.len() - SHORT_ADDRESS_EDGE..].iter().collect();
    format!("{head}...{tail}")
}

fn or_dashes(value: &str) -> &str {
    if value.is_empty() {
        "--"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_address_keeps_six_characters_per_side() {
        assert_eq!(
            short_address("0xAAA0000000000000000000000000000000000111"),
            "0xAAA0...000111"
        );
    }

    #[test]
    fn short_address_is_shown_whole() {
        assert_eq!(short_address("0x12345678"), "0x12345678");
        assert_eq!(short_address(""), "");
    }

    #[test]
    fn connection_label_follows_address() {
        let mut snapshot = FaucetSnapshot::default();
        assert_eq!(snapshot.connection_label(), "Connect Wallet");
        assert!(!snapshot.can_request_tokens());

        snapshot.form.wallet_address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_owned();
        assert_eq!(snapshot.connection_label(), "Connected: 0xf39F...b92266");
        assert!(snapshot.can_request_tokens());
    }

    #[test]
    fn outcome_exposes_one_message_at_a_time() {
        let failed = RequestOutcome::Failed {
            message: "insufficient funds".to_owned(),
        };
        assert_eq!(failed.error_message(), Some("insufficient funds"));
        assert_eq!(failed.success_message(), None);
        assert_eq!(failed.transaction_hash(), None);

        let succeeded = RequestOutcome::Succeeded {
            message: SUCCESS_MESSAGE.to_owned(),
            transaction_hash: "0xdeadbeef".to_owned(),
            uplift: UpliftInfo::default(),
        };
        assert_eq!(succeeded.error_message(), None);
        assert_eq!(succeeded.success_message(), Some(SUCCESS_MESSAGE));
        assert_eq!(succeeded.transaction_hash(), Some("0xdeadbeef"));
    }

    #[test]
    fn description_shows_dashes_for_missing_data() {
        let snapshot = FaucetSnapshot::default();
        let description = snapshot.description();

        assert!(description.contains("Transaction Data\n--"));
        assert!(!description.contains("Uplifting Action:"));
        assert!(description.contains("Date of uplifting: --"));
    }

    #[test]
    fn description_lists_uplift_info_after_success() {
        let snapshot = FaucetSnapshot {
            outcome: RequestOutcome::Succeeded {
                message: SUCCESS_MESSAGE.to_owned(),
                transaction_hash: "0x01".to_owned(),
                uplift: UpliftInfo {
                    wallet_address: "0xabc".to_owned(),
                    uplift_action: "Planted a tree".to_owned(),
                    uplift_date: String::new(),
                },
            },
            ..Default::default()
        };
        let description = snapshot.description();

        assert!(description.contains(SUCCESS_MESSAGE));
        assert!(description.contains("Uplifting Action: Planted a tree"));
        assert!(description.contains("Date: --"));
        assert!(description.contains("Transaction hash: 0x01\n"));
    }

    #[test]
    fn untouched_address_is_kept_on_form_update() {
        let mut form = FaucetForm {
            wallet_address: "0xbbb".to_owned(),
            ..Default::default()
        };

        form.apply(FormUpdate {
            wallet_address: None,
            uplift_action: "Fed the birds".to_owned(),
            uplift_date: "today".to_owned(),
        });
        assert_eq!(form.wallet_address, "0xbbb");
        assert_eq!(form.uplift_action, "Fed the birds");

        form.apply(FormUpdate {
            wallet_address: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(form, FaucetForm::default());
    }
}

//! Application views.

pub(crate) mod faucet;

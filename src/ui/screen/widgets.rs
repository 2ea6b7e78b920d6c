//! Building blocks shared by screens.

pub(crate) mod command_pallet;
pub(crate) mod info;

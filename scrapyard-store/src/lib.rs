pub mod error;
mod fsops;
pub mod index;
pub mod purge;
pub mod record;
pub mod restore;
pub mod scan;
pub mod stash;
pub mod yard;

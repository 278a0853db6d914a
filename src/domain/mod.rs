mod customer;
mod ledger;
mod money;

pub use customer::*;
pub use ledger::*;
pub use money::*;

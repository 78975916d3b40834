mod command;
mod ledger;
mod link;
mod query;
mod tag;

pub use command::*;
pub use ledger::*;
pub use link::*;
pub use query::*;
pub use tag::*;

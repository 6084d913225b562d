//! Record shapes decoded from the RT REST interface.
//!
//! Each type here is a plain value struct implementing
//! [`Record`](crate::decode::Record), with a static field table mapping the
//! protocol keys RT emits onto struct fields. Records carry no reference to
//! the client that fetched them.

mod attachment;
mod comment;
mod custom_field;
mod history;
mod ticket;
mod transaction;

pub use attachment::*;
pub use comment::*;
pub use custom_field::*;
pub use history::*;
pub use ticket::*;
pub use transaction::*;

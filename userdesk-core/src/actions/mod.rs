pub mod dispatcher;
pub mod payload;

pub use dispatcher::{ActionDispatcher, ActionOutcome};
pub use payload::{ActionKind, DecodedAction, StoreCommand, UserAction};

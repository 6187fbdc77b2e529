pub mod user;

pub use user::{FieldUpdate, NewUserRecord, UserRecord};

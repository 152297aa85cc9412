pub mod account;
pub mod command;
pub mod error;
pub mod holding;
pub mod traits;

pub use account::{AccountRecord, NewAccount};
pub use command::{CommandKind, HoldingCommand};
pub use error::Error;
pub use holding::Holding;
pub use traits::{CommandStream, DiagnosticSink, HoldingRepository, PasswordHasher};

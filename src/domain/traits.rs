use futures::Stream;

use crate::domain::{Error, Holding, HoldingCommand};

pub trait CommandStream {
    type CmdStream: Stream<Item = Result<HoldingCommand, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::CmdStream;
}

/// Side channel for failures. Never authoritative: callers still get the
/// `Result`.
pub trait DiagnosticSink {
    fn report(&self, error: &Error);
}

pub trait HoldingRepository {
    fn get_or_create_holding(&mut self, company: &str) -> &mut Holding;
    fn top_holding(&self) -> Option<&Holding>;
    fn flush(&mut self);
}

pub trait PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, Error>;
    fn verify(&self, password: &str, stored: &str) -> bool;
}

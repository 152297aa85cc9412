use crate::domain::{
    CommandKind, Error, HoldingCommand,
    traits::{CommandStream, DiagnosticSink, HoldingRepository},
};

use futures::StreamExt;

#[derive(Debug)]
pub struct Engine<I, O, D>
where
    I: CommandStream,
    O: HoldingRepository,
    D: DiagnosticSink,
{
    ingestion: I,
    output_repository: O,
    diagnostics: D,
}

impl<I, O, D> Engine<I, O, D>
where
    I: CommandStream,
    O: HoldingRepository,
    D: DiagnosticSink,
{
    pub fn new(ingestion: I, output_repository: O, diagnostics: D) -> Self {
        Self {
            ingestion,
            output_repository,
            diagnostics,
        }
    }

    /// Applies every command in the stream. Failed commands are reported and
    /// leave their holding untouched; processing continues.
    pub async fn process(&mut self) -> Result<usize, Error> {
        let mut res = self.ingestion.stream();
        let mut failed = 0;

        while let Some(cmd) = res.next().await {
            let outcome = cmd.and_then(|cmd| self.apply_command(cmd));
            if let Err(e) = outcome {
                failed += 1;
                self.diagnostics.report(&e);
            }
        }

        tracing::debug!(failed, "replay finished");
        Ok(failed)
    }

    fn apply_command(&mut self, cmd: HoldingCommand) -> Result<(), Error> {
        tracing::trace!(%cmd, "applying");
        let holding = self.output_repository.get_or_create_holding(&cmd.company);

        match cmd.kind {
            CommandKind::Acquire { count, price } => holding.acquire(cmd.company, count, price),
            CommandKind::Buy { count, price } => holding.buy(price, count),
            CommandKind::Sell { count, price } => holding.sell(price, count),
            CommandKind::Update { price } => holding.update(price),
        }
    }

    pub fn flush(&mut self) {
        self.output_repository.flush();
    }
}

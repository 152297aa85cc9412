use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::traits::CommandStream;
use crate::domain::{CommandKind, Error, HoldingCommand};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    company: String,
    count: Option<i64>,
    price: Option<Decimal>,
}

impl TryFrom<CsvRow> for HoldingCommand {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        if row.company.is_empty() {
            return Err(Error::Ingestion("Missing company".to_string()));
        }

        let kind = match (
            row.kind.trim().to_ascii_lowercase().as_str(),
            row.count,
            row.price,
        ) {
            ("acquire", Some(count), Some(price)) => CommandKind::Acquire { count, price },
            ("buy", Some(count), Some(price)) => CommandKind::Buy { count, price },
            ("sell", Some(count), Some(price)) => CommandKind::Sell { count, price },
            ("update", _, Some(price)) => CommandKind::Update { price },
            (other @ ("acquire" | "buy" | "sell" | "update"), _, _) => {
                return Err(Error::Ingestion(format!(
                    "Missing count or price for {} on {}",
                    other, row.company
                )));
            }
            (other, _, _) => {
                return Err(Error::Ingestion(format!(
                    "Invalid command type: {}",
                    other
                )));
            }
        };

        Ok(HoldingCommand {
            kind,
            company: row.company,
        })
    }
}

impl<R: Read + Send + 'static> CommandStream for CsvReader<R> {
    type CmdStream = Pin<Box<dyn Stream<Item = Result<HoldingCommand, Error>> + Send>>;

    fn stream(&mut self) -> Self::CmdStream {
        // The iterator must own the reader to be 'static.
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                return Box::pin(stream::iter(Vec::<Result<HoldingCommand, Error>>::new()));
            }
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => HoldingCommand::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::CsvReader;
    use crate::domain::{CommandKind, Error, traits::CommandStream};

    #[tokio::test]
    async fn parses_every_command_type() {
        let input = "type, company, count, price\n\
            acquire, Acme, 10, 2.0\n\
            buy, Acme, 5, 3.0\n\
            sell, Acme, -1, 4.0\n\
            update, Acme, , 5.5\n";
        let mut reader = CsvReader::new(input.as_bytes());
        let cmds: Vec<_> = reader.stream().collect().await;

        assert_eq!(cmds.len(), 4);
        let kinds: Vec<_> = cmds.into_iter().map(|c| c.unwrap().kind).collect();
        assert!(matches!(kinds[0], CommandKind::Acquire { count: 10, .. }));
        assert!(matches!(kinds[1], CommandKind::Buy { count: 5, .. }));
        assert!(matches!(kinds[2], CommandKind::Sell { count: -1, .. }));
        assert!(matches!(kinds[3], CommandKind::Update { .. }));
    }

    #[tokio::test]
    async fn bad_rows_become_ingestion_errors() {
        let input = "type, company, count, price\n\
            short, Acme, 1, 1.0\n\
            buy, Acme, , 1.0\n\
            buy, Acme, lots, 1.0\n\
            update, Acme, 3, 7\n";
        let mut reader = CsvReader::new(input.as_bytes());
        let cmds: Vec<_> = reader.stream().collect().await;

        assert_eq!(cmds.len(), 4);
        assert!(cmds[..3].iter().all(|c| matches!(c, Err(Error::Ingestion(_)))));
        assert!(cmds[3].is_ok());
        assert!(reader.stream().collect::<Vec<_>>().await.is_empty());
    }
}

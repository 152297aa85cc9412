use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandKind {
    Acquire { count: i64, price: Decimal },
    Buy { count: i64, price: Decimal },
    Sell { count: i64, price: Decimal },
    Update { price: Decimal },
}

/// One replayed operation against the holding for `company`.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingCommand {
    pub kind: CommandKind,
    pub company: String,
}

impl core::fmt::Display for HoldingCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            CommandKind::Acquire { count, price }
            | CommandKind::Buy { count, price }
            | CommandKind::Sell { count, price } => write!(
                f,
                "{:?},company={},count={},price={}",
                self.kind, self.company, count, price
            ),
            CommandKind::Update { price } => {
                write!(f, "{:?},company={},price={}", self.kind, self.company, price)
            }
        }
    }
}

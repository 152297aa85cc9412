use std::collections::BTreeMap;

use crate::domain::{Holding, HoldingRepository};

#[derive(Default, Debug)]
pub struct StdOutOutput {
    holdings: BTreeMap<String, Holding>,
}

impl StdOutOutput {
    pub fn new() -> Self {
        Self {
            holdings: BTreeMap::new(),
        }
    }

    /// One `show` line per holding ordered by company, then the top holding.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.holdings.values().map(|h| h.to_string()).collect();
        if let Some(top) = self.top_holding() {
            lines.push(format!("Top: {}", top));
        }
        lines
    }
}

impl HoldingRepository for StdOutOutput {
    fn get_or_create_holding(&mut self, company: &str) -> &mut Holding {
        self.holdings
            .entry(company.to_string())
            .or_insert_with(|| Holding::new(company))
    }

    fn top_holding(&self) -> Option<&Holding> {
        self.holdings
            .values()
            .reduce(|best, next| best.top_value(next))
    }

    fn flush(&mut self) {
        for line in self.report_lines() {
            println!("{}", line);
        }
    }
}

use rust_decimal::Decimal;

use crate::domain::Error;

/// One stock position. `total` is derived from `shares` and `price` and is
/// only ever written by `set_position` after a checked multiply.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    company: String,
    shares: i64,
    price: Decimal,
    total: Decimal,
}

impl Default for Holding {
    fn default() -> Self {
        Self::new("No Name")
    }
}

impl Holding {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            shares: 0,
            price: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    pub fn with_position(
        company: impl Into<String>,
        count: i64,
        price: Decimal,
    ) -> Result<Self, Error> {
        let mut holding = Self::default();
        holding.acquire(company, count, price)?;
        Ok(holding)
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn shares(&self) -> i64 {
        self.shares
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Replaces the whole position. A negative count zeroes the shares but
    /// leaves price and total from the previous state. An overflowing total
    /// leaves the holding untouched.
    pub fn acquire(
        &mut self,
        company: impl Into<String>,
        count: i64,
        price: Decimal,
    ) -> Result<(), Error> {
        if count < 0 {
            self.company = company.into();
            self.shares = 0;
            return Err(Error::NegativeCount { count });
        }

        let total = total_of(count, price)?;
        self.company = company.into();
        self.set_position(count, price, total);
        Ok(())
    }

    pub fn buy(&mut self, price: Decimal, count: i64) -> Result<(), Error> {
        if count < 0 {
            return Err(Error::NegativeCount { count });
        }

        let shares = self
            .shares
            .checked_add(count)
            .ok_or_else(|| Error::Overflow(format!("{} + {} shares", self.shares, count)))?;
        let total = total_of(shares, price)?;
        self.set_position(shares, price, total);
        Ok(())
    }

    pub fn sell(&mut self, price: Decimal, count: i64) -> Result<(), Error> {
        if count < 0 {
            return Err(Error::NegativeCount { count });
        }
        if count > self.shares {
            return Err(Error::InsufficientShares {
                requested: count,
                held: self.shares,
            });
        }

        let shares = self.shares - count;
        let total = total_of(shares, price)?;
        self.set_position(shares, price, total);
        Ok(())
    }

    pub fn update(&mut self, price: Decimal) -> Result<(), Error> {
        let total = total_of(self.shares, price)?;
        self.set_position(self.shares, price, total);
        Ok(())
    }

    /// Whichever of the two is worth more; ties keep `self`.
    pub fn top_value<'a>(&'a self, other: &'a Holding) -> &'a Holding {
        if other.total > self.total { other } else { self }
    }

    fn set_position(&mut self, shares: i64, price: Decimal, total: Decimal) {
        self.shares = shares;
        self.price = price;
        self.total = total;
    }
}

fn total_of(shares: i64, price: Decimal) -> Result<Decimal, Error> {
    Decimal::from(shares)
        .checked_mul(price)
        .ok_or_else(|| Error::Overflow(format!("{} shares at {}", shares, price)))
}

impl core::fmt::Display for Holding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Company: {} Shares: {} Share Price: ${} Total Worth: ${}",
            self.company,
            self.shares,
            self.price.normalize(),
            self.total.normalize()
        )
    }
}

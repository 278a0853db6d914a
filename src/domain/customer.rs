use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Cents, RateBps, format_fixed};

pub type CustomerId = u32;

/// Customer tier. Privileged customers earn a bonus on top of the base rate;
/// this tag is the only place the two variants diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Standard,
    Privileged { bonus_rate: RateBps },
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Privileged { .. } => "privileged",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub balance: Cents,
    pub base_rate: RateBps,
    pub tier: Tier,
}

impl Customer {
    /// Create a standard customer. The opening balance is taken as-is;
    /// only debit and transfer guard against overdraw.
    pub fn standard(
        id: CustomerId,
        first_name: String,
        last_name: String,
        balance: Cents,
        base_rate: RateBps,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            balance,
            base_rate,
            tier: Tier::Standard,
        }
    }

    /// Create a privileged customer with a bonus rate on top of the base rate.
    pub fn privileged(
        id: CustomerId,
        first_name: String,
        last_name: String,
        balance: Cents,
        base_rate: RateBps,
        bonus_rate: RateBps,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            balance,
            base_rate,
            tier: Tier::Privileged { bonus_rate },
        }
    }

    /// The rate actually applied during interest accrual:
    /// base rate, plus the bonus for privileged customers.
    pub fn effective_rate(&self) -> RateBps {
        match self.tier {
            Tier::Standard => self.base_rate,
            Tier::Privileged { bonus_rate } => self.base_rate + bonus_rate,
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self.tier, Tier::Privileged { .. })
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}, balance {}, rate {}%",
            self.id,
            self.first_name,
            self.last_name,
            format_fixed(self.balance),
            format_fixed(self.base_rate),
        )?;
        if let Tier::Privileged { bonus_rate } = self.tier {
            write!(f, " + {}% bonus (privileged)", format_fixed(bonus_rate))?;
        }
        Ok(())
    }
}

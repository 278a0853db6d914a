use std::fmt;

use super::{Cents, Customer, CustomerId, apply_interest, format_fixed};

/// The in-memory customer store. Insertion order is preserved for listing;
/// lookup is a linear scan by id, which is fine at this dataset size.
/// Invariant: at most one customer per id.
#[derive(Debug, Default)]
pub struct Ledger {
    customers: Vec<Customer>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a previously persisted sequence.
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    /// Add a customer, rejecting duplicates by id.
    pub fn add(&mut self, customer: Customer) -> Result<(), LedgerError> {
        if self.find(customer.id).is_some() {
            return Err(LedgerError::DuplicateId(customer.id));
        }
        self.customers.push(customer);
        Ok(())
    }

    /// The sole lookup primitive; every other operation composes on it.
    pub fn find(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    fn position(&self, id: CustomerId) -> Option<usize> {
        self.customers.iter().position(|c| c.id == id)
    }

    /// Increase a balance by a strictly positive amount.
    /// Returns the new balance.
    pub fn credit(&mut self, id: CustomerId, amount: Cents) -> Result<Cents, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        let idx = self.position(id).ok_or(LedgerError::NotFound(id))?;
        self.customers[idx].balance += amount;
        Ok(self.customers[idx].balance)
    }

    /// Decrease a balance; the amount must be positive and covered by the
    /// current balance. Returns the new balance.
    pub fn debit(&mut self, id: CustomerId, amount: Cents) -> Result<Cents, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        let idx = self.position(id).ok_or(LedgerError::NotFound(id))?;
        let balance = self.customers[idx].balance;
        if amount > balance {
            return Err(LedgerError::InsufficientFunds {
                id,
                balance,
                requested: amount,
            });
        }
        self.customers[idx].balance -= amount;
        Ok(self.customers[idx].balance)
    }

    /// Move funds between two distinct accounts. All checks happen before
    /// either balance is touched, so a rejection never leaves a half-applied
    /// transfer.
    pub fn transfer(
        &mut self,
        from: CustomerId,
        to: CustomerId,
        amount: Cents,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SelfTransfer(from));
        }
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        let from_idx = self.position(from).ok_or(LedgerError::NotFound(from))?;
        let to_idx = self.position(to).ok_or(LedgerError::NotFound(to))?;
        let balance = self.customers[from_idx].balance;
        if amount > balance {
            return Err(LedgerError::InsufficientFunds {
                id: from,
                balance,
                requested: amount,
            });
        }
        self.customers[from_idx].balance -= amount;
        self.customers[to_idx].balance += amount;
        Ok(())
    }

    /// Apply one accrual of interest at the customer's effective rate.
    /// Returns the new balance.
    pub fn accrue_interest(&mut self, id: CustomerId) -> Result<Cents, LedgerError> {
        let idx = self.position(id).ok_or(LedgerError::NotFound(id))?;
        let customer = &mut self.customers[idx];
        customer.balance = apply_interest(customer.balance, customer.effective_rate());
        Ok(customer.balance)
    }

    /// Remove and return the matching customer.
    pub fn remove(&mut self, id: CustomerId) -> Result<Customer, LedgerError> {
        let idx = self.position(id).ok_or(LedgerError::NotFound(id))?;
        Ok(self.customers.remove(idx))
    }

    /// The full roster in insertion order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

/// Business-rule rejections. These are reported outcomes, never fatal:
/// the offending operation is a no-op and the session continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    DuplicateId(CustomerId),
    NotFound(CustomerId),
    NonPositiveAmount(Cents),
    InsufficientFunds {
        id: CustomerId,
        balance: Cents,
        requested: Cents,
    },
    SelfTransfer(CustomerId),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::DuplicateId(id) => {
                write!(f, "a customer with id {} already exists", id)
            }
            LedgerError::NotFound(id) => write!(f, "no customer with id {}", id),
            LedgerError::NonPositiveAmount(amount) => {
                write!(f, "amount must be positive, got {}", format_fixed(*amount))
            }
            LedgerError::InsufficientFunds {
                id,
                balance,
                requested,
            } => write!(
                f,
                "insufficient funds on account {}: balance {}, requested {}",
                id,
                format_fixed(*balance),
                format_fixed(*requested)
            ),
            LedgerError::SelfTransfer(id) => {
                write!(f, "cannot transfer from account {} to itself", id)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add(Customer::standard(1, "Ada".into(), "Lovelace".into(), 100_000, 500))
            .unwrap();
        ledger
            .add(Customer::privileged(2, "Grace".into(), "Hopper".into(), 50_000, 500, 200))
            .unwrap();
        ledger
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut ledger = seeded();
        let err = ledger
            .add(Customer::standard(1, "Eve".into(), "Clone".into(), 0, 0))
            .unwrap_err();
        assert_eq!(err, LedgerError::DuplicateId(1));
        // Store unchanged: still the original two, original name intact
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.find(1).unwrap().first_name, "Ada");
    }

    #[test]
    fn test_find_missing_is_none() {
        assert!(seeded().find(99).is_none());
    }

    #[test]
    fn test_credit_increases_balance() {
        let mut ledger = seeded();
        assert_eq!(ledger.credit(1, 25_000), Ok(125_000));
    }

    #[test]
    fn test_credit_rejects_non_positive_amount() {
        let mut ledger = seeded();
        assert_eq!(ledger.credit(1, 0), Err(LedgerError::NonPositiveAmount(0)));
        assert_eq!(ledger.credit(1, -5), Err(LedgerError::NonPositiveAmount(-5)));
        assert_eq!(ledger.find(1).unwrap().balance, 100_000);
    }

    #[test]
    fn test_credit_unknown_id() {
        let mut ledger = seeded();
        assert_eq!(ledger.credit(99, 100), Err(LedgerError::NotFound(99)));
    }

    #[test]
    fn test_debit_decreases_balance() {
        let mut ledger = seeded();
        assert_eq!(ledger.debit(1, 30_000), Ok(70_000));
    }

    #[test]
    fn test_debit_guards_overdraw() {
        let mut ledger = seeded();
        let err = ledger.debit(2, 60_000).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                id: 2,
                balance: 50_000,
                requested: 60_000
            }
        );
        assert_eq!(ledger.find(2).unwrap().balance, 50_000);
    }

    #[test]
    fn test_debit_exact_balance_is_allowed() {
        let mut ledger = seeded();
        assert_eq!(ledger.debit(2, 50_000), Ok(0));
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut ledger = seeded();
        ledger.transfer(1, 2, 40_000).unwrap();
        assert_eq!(ledger.find(1).unwrap().balance, 60_000);
        assert_eq!(ledger.find(2).unwrap().balance, 90_000);
        let total: Cents = ledger.iter().map(|c| c.balance).sum();
        assert_eq!(total, 150_000);
    }

    #[test]
    fn test_transfer_rejects_self() {
        let mut ledger = seeded();
        assert_eq!(
            ledger.transfer(1, 1, 100),
            Err(LedgerError::SelfTransfer(1))
        );
        assert_eq!(ledger.find(1).unwrap().balance, 100_000);
    }

    #[test]
    fn test_transfer_rejects_overdraw_without_touching_either() {
        let mut ledger = seeded();
        assert!(matches!(
            ledger.transfer(2, 1, 60_000),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(ledger.find(1).unwrap().balance, 100_000);
        assert_eq!(ledger.find(2).unwrap().balance, 50_000);
    }

    #[test]
    fn test_transfer_missing_endpoints() {
        let mut ledger = seeded();
        assert_eq!(ledger.transfer(99, 1, 100), Err(LedgerError::NotFound(99)));
        assert_eq!(ledger.transfer(1, 99, 100), Err(LedgerError::NotFound(99)));
    }

    #[test]
    fn test_accrue_interest_standard() {
        let mut ledger = seeded();
        // 1000.00 at 5% -> 1050.00
        assert_eq!(ledger.accrue_interest(1), Ok(105_000));
    }

    #[test]
    fn test_accrue_interest_privileged_adds_bonus() {
        let mut ledger = Ledger::new();
        ledger
            .add(Customer::privileged(2, "Grace".into(), "Hopper".into(), 100_000, 500, 200))
            .unwrap();
        // 1000.00 at 5% + 2% -> 1070.00
        assert_eq!(ledger.accrue_interest(2), Ok(107_000));
    }

    #[test]
    fn test_remove_then_find() {
        let mut ledger = seeded();
        let removed = ledger.remove(1).unwrap();
        assert_eq!(removed.id, 1);
        assert!(ledger.find(1).is_none());
        assert_eq!(ledger.remove(1), Err(LedgerError::NotFound(1)));
    }

    #[test]
    fn test_listing_preserves_insertion_order() {
        let mut ledger = Ledger::new();
        for id in [5, 3, 9, 1] {
            ledger
                .add(Customer::standard(id, "N".into(), "N".into(), 0, 0))
                .unwrap();
        }
        let ids: Vec<_> = ledger.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 3, 9, 1]);
    }
}

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{Cents, Customer, CustomerId, Ledger, RateBps};
use crate::storage;

use super::AppError;

/// Application service providing high-level operations on the customer
/// roster. This is the primary interface for any client (the interactive
/// session, tests, a future API).
///
/// The service owns the ledger and the snapshot path; the whole roster is
/// loaded once at open and written back in full at save.
pub struct BankService {
    ledger: Ledger,
    snapshot_path: PathBuf,
}

impl BankService {
    /// Open a service backed by the given snapshot file. A missing file
    /// yields an empty roster; a corrupt one is a fatal startup error.
    pub fn open(snapshot_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let snapshot_path = snapshot_path.into();
        let customers = storage::load(&snapshot_path).map_err(AppError::LoadFailed)?;
        info!(customers = customers.len(), "roster loaded");
        Ok(Self {
            ledger: Ledger::from_customers(customers),
            snapshot_path,
        })
    }

    /// Write the full roster back to the snapshot file.
    pub fn save(&self) -> Result<(), AppError> {
        storage::save(&self.snapshot_path, self.ledger.customers()).map_err(AppError::SaveFailed)
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    // ========================
    // Roster operations
    // ========================

    /// Create a standard customer. The opening balance is not validated;
    /// see the debit/transfer guards for where non-negativity is enforced.
    pub fn create_standard(
        &mut self,
        id: CustomerId,
        first_name: String,
        last_name: String,
        balance: Cents,
        base_rate: RateBps,
    ) -> Result<Customer, AppError> {
        let customer = Customer::standard(id, first_name, last_name, balance, base_rate);
        self.ledger.add(customer.clone())?;
        Ok(customer)
    }

    /// Create a privileged customer with a bonus rate.
    pub fn create_privileged(
        &mut self,
        id: CustomerId,
        first_name: String,
        last_name: String,
        balance: Cents,
        base_rate: RateBps,
        bonus_rate: RateBps,
    ) -> Result<Customer, AppError> {
        let customer =
            Customer::privileged(id, first_name, last_name, balance, base_rate, bonus_rate);
        self.ledger.add(customer.clone())?;
        Ok(customer)
    }

    pub fn find(&self, id: CustomerId) -> Option<&Customer> {
        self.ledger.find(id)
    }

    /// Credit an account; returns the new balance.
    pub fn credit(&mut self, id: CustomerId, amount: Cents) -> Result<Cents, AppError> {
        Ok(self.ledger.credit(id, amount)?)
    }

    /// Debit an account; returns the new balance.
    pub fn debit(&mut self, id: CustomerId, amount: Cents) -> Result<Cents, AppError> {
        Ok(self.ledger.debit(id, amount)?)
    }

    /// Move funds between two distinct accounts as a single step.
    pub fn transfer(
        &mut self,
        from: CustomerId,
        to: CustomerId,
        amount: Cents,
    ) -> Result<(), AppError> {
        Ok(self.ledger.transfer(from, to, amount)?)
    }

    /// Apply one accrual of interest at the customer's effective rate;
    /// returns the new balance.
    pub fn accrue_interest(&mut self, id: CustomerId) -> Result<Cents, AppError> {
        Ok(self.ledger.accrue_interest(id)?)
    }

    /// Remove a customer, returning the removed record.
    pub fn remove(&mut self, id: CustomerId) -> Result<Customer, AppError> {
        Ok(self.ledger.remove(id)?)
    }

    /// The full roster in insertion order.
    pub fn list(&self) -> &[Customer] {
        self.ledger.customers()
    }
}

// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use denario::application::BankService;
use tempfile::TempDir;

/// Helper to create a test service backed by a snapshot in a temporary
/// directory. The file does not exist yet, so the roster starts empty.
pub fn test_service() -> Result<(BankService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("customers.bin");
    let service = BankService::open(path)?;
    Ok((service, temp_dir))
}

/// Test fixture: a small mixed-tier roster
pub struct SampleRoster;

impl SampleRoster {
    /// Seed two standard customers and one privileged customer.
    pub fn seed(service: &mut BankService) -> Result<()> {
        service.create_standard(1, "Ada".into(), "Lovelace".into(), 100_000, 500)?;
        service.create_privileged(2, "Grace".into(), "Hopper".into(), 50_000, 500, 200)?;
        service.create_standard(3, "Alan".into(), "Turing".into(), 0, 100)?;
        Ok(())
    }
}

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::application::{AppError, BankService};
use crate::domain::{Cents, CustomerId, format_fixed, parse_fixed};

/// Denario - Bank Customer Ledger
#[derive(Parser)]
#[command(name = "denario")]
#[command(about = "A single-user bank customer ledger with an interactive console menu")]
#[command(version)]
pub struct Cli {
    /// Snapshot file path
    #[arg(short, long, default_value = "customers.bin")]
    pub file: String,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_logging(if self.verbose { "debug" } else { "warn" });

        let service = BankService::open(&self.file)
            .context("cannot start a session; fix or remove the snapshot file")?;
        info!(file = %self.file, "session started");

        let stdin = io::stdin();
        let mut session = Session::new(service, stdin.lock());
        session.run()
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// The interactive menu loop: prints the command menu, reads one selector
/// per iteration, collects the command's fields from subsequent lines and
/// dispatches to the service.
///
/// Input is generic over `BufRead` so tests can drive a scripted session.
pub struct Session<R: BufRead> {
    service: BankService,
    input: R,
}

impl<R: BufRead> Session<R> {
    pub fn new(service: BankService, input: R) -> Self {
        Self { service, input }
    }

    /// Run until the operator selects "save and exit" or input ends.
    /// Business-rule rejections and malformed field input are reported and
    /// the loop continues; only I/O failures on the console itself abort.
    pub fn run(&mut self) -> Result<()> {
        loop {
            print_menu();
            let Some(selection) = self.prompt("Select an option")? else {
                // End of input behaves like selector 0: persist and stop.
                self.save_and_report();
                break;
            };
            match selection.as_str() {
                "1" => self.add_customer(false)?,
                "2" => self.add_customer(true)?,
                "3" => self.credit()?,
                "4" => self.debit()?,
                "5" => self.transfer()?,
                "6" => self.accrue_interest()?,
                "7" => self.list(),
                "8" => self.find()?,
                "9" => self.remove()?,
                "0" => {
                    self.save_and_report();
                    break;
                }
                other => println!("Unknown option '{}'", other),
            }
        }
        info!("session ended");
        Ok(())
    }

    fn add_customer(&mut self, privileged: bool) -> Result<()> {
        let Some(id) = self.prompt_id("Id")? else {
            return Ok(());
        };
        let Some(first_name) = self.prompt("First name")? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt("Last name")? else {
            return Ok(());
        };
        let Some(balance) = self.prompt_fixed("Opening balance")? else {
            return Ok(());
        };
        let Some(base_rate) = self.prompt_fixed("Interest rate (%)")? else {
            return Ok(());
        };

        let created = if privileged {
            let Some(bonus_rate) = self.prompt_fixed("Bonus rate (%)")? else {
                return Ok(());
            };
            self.service
                .create_privileged(id, first_name, last_name, balance, base_rate, bonus_rate)
        } else {
            self.service
                .create_standard(id, first_name, last_name, balance, base_rate)
        };

        match created {
            Ok(customer) => println!("Added {}", customer),
            Err(err) => println!("Rejected: {}", err),
        }
        Ok(())
    }

    fn credit(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Account id")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_fixed("Amount")? else {
            return Ok(());
        };
        report_balance(self.service.credit(id, amount));
        Ok(())
    }

    fn debit(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Account id")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_fixed("Amount")? else {
            return Ok(());
        };
        report_balance(self.service.debit(id, amount));
        Ok(())
    }

    fn transfer(&mut self) -> Result<()> {
        let Some(from) = self.prompt_id("Source account id")? else {
            return Ok(());
        };
        let Some(to) = self.prompt_id("Destination account id")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_fixed("Amount")? else {
            return Ok(());
        };
        match self.service.transfer(from, to, amount) {
            Ok(()) => println!("Transferred {} from {} to {}", format_fixed(amount), from, to),
            Err(err) => println!("Rejected: {}", err),
        }
        Ok(())
    }

    fn accrue_interest(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Account id")? else {
            return Ok(());
        };
        report_balance(self.service.accrue_interest(id));
        Ok(())
    }

    fn list(&self) {
        if self.service.list().is_empty() {
            println!("No customers yet.");
            return;
        }
        for customer in self.service.list() {
            println!("{}", customer);
        }
    }

    fn find(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Customer id")? else {
            return Ok(());
        };
        match self.service.find(id) {
            Some(customer) => println!("Found {}", customer),
            None => println!("No customer with id {}", id),
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Customer id")? else {
            return Ok(());
        };
        match self.service.remove(id) {
            Ok(customer) => println!("Removed {}", customer),
            Err(err) => println!("Rejected: {}", err),
        }
        Ok(())
    }

    /// A save failure must not crash the terminating session; the operator
    /// is warned that their data may not have been persisted.
    fn save_and_report(&self) {
        match self.service.save() {
            Ok(()) => println!(
                "Saved {} customer(s) to {}",
                self.service.list().len(),
                self.service.snapshot_path().display()
            ),
            Err(err) => eprintln!("Warning: {:#}. Changes may not have been persisted.", err),
        }
    }

    /// Print a prompt and read one trimmed line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}: ", label);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a customer id. Malformed input is reported and aborts the
    /// in-progress command (`None`), never the session.
    fn prompt_id(&mut self, label: &str) -> Result<Option<CustomerId>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match raw.parse::<CustomerId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                println!("Not a valid id: '{}'", raw);
                Ok(None)
            }
        }
    }

    /// Read a decimal amount or rate, as fixed-point hundredths.
    fn prompt_fixed(&mut self, label: &str) -> Result<Option<i64>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match parse_fixed(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                println!("Not a valid decimal: '{}'", raw);
                Ok(None)
            }
        }
    }
}

fn report_balance(outcome: Result<Cents, AppError>) {
    match outcome {
        Ok(balance) => println!("New balance: {}", format_fixed(balance)),
        Err(err) => println!("Rejected: {}", err),
    }
}

fn print_menu() {
    println!();
    println!("--- denario ---");
    println!("1. Add standard customer");
    println!("2. Add privileged customer");
    println!("3. Credit an account");
    println!("4. Debit an account");
    println!("5. Transfer between accounts");
    println!("6. Accrue interest for an account");
    println!("7. List all customers");
    println!("8. Find customer by id");
    println!("9. Remove customer by id");
    println!("0. Save and exit");
}

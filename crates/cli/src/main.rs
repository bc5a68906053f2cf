//! Madina CLI - ledger operations from the command line
//!
//! Usage:
//! ```bash
//! madina account create --type saving --name "Ali Khan" --dob 1990-01-01 \
//!     --cnic 35202-1234567-1 --address Lahore --balance 500
//! madina deposit MDBSCE24001 25000
//! madina zakat MDBSCE24001
//! madina transfer MDBSCE24001 MDBSCE24002 100
//! madina loan apply MDBSCE24001 --loan-type Car --amount 800000
//! madina transactions --account MDBSCE24001
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use madina_core::AccountKind;
use madina_ledger::{Ledger, LedgerConfig};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod ids;

use commands::{account, banking, staff, status, users};

const DEFAULT_CONFIG_FILE: &str = "madina.toml";

/// Madina - bank ledger manager over JSON documents
#[derive(Parser)]
#[command(name = "madina")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults apply when `madina.toml` is absent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overrides `store.data_dir`
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level, overrides `log_level` (RUST_LOG still wins)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Deposit cash into an account
    Deposit {
        account: String,
        amount: Decimal,
    },

    /// Withdraw cash from an account
    Withdraw {
        account: String,
        amount: Decimal,
    },

    /// Transfer between two accounts
    Transfer {
        from: String,
        to: String,
        amount: Decimal,
    },

    /// Deduct Zakat from a saving account
    Zakat { account: String },

    /// Services offered for an account
    Services { account: String },

    /// Bank staff and payroll
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Login identities
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Loan applications
    Loan {
        #[command(subcommand)]
        action: LoanAction,
    },

    /// Transaction history
    Transactions {
        /// Only transactions touching this account
        #[arg(long)]
        account: Option<String>,
    },

    /// Collection counts and data location
    Status,
}

/// Holder details shared by account creation and updates
#[derive(clap::Args)]
pub struct HolderArgs {
    #[arg(long, short)]
    pub name: String,
    /// Date of birth
    #[arg(long)]
    pub dob: String,
    /// National identity number
    #[arg(long)]
    pub cnic: String,
    #[arg(long)]
    pub address: String,
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Open a new account
    Create {
        #[arg(long = "type", short = 't')]
        kind: AccountTypeArg,
        #[command(flatten)]
        holder: HolderArgs,
        /// Initial balance
        #[arg(long, default_value = "0")]
        balance: Decimal,
        /// Explicit account number (generated when omitted)
        #[arg(long)]
        number: Option<String>,
    },
    /// List all accounts
    List,
    /// Show account details
    Show { account: String },
    /// Remove an account
    Remove { account: String },
    /// Replace holder details
    UpdateInfo {
        account: String,
        #[command(flatten)]
        holder: HolderArgs,
    },
    /// Enable or disable withdrawals on a saving account
    Withdrawals {
        account: String,
        #[arg(value_enum)]
        state: ToggleArg,
    },
    /// Count one more year held on a saving account
    Year { account: String },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add an employee
    Add {
        #[arg(long)]
        id: String,
        #[arg(long, short)]
        name: String,
        #[arg(long)]
        designation: String,
        #[arg(long)]
        salary: Decimal,
        /// Account receiving the salary
        #[arg(long)]
        account: String,
    },
    /// List employees
    List,
    /// Show one employee
    Show { id: String },
    /// Pay one salary into the employee's account
    Pay { id: String },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register an admin login
    RegisterAdmin {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Open a saving account and a customer login for it
    RegisterCustomer {
        username: String,
        #[arg(long)]
        password: String,
        #[command(flatten)]
        holder: HolderArgs,
    },
    /// Check credentials
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// List users
    List,
}

#[derive(Subcommand)]
pub enum LoanAction {
    /// Apply for a loan against an account
    Apply {
        account: String,
        #[arg(long)]
        loan_type: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// List loan applications
    List,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AccountTypeArg {
    Saving,
    Business,
}

impl AccountTypeArg {
    pub fn to_core_kind(self) -> AccountKind {
        match self {
            AccountTypeArg::Saving => AccountKind::Saving,
            AccountTypeArg::Business => AccountKind::Business,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToggleArg {
    On,
    Off,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn load_config(cli: &Cli) -> Result<LedgerConfig> {
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::load_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LedgerConfig::load_or_default(DEFAULT_CONFIG_FILE)
            .context("Failed to load madina.toml")?,
    };

    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.log_level);

    let mut ledger = Ledger::open(&config).context("Failed to open ledger")?;
    if ledger.ensure_default_admin()? {
        tracing::info!(
            user = %config.bank.default_admin_username,
            "default admin created"
        );
    }

    match cli.command {
        Commands::Account { action } => account::handle(&mut ledger, action)?,

        Commands::Deposit { account, amount } => banking::deposit(&mut ledger, &account, amount)?,

        Commands::Withdraw { account, amount } => {
            banking::withdraw(&mut ledger, &account, amount)?
        }

        Commands::Transfer { from, to, amount } => {
            banking::transfer(&mut ledger, &from, &to, amount)?
        }

        Commands::Zakat { account } => account::zakat(&mut ledger, &account)?,

        Commands::Services { account } => account::services(&ledger, &account)?,

        Commands::Employee { action } => staff::handle(&mut ledger, action)?,

        Commands::User { action } => users::handle(&mut ledger, action)?,

        Commands::Loan { action } => banking::loans(&mut ledger, action)?,

        Commands::Transactions { account } => {
            banking::transactions(&ledger, account.as_deref())?
        }

        Commands::Status => status::show(&ledger, &config),
    }

    ledger.flush().context("Failed to save ledger state")?;
    Ok(())
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lal",
    about = "Loan Application Ledger: run chaincode transactions against a local ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one chaincode transaction
    Invoke(InvokeArgs),
    /// List the loan applications filed with a bank
    QueryBank(QueryBankArgs),
    /// Seed the ledger with two integer holdings
    Init(InitArgs),
    /// Serve the chaincode over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct StateArgs {
    /// Ledger snapshot, loaded before the command and saved after it
    #[arg(long, default_value = "lal-state.json")]
    pub state: PathBuf,
    /// Reject unknown operation names
    #[arg(long)]
    pub strict: bool,
    /// Transaction id; generated when omitted
    #[arg(long)]
    pub tx_id: Option<String>,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub function: String,
    pub args: Vec<String>,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(Args)]
pub struct QueryBankArgs {
    pub bank: String,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(Args)]
pub struct InitArgs {
    pub a: String,
    pub a_val: String,
    pub b: String,
    pub b_val: String,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "lal.toml")]
    pub config: PathBuf,
    /// Overrides `[server] bind_addr`
    #[arg(long)]
    pub bind: Option<String>,
    /// Overrides `[ledger] snapshot`
    #[arg(long)]
    pub state: Option<PathBuf>,
    /// Overrides `[chaincode] strict_dispatch`
    #[arg(long)]
    pub strict: bool,
}

use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use lal_chaincode::{names, DispatchMode, LoanChaincode, TxContext};
use lal_ledger::InMemoryLedger;
use lal_server::{init_tracing, LalServer, LoggingConfig, ServerConfig};
use lal_types::Response;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Invoke(args) => {
            init_logging(cli.verbose);
            let response = transact(&args.state, |chaincode, ledger, ctx| {
                chaincode.invoke(ledger, ctx, &args.function, &args.args)
            })?;
            report(format, &response)
        }
        Command::QueryBank(args) => {
            init_logging(cli.verbose);
            let bank = vec![args.bank];
            let response = transact(&args.state, |chaincode, ledger, ctx| {
                chaincode.invoke(ledger, ctx, names::QUERY_LOAN_BY_BANK, &bank)
            })?;
            report_matches(format, &response)
        }
        Command::Init(args) => {
            init_logging(cli.verbose);
            let seed = vec![args.a, args.a_val, args.b, args.b_val];
            let response = transact(&args.state, |chaincode, ledger, ctx| {
                chaincode.init(ledger, ctx, &seed)
            })?;
            report(format, &response)
        }
        Command::Serve(args) => cmd_serve(args, cli.verbose),
    }
}

fn init_logging(verbose: bool) {
    init_tracing(&LoggingConfig {
        level: if verbose { "debug" } else { "warn" }.to_string(),
        json: false,
    });
}

/// Load the snapshot, run one transaction, and save the snapshot back.
fn transact<F>(state: &StateArgs, run: F) -> anyhow::Result<Response>
where
    F: FnOnce(&LoanChaincode, &InMemoryLedger, &TxContext) -> Response,
{
    let ledger = InMemoryLedger::open_snapshot(&state.state)
        .with_context(|| format!("failed to load ledger state from {}", state.state.display()))?;
    let mode = if state.strict { DispatchMode::Strict } else { DispatchMode::Legacy };
    let chaincode = LoanChaincode::new(mode);
    let ctx = match &state.tx_id {
        Some(id) => TxContext::new(id.clone()),
        None => TxContext::generate(),
    };

    let response = run(&chaincode, &ledger, &ctx);
    save(&ledger, &state.state)?;
    tracing::debug!(tx_id = ctx.tx_id(), status = response.status, "transaction complete");
    Ok(response)
}

fn save(ledger: &InMemoryLedger, path: &Path) -> anyhow::Result<()> {
    ledger
        .save_snapshot(path)
        .with_context(|| format!("failed to save ledger state to {}", path.display()))
}

fn report(format: OutputFormat, response: &Response) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Text if response.is_success() => {
            println!("{} {}", "✓".green().bold(), response.payload_str());
        }
        OutputFormat::Text => {}
    }
    ensure_success(response)
}

fn report_matches(format: OutputFormat, response: &Response) -> anyhow::Result<()> {
    if format == OutputFormat::Json || !response.is_success() {
        return report(format, response);
    }
    let matches: Vec<serde_json::Value> = serde_json::from_slice(&response.payload)?;
    if matches.is_empty() {
        println!("No loan applications found.");
    }
    for entry in &matches {
        let key = entry["Key"].as_str().unwrap_or_default();
        let record = &entry["Record"];
        println!(
            "{}  {}  {}",
            key.yellow().bold(),
            record["Name"].as_str().unwrap_or_default(),
            record["Status"].as_str().unwrap_or_default().cyan()
        );
    }
    Ok(())
}

fn ensure_success(response: &Response) -> anyhow::Result<()> {
    if !response.is_success() {
        bail!("{} {}", "✗".red().bold(), response.message);
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let config = serve_config(&args)?;
    let mut logging = config.logging.clone();
    if verbose {
        logging.level = "debug".to_string();
    }
    init_tracing(&logging);

    println!(
        "LAL server on {} (dispatch: {})",
        config.server.bind_addr.to_string().bold(),
        config.dispatch_mode()
    );
    let server = LalServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// Config file values, overridden by whatever was passed on the command line.
fn serve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = ServerConfig::load(&args.config)
        .with_context(|| format!("failed to read {}", args.config.display()))?;
    if let Some(bind) = &args.bind {
        config.server.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if let Some(state) = &args.state {
        config.ledger.snapshot = Some(state.clone());
    }
    if args.strict {
        config.chaincode.strict_dispatch = true;
    }
    Ok(config)
}

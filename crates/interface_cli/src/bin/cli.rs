//! Invoice CLI binary
//!
//! # Usage
//!
//! ```bash
//! invoice-cli totals invoice.json
//! invoice-cli words 1234567.50 --title --suffix "Rupees Only"
//! invoice-cli next-number --last INV-20250314-0007
//! INVOICE_SPLIT_RATIO=1 invoice-cli preview invoice.json
//! ```
//!
//! # Environment Variables
//!
//! * `INVOICE_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `INVOICE_CURRENCY` - Currency of documents that name none, and of `words` amounts (default: INR)
//! * `INVOICE_DEFAULT_TAX_RATE` - Tax rate in percent for documents without `tax_rate_percent` (default: 18)
//! * `INVOICE_SPLIT_RATIO` - First tax component's share (default: 0.5)
//! * `INVOICE_WORDS_CASING` - `upper` or `title` (default: upper)
//! * `INVOICE_WORDS_CONJUNCTION` - Insert "AND" after hundreds (default: true)
//! * `INVOICE_WORDS_SUFFIX` - Closing words (default: ONLY)
//! * `INVOICE_MAX_ITEMS` - Item limit (default: 10)
//! * `INVOICE_ALLOW_NEGATIVE_LINES` - Accept credit lines (default: false)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::Money;
use domain_invoice::{
    AmountToWordsFormatter, Casing, InvoiceNumberGenerator, InvoiceTotals, InvoiceValidator,
    UpiPaymentLink,
};
use interface_cli::{document, render, CliConfig};

#[derive(Parser)]
#[command(name = "invoice-cli", about = "Invoice totals, previews and amount-in-words", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text, help = "Log output format")]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print subtotal, tax components and grand total
    Totals(FileArgs),
    /// Spell out an amount
    Words(WordsArgs),
    /// Print a plain-text document preview
    Preview(FileArgs),
    /// Check a document; exits non-zero on errors
    Validate(FileArgs),
    /// Print the next invoice number
    NextNumber(NextNumberArgs),
    /// Print the UPI payment link for a document
    PaymentLink(FileArgs),
    /// Rewrite a document with freshly computed totals
    Recompute(RecomputeArgs),
}

#[derive(Args)]
struct FileArgs {
    #[arg(help = "Path to the invoice JSON document")]
    file: PathBuf,
}

#[derive(Args)]
struct WordsArgs {
    #[arg(help = "Non-negative amount, e.g. 1416 or 12.50")]
    amount: Decimal,
    #[arg(long, action = ArgAction::SetTrue, help = "Title case instead of upper case")]
    title: bool,
    #[arg(long, action = ArgAction::SetTrue, help = "Omit \"AND\" after hundreds")]
    no_conjunction: bool,
    #[arg(long, help = "Closing words; defaults to the configured suffix")]
    suffix: Option<String>,
}

#[derive(Args)]
struct NextNumberArgs {
    #[arg(long, help = "Most recently issued invoice number")]
    last: Option<String>,
    #[arg(long, help = "Issue date (YYYY-MM-DD); defaults to today")]
    date: Option<NaiveDate>,
    #[arg(long, default_value = "INV", help = "Number prefix")]
    prefix: String,
}

#[derive(Args)]
struct RecomputeArgs {
    #[arg(help = "Path to the invoice JSON document")]
    file: PathBuf,
    #[arg(long, help = "Write to this path instead of overwriting the input")]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct TotalsOutput {
    invoice_number: String,
    currency: String,
    rounded: InvoiceTotals,
    exact: InvoiceTotals,
    payable: Money,
}

#[derive(Serialize)]
struct ValidationOutput<'a> {
    is_valid: bool,
    errors: &'a [String],
    warnings: &'a [String],
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level, cli.log_format);

    match run(cli, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<ExitCode> {
    config.validate().context("invalid configuration")?;
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Totals(args) => handle_totals(config, args, cli.json)?,
        Commands::Words(args) => handle_words(config, args, cli.json)?,
        Commands::Preview(args) => handle_preview(config, args, cli.json)?,
        Commands::Validate(args) => return handle_validate(config, args, cli.json),
        Commands::NextNumber(args) => handle_next_number(args, cli.json)?,
        Commands::PaymentLink(args) => handle_payment_link(config, args, cli.json)?,
        Commands::Recompute(args) => handle_recompute(config, args)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_totals(config: &CliConfig, args: FileArgs, json: bool) -> Result<()> {
    let invoice = document::load_invoice(&args.file, config)?;

    if json {
        let totals = invoice.totals();
        print_json(&TotalsOutput {
            invoice_number: invoice.invoice_number.clone(),
            currency: invoice.currency.code().to_string(),
            rounded: totals.rounded(invoice.currency),
            exact: *totals,
            payable: Money::new(invoice.payable_amount(), invoice.currency),
        })?;
    } else {
        print!("{}", render::render_totals(&invoice));
    }
    Ok(())
}

fn handle_words(config: &CliConfig, args: WordsArgs, json: bool) -> Result<()> {
    let mut style = config.words_style();
    if args.title {
        style = style.with_casing(Casing::Title);
    }
    if args.no_conjunction {
        style = style.with_conjunction(false);
    }
    if let Some(suffix) = args.suffix {
        style = style.with_suffix(suffix);
    }

    let amount = Money::new(args.amount, config.currency()?).round_to_currency();
    let words = AmountToWordsFormatter::new(style).to_words(amount.amount())?;
    if json {
        print_json(&serde_json::json!({
            "amount": amount.amount(),
            "currency": amount.currency().code(),
            "formatted": amount.to_grouped_string(),
            "words": words,
        }))?;
    } else {
        println!("{words}");
    }
    Ok(())
}

fn handle_preview(config: &CliConfig, args: FileArgs, json: bool) -> Result<()> {
    let invoice = document::load_invoice(&args.file, config)?;
    let formatter = AmountToWordsFormatter::new(config.words_style());

    if json {
        print_json(&serde_json::json!({
            "invoice": &invoice,
            "lines": invoice.line_breakdown(),
            "amount_in_words": invoice.amount_in_words(&formatter).ok(),
        }))?;
    } else {
        print!("{}", render::render_preview(&invoice, &formatter));
    }
    Ok(())
}

fn handle_validate(config: &CliConfig, args: FileArgs, json: bool) -> Result<ExitCode> {
    let invoice = document::load_invoice(&args.file, config)?;
    let result = InvoiceValidator::validate(&invoice, &config.validation_policy());

    if json {
        print_json(&ValidationOutput {
            is_valid: result.is_valid,
            errors: &result.errors,
            warnings: &result.warnings,
        })?;
    } else {
        for error in &result.errors {
            println!("error: {error}");
        }
        for warning in &result.warnings {
            println!("warning: {warning}");
        }
        if result.is_valid {
            println!("{} is valid", invoice.invoice_number);
        }
    }

    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_next_number(args: NextNumberArgs, json: bool) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let number = InvoiceNumberGenerator::new(args.prefix).next(args.last.as_deref(), date);

    if json {
        print_json(&serde_json::json!({ "invoice_number": number }))?;
    } else {
        println!("{number}");
    }
    Ok(())
}

fn handle_payment_link(config: &CliConfig, args: FileArgs, json: bool) -> Result<()> {
    let invoice = document::load_invoice(&args.file, config)?;
    let link = UpiPaymentLink::for_invoice(&invoice)?;

    if json {
        print_json(&serde_json::json!({ "invoice_number": invoice.invoice_number, "link": link }))?;
    } else {
        println!("{link}");
    }
    Ok(())
}

fn handle_recompute(config: &CliConfig, args: RecomputeArgs) -> Result<()> {
    let invoice = document::load_invoice(&args.file, config)?;
    let target = args.out.unwrap_or(args.file);
    document::save_invoice(&target, &invoice)?;

    info!(path = %target.display(), "Recomputed invoice totals");
    println!("{}", render::render_totals(&invoice).trim_end());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

//! CLI tool for card validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate all card details at once
//! cardcheck check "Robin Demeulenaere" "4242 4242 4242 4242" 11/2027 123
//!
//! # Classify a card number
//! cardcheck network 378282246310005
//!
//! # Check a CVV against its card
//! cardcheck cvv 378282246310005 1234
//!
//! # Validate an expiry date
//! cardcheck expiry 11/2027
//!
//! # Format a card number
//! cardcheck format 378282246310005
//! ```
//!
//! Exit status is 0 when the input is accepted and 1 when it is rejected.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use cardcheck::{
    classify_network, cvv, expiry, format, luhn, mask, name, Clock, Config, NamePolicy,
    Validator,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Payment card input validation tool")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate name, card number, expiry date and CVC together
    Check {
        /// Cardholder name
        card_owner: String,

        /// Card number (spaces allowed)
        card_number: String,

        /// Expiry date (MM/YYYY)
        issue_date: String,

        /// Card verification code
        cvc: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Classify a card number into its network
    Network {
        /// Card number (any separators allowed)
        card_number: String,
    },

    /// Check if a card passes the Luhn algorithm
    Luhn {
        /// Card number to check (spaces allowed)
        card_number: String,
    },

    /// Validate a CVV/CVC against its card number
    Cvv {
        /// Card number the CVV belongs to
        card_number: String,

        /// CVV to validate
        cvv: String,
    },

    /// Validate an expiry date
    Expiry {
        /// Expiry date (MM/YYYY)
        date: String,

        /// Years into the future to accept (overrides config)
        #[arg(short, long)]
        window_years: Option<u32>,
    },

    /// Validate a cardholder name
    Name {
        /// Name as printed on the card
        name: String,

        /// Token policy (overrides config)
        #[arg(short, long)]
        policy: Option<PolicyArg>,
    },

    /// Format a card number
    Format {
        /// Card number to format
        card_number: String,

        /// Separator to use
        #[arg(short, long, default_value = " ")]
        separator: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    EveryToken,
    LastToken,
}

impl From<PolicyArg> for NamePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::EveryToken => NamePolicy::EveryToken,
            PolicyArg::LastToken => NamePolicy::LastToken,
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    let accepted = match cli.command {
        Commands::Check {
            card_owner,
            card_number,
            issue_date,
            cvc,
            output,
        } => cmd_check(&config, &card_owner, &card_number, &issue_date, &cvc, output)?,
        Commands::Network { card_number } => cmd_network(&card_number),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Cvv {
            card_number,
            cvv: cvv_input,
        } => cmd_cvv(&card_number, &cvv_input),
        Commands::Expiry { date, window_years } => cmd_expiry(
            &date,
            window_years.unwrap_or(config.validator.expiry_window_years),
        ),
        Commands::Name { name, policy } => cmd_name(
            &name,
            policy.map_or(config.validator.name_policy, NamePolicy::from),
        ),
        Commands::Format {
            card_number,
            separator,
        } => cmd_format(&card_number, &separator),
    };

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_check(
    config: &Config,
    card_owner: &str,
    card_number: &str,
    issue_date: &str,
    cvc: &str,
    output: OutputFormat,
) -> Result<bool, Box<dyn Error>> {
    let validator = Validator::with_config(config.validator);
    let result = validator.validate_fields(card_owner, card_number, issue_date, cvc);
    let masked = mask::mask_number(card_number);

    match output {
        OutputFormat::Text => match &result {
            Ok(network) => {
                println!("Valid: yes");
                println!("Network: {}", network.display_name());
                println!("Masked: {}", masked);
            }
            Err(e) => {
                println!("Valid: no");
                println!("Field: {}", e.field());
                println!("Error: {}", e);
            }
        },
        OutputFormat::Json => {
            let body = match &result {
                Ok(network) => json!({
                    "valid": true,
                    "network": network,
                    "masked": masked,
                }),
                Err(e) => json!({
                    "valid": false,
                    "field": e.field().name(),
                    "error": e.to_string(),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(result.is_ok())
}

fn cmd_network(card_number: &str) -> bool {
    let network = classify_network(card_number);
    println!("Network: {}", network.display_name());
    if network.is_known() {
        println!("CVV Length: {} digits", network.cvv_length());
    }
    network.is_known()
}

fn cmd_luhn(card_number: &str) -> bool {
    let passed = luhn::validate_checksum(card_number);
    println!("Luhn check: {}", if passed { "PASS" } else { "FAIL" });
    passed
}

fn cmd_cvv(card_number: &str, cvv_input: &str) -> bool {
    match cvv::check_cvv(card_number, cvv_input) {
        Ok(length) => {
            println!("Valid: yes");
            println!("Length: {} digits", length);
            true
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            false
        }
    }
}

fn cmd_expiry(date: &str, window_years: u32) -> bool {
    let clock = expiry::SystemClock;
    match expiry::check_expiry(date, &clock, window_years) {
        Ok(exp) => {
            println!("Valid: yes");
            println!("Month: {:02}", exp.month());
            println!("Year: {}", exp.year());
            println!(
                "Months Until Expiry: {}",
                exp.months_until_expiry(clock.now())
            );
            true
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            false
        }
    }
}

fn cmd_name(input: &str, policy: NamePolicy) -> bool {
    match name::check_cardholder_name(input, policy) {
        Ok(()) => {
            println!("Valid: yes");
            true
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            false
        }
    }
}

fn cmd_format(card_number: &str, separator: &str) -> bool {
    println!("{}", format::format_with_separator(card_number, separator));
    true
}

//! tgauth CLI - Command-line interface for login widget assertion verification.

use clap::{Args, Parser, Subcommand};

mod commands;
mod input;
mod output;

use commands::{check_string, login, sign, verify};

#[derive(Parser)]
#[command(name = "tgauth")]
#[command(about = "Login widget assertion verification CLI")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Where the assertion fields come from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = true)]
pub struct FieldSource {
    /// Query string (or full URL) carrying the fields
    #[arg(long)]
    pub query: Option<String>,
    /// Urlencoded form body file ("-" for stdin)
    #[arg(long)]
    pub form: Option<String>,
}

/// Secret and freshness settings.
#[derive(Args, Debug, Clone)]
pub struct SecretArgs {
    /// Bot token the widget signs with
    #[arg(long, env = "TGAUTH_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,
    /// Maximum age of auth_date in seconds
    #[arg(long, default_value_t = tgauth_core::DEFAULT_FRESHNESS_WINDOW_SECONDS, allow_negative_numbers = true)]
    pub window: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the canonical check-string for a field set
    CheckString {
        #[command(flatten)]
        source: FieldSource,
    },
    /// Compute the hash a widget would attach to a field set
    Sign {
        #[command(flatten)]
        source: FieldSource,
        /// Bot token the widget signs with
        #[arg(long, env = "TGAUTH_BOT_TOKEN", hide_env_values = true)]
        bot_token: String,
        /// Print the field set with `hash` set instead of the bare hash
        #[arg(long)]
        append: bool,
    },
    /// Verify an assertion
    Verify {
        #[command(flatten)]
        source: FieldSource,
        #[command(flatten)]
        secret: SecretArgs,
        /// Verification time in seconds since the epoch (default: now)
        #[arg(long)]
        now: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the full login flow against a JSON account file
    Login {
        /// Request URI, including any assertion in its query
        #[arg(long)]
        uri: String,
        /// Urlencoded form body file ("-" for stdin)
        #[arg(long)]
        form: Option<String>,
        /// Account file (created on first registration)
        #[arg(long)]
        accounts: String,
        /// Bot username shown by the widget
        #[arg(long, env = "TGAUTH_BOT_USERNAME")]
        bot_username: String,
        #[command(flatten)]
        secret: SecretArgs,
        /// Provision accounts for unknown identities
        #[arg(long)]
        allow_registration: bool,
        /// Verification time in seconds since the epoch (default: now)
        #[arg(long)]
        now: Option<i64>,
    },
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::CheckString { source } => check_string::run(source),
        Commands::Sign {
            source,
            bot_token,
            append,
        } => sign::run(source, bot_token, append),
        Commands::Verify {
            source,
            secret,
            now,
            json,
        } => verify::run(source, secret, now, json),
        Commands::Login {
            uri,
            form,
            accounts,
            bot_username,
            secret,
            allow_registration,
            now,
        } => login::run(login::LoginArgs {
            uri,
            form,
            accounts,
            bot_username,
            secret,
            allow_registration,
            now,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

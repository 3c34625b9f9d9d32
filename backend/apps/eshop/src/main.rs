//! E-Shop Console Entry Point
//!
//! Login, registration fallback, and the gated account menu.
//! Uses `anyhow` for startup errors; domain errors are `auth::AuthError`.

mod console;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use auth::application::{
    AccountService, Authenticator, BruteForceOutcome, BruteForceSimulator, LoginOutcome, Wordlist,
};
use auth::models::{AccountNumber, SecurityMode, Session};
use auth::{AuthConfig, AuthError, AuthResult, JsonAccountRepository};
use clap::Parser;
use platform::secrets::Keyring;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::console::{ConsolePasswords, ConsoleRegistration, prompt};

type Shop = Authenticator<JsonAccountRepository>;

#[derive(Debug, Parser)]
#[command(name = "eshop", version, about = "E-shop account console")]
struct Args {
    /// Run the deliberately vulnerable variant (plaintext passwords, 1000 attempts)
    #[arg(long, env = "ESHOP_INSECURE")]
    insecure: bool,

    /// Directory holding accounts.json and known_weak_passwords.txt
    #[arg(long, env = "ESHOP_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// JSON key file supplying jwt_secret_key and data_encryption_key
    #[arg(long, env = "ESHOP_KEYS_FILE", default_value = "no_secrets_here/keys.json")]
    keys_file: PathBuf,

    /// Create an empty accounts file if none exists
    #[arg(long)]
    init: bool,

    /// Email to log in with (prompted otherwise)
    #[arg(long)]
    email: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eshop=info,auth=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    match run(args).await {
        Err(e) => match e.downcast_ref::<AuthError>() {
            Some(auth_error) => {
                auth_error.log();
                eprintln!("{}", auth_error.to_app_error());
                std::process::exit(auth_error.kind().exit_code());
            }
            None => Err(e),
        },
        ok => ok,
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mode = SecurityMode::from_secure_flag(!args.insecure);
    let config = Arc::new(AuthConfig::with_data_dir(&args.data_dir).with_mode(mode));

    tracing::info!(mode = %mode, data_dir = %args.data_dir.display(), "Starting e-shop");
    if !mode.is_secure() {
        tracing::warn!("Insecure mode: passwords stored in plaintext, brute force enabled");
    }

    let keys = load_keys(&args.keys_file, &config).await?;

    let repo = Arc::new(JsonAccountRepository::new(&config.accounts_path));
    if args.init && repo.initialize().await? {
        println!("Created {}", repo.path().display());
    }

    let shop = Arc::new(Authenticator::from_provider(repo.clone(), config.clone(), &keys)?);
    let accounts = AccountService::from_provider(repo, &config, &keys)?;

    let Some(session) = sign_in(&shop, &config, args.email).await? else {
        println!("Goodbye.");
        return Ok(());
    };

    println!("Logged in as {} ({})", session.email(), session.role());
    println!("Save this token for future logins: {}", session.token());

    account_menu(&shop, &accounts, &session).await?;
    tracing::info!(email = %session.email(), "Logged out");
    Ok(())
}

/// Key file, or throwaway keys in debug builds when the file is unavailable
async fn load_keys(path: &Path, config: &AuthConfig) -> anyhow::Result<Keyring> {
    match Keyring::load(path).await {
        Ok(keys) => Ok(keys),
        Err(e) if cfg!(debug_assertions) => {
            tracing::warn!(
                error = %e,
                "Using random development keys; sealed profiles will not survive a restart"
            );
            Ok(Keyring::random(&config.key_purposes()))
        }
        Err(e) => Err(AuthError::from(e).into()),
    }
}

/// Repeat login rounds until one authenticates or input ends
async fn sign_in(
    shop: &Arc<Shop>,
    config: &AuthConfig,
    mut email: Option<String>,
) -> anyhow::Result<Option<Session>> {
    loop {
        let address = match email.take() {
            Some(address) => address,
            None => match prompt("E-mail address")? {
                Some(address) => address,
                None => return Ok(None),
            },
        };

        if config.security_mode.allows_brute_force() && wants_brute_force()? {
            if let Some(session) = brute_force(shop, config, &address).await? {
                return Ok(Some(session));
            }
            continue;
        }

        let outcome = shop
            .login(&address, &mut ConsolePasswords, &mut ConsoleRegistration)
            .await;

        match recoverable(outcome)? {
            Some(LoginOutcome::Authenticated(session)) => return Ok(Some(session)),
            Some(LoginOutcome::Registered(number)) => {
                println!("Account {number} created. Please log in.");
            }
            Some(LoginOutcome::Failed { attempts }) => {
                println!("Login failed after {attempts} attempt(s).");
            }
            None => {}
        }
    }
}

fn wants_brute_force() -> anyhow::Result<bool> {
    let answer = prompt("Try brute-force entry with known weak passwords? [y/N]")?;
    Ok(matches!(answer.as_deref().map(str::trim), Some("y" | "Y")))
}

async fn brute_force(
    shop: &Arc<Shop>,
    config: &AuthConfig,
    email: &str,
) -> anyhow::Result<Option<Session>> {
    let mut wordlist = Wordlist::load(&config.wordlist_path).await?;
    let simulator = BruteForceSimulator::new(shop.clone());

    let result = simulator
        .run(email, &mut wordlist, &mut ConsoleRegistration)
        .await;
    let Some(report) = recoverable(result)? else {
        return Ok(None);
    };

    match report.outcome {
        BruteForceOutcome::Cracked { password, session } => {
            println!(
                "Password recovered after {} candidate(s): {password}",
                report.candidates_tried
            );
            Ok(Some(session))
        }
        BruteForceOutcome::Exhausted => {
            println!("No match after {} candidate(s).", report.candidates_tried);
            Ok(None)
        }
        BruteForceOutcome::Registered(number) => {
            println!("Account {number} created. Please log in.");
            Ok(None)
        }
    }
}

async fn account_menu(
    shop: &Shop,
    accounts: &AccountService<JsonAccountRepository>,
    session: &Session,
) -> anyhow::Result<()> {
    loop {
        println!();
        println!("[1] View my account");
        println!("[2] View all accounts");
        println!("[3] Delete an account");
        println!("[4] Verify a session token");
        println!("[0] Log out");

        let Some(choice) = prompt("Choice")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                if let Some(view) = recoverable(accounts.view_own(session).await)? {
                    println!("Account number: {}", view.account_number);
                    println!("E-mail:         {}", view.email);
                    println!("Role:           {}", view.role);
                    println!("Name:           {} {}", view.profile.name, view.profile.surname);
                    println!(
                        "Address:        {}, {}, {}",
                        view.profile.address.line1,
                        view.profile.address.line2,
                        view.profile.address.postcode
                    );
                    println!("Phone:          {}", view.profile.phone);
                    if view.profile_sealed {
                        println!("(Profile is sealed under a different data key.)");
                    }
                }
            }
            "2" => {
                if let Some(listing) = recoverable(accounts.list_all(session).await)? {
                    for summary in listing {
                        println!(
                            "{:>5}  {:<6}  {}",
                            summary.account_number, summary.role, summary.email
                        );
                    }
                }
            }
            "3" => {
                let Some(raw) = prompt("Account number to delete")? else {
                    return Ok(());
                };
                let number = match raw.parse::<AccountNumber>() {
                    Ok(number) => number,
                    Err(e) => {
                        println!("{}", e.message());
                        continue;
                    }
                };
                if let Some(email) = recoverable(accounts.delete(session, number).await)? {
                    println!("Deleted account {number} ({email}).");
                }
            }
            "4" => {
                let Some(token) = prompt("Token")? else {
                    return Ok(());
                };
                if let Some(claims) = recoverable(shop.verify_token(&token))? {
                    println!(
                        "Valid token for {} ({}), issued {}",
                        claims.email, claims.role, claims.issued_at
                    );
                }
            }
            "0" => return Ok(()),
            other => println!("Unknown choice: {other}"),
        }
    }
}

/// Report user-facing failures and continue; system faults end the program
fn recoverable<T>(result: AuthResult<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_denial() => {
            println!("Access denied: {e}");
            Ok(None)
        }
        Err(e) if !e.kind().is_system_fault() => {
            e.log();
            println!("{e}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

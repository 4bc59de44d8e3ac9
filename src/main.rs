use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use hokej::config::{AppConfig, ConfigError, env_var, identity_path_from_lookup};
use hokej::identity::{IdentityError, IdentityMemory};
use hokej::page::SignupPage;
use hokej::poller::spawn_roster_poller;
use hokej::render::render_page;
use hokej::signup::TeamPick;
use hokej::store::{PostgrestStore, StoreError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("store client error: {0}")]
    Store(#[from] StoreError),
    #[error("identity memory error: {0}")]
    Identity(#[from] IdentityError),
    #[error("{0}")]
    SignUp(String),
    #[error("terminal signal error: {0}")]
    Signal(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hokej", about = "HokejPWG roster and sign-up client")]
struct Cli {
    #[arg(long, env = "SUPABASE_URL")]
    store_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current roster once.
    Roster,
    /// Keep the roster on screen, refreshing on the poll interval.
    Watch,
    /// Register for a team; missing fields come from the remembered identity.
    Signup(SignupArgs),
    /// Show the remembered identity.
    Whoami,
    /// Delete the remembered identity.
    Forget,
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long, value_enum)]
    team: Option<TeamArg>,
    /// Do not remember these details for next time.
    #[arg(long, default_value_t = false)]
    no_remember: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum TeamArg {
    White,
    Black,
}

impl From<TeamArg> for TeamPick {
    fn from(value: TeamArg) -> Self {
        match value {
            TeamArg::White => Self::White,
            TeamArg::Black => Self::Black,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("ignoring unreadable .env: {error}");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Cli { store_url, api_key, command } = Cli::parse();
    let load_config = || {
        AppConfig::from_lookup(|key| match key {
            "SUPABASE_URL" => store_url.clone(),
            "SUPABASE_ANON_KEY" => api_key.clone(),
            _ => env_var(key),
        })
    };

    // whoami/forget only touch the identity file; no store credentials needed.
    match command {
        Command::Whoami => run_whoami(&IdentityMemory::new(identity_path_from_lookup(env_var)?)),
        Command::Forget => {
            let identity = IdentityMemory::new(identity_path_from_lookup(env_var)?);
            identity.clear()?;
            println!("forgot {}", identity.path().display());
            Ok(())
        }
        Command::Roster => {
            let config = load_config()?;
            let mut page = page_for(&config)?;
            page.refresh().await;
            print!("{}", render_page(&config.event, page.state()));
            Ok(())
        }
        Command::Watch => run_watch(&load_config()?).await,
        Command::Signup(args) => run_signup(&load_config()?, args).await,
    }
}

fn page_for(config: &AppConfig) -> Result<SignupPage<PostgrestStore>, CliError> {
    let store = PostgrestStore::new(&config.store)?;
    Ok(SignupPage::new(Arc::new(store), IdentityMemory::new(config.identity_path.clone())))
}

fn run_whoami(identity: &IdentityMemory) -> Result<(), CliError> {
    match identity.load() {
        Some(remembered) => {
            println!("{} {} <{}>", remembered.first_name, remembered.last_name, remembered.email);
            if !remembered.phone.is_empty() {
                println!("phone: {}", remembered.phone);
            }
            println!("team: {}", remembered.team_pick.team().label());
        }
        None => println!("nothing remembered at {}", identity.path().display()),
    }
    Ok(())
}

async fn run_watch(config: &AppConfig) -> Result<(), CliError> {
    let store = Arc::new(PostgrestStore::new(&config.store)?);
    let mut page = SignupPage::new(Arc::clone(&store), IdentityMemory::new(config.identity_path.clone()));
    let mut poller = spawn_roster_poller(store, config.poll_interval);

    loop {
        tokio::select! {
            maybe_result = poller.next() => {
                let Some(result) = maybe_result else {
                    break;
                };
                page.apply_fetch(result);
                print!("\x1b[2J\x1b[H{}", render_page(&config.event, page.state()));
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
        }
    }
    drop(poller);
    Ok(())
}

async fn run_signup(config: &AppConfig, args: SignupArgs) -> Result<(), CliError> {
    let mut page = page_for(config)?;
    page.mount();

    let form = page.form_mut();
    if let Some(first_name) = args.first_name {
        form.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        form.last_name = last_name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(phone) = args.phone {
        form.phone = phone;
    }
    if let Some(team) = args.team {
        form.team_pick = team.into();
    }
    form.remember = !args.no_remember;

    let outcome = page.submit_fresh().await;
    print!("{}", render_page(&config.event, page.state()));
    match outcome {
        Ok(_) => Ok(()),
        Err(error) => Err(CliError::SignUp(error.user_message().to_owned())),
    }
}

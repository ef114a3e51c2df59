//! Bliss CLI - command-line client for the Bliss III community portal
//!
//! Signs in with the mock identities, keeps the session in a file-backed
//! slot and answers "what would the portal show for this path" from the
//! terminal.

use anyhow::Context;
use bliss_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success, Identity,
    PortalConfig, Role,
};
use bliss_portal::{
    sign_in, Decision, FileSlot, Guard, Layout, LayoutComposer, MockCredentials, Outcome,
    RolePolicy, SessionStore,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "bliss")]
#[command(about = "Command-line client for the Bliss III community portal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as the demo identity of a role
    Login {
        /// admin or resident
        #[arg(short, long)]
        role: Role,

        /// Use this email instead of the demo address
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Resolve a portal path for the current session
    Open {
        /// Path to open, e.g. /admin/payments
        path: String,

        /// Print the decision and layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// List routes, navigation and landing pages per role
    Routes {
        /// Only this role
        #[arg(short, long)]
        role: Option<Role>,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mut config = load_config(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Bliss CLI v{}", env!("CARGO_PKG_VERSION"));

    let session_dir = expand_home(&config.session.storage_dir);
    let key = config.session.slot_key.as_str();

    match cli.command {
        Commands::Login { role, email } => {
            handle_login(&session_dir, key, role, email)?;
        }
        Commands::Logout => handle_logout(&session_dir, key)?,
        Commands::Whoami => handle_whoami(&session_dir, key)?,
        Commands::Open { path, json } => handle_open(&session_dir, key, &path, json)?,
        Commands::Routes { role } => handle_routes(role),
        Commands::Config {
            show,
            init,
            validate,
        } => handle_config(show, init, validate, &config).await?,
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<PortalConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return Ok(PortalConfig::load(Some(path))?);
    }

    // Try to load from default locations
    let default_paths = [
        Some(config_file_path()),
        dirs::home_dir().map(|d| d.join(".bliss").join("config.toml")),
        Some(PathBuf::from("bliss.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return Ok(PortalConfig::load(Some(path))?);
        }
    }

    Ok(PortalConfig::load(None)?)
}

/// Default configuration file path
fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bliss")
        .join("config.toml")
}

/// Resolve a leading `~/` against the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn open_store(session_dir: &Path, key: &str) -> anyhow::Result<SessionStore<FileSlot>> {
    let slot = FileSlot::new(session_dir)
        .with_context(|| format!("Cannot use session directory {}", session_dir.display()))?;
    Ok(SessionStore::open_with_key(slot, key))
}

fn handle_login(
    session_dir: &Path,
    key: &str,
    role: Role,
    email: Option<String>,
) -> anyhow::Result<Identity> {
    log_operation_start!("login", role = %role);

    let mut credentials = MockCredentials::new(role);
    if let Some(email) = email {
        credentials = credentials.with_email(email);
    }
    let identity = sign_in(&credentials);

    let mut store = open_store(session_dir, key)?;
    if let Err(e) = store.login(identity.clone()) {
        log_operation_error!("login", e);
        return Err(e.into());
    }

    let landing = RolePolicy::standard().landing_route_for(role);
    println!("✅ Signed in as {} <{}>", identity.name, identity.email);
    println!("🏠 Landing page: {}", landing);

    log_operation_success!("login", user = %identity.id);
    Ok(identity)
}

fn handle_logout(session_dir: &Path, key: &str) -> anyhow::Result<()> {
    let mut store = open_store(session_dir, key)?;
    let was_signed_in = store.is_authenticated();
    store.logout()?;

    if was_signed_in {
        println!("👋 Signed out");
    } else {
        println!("ℹ️  No active session");
    }
    Ok(())
}

fn handle_whoami(session_dir: &Path, key: &str) -> anyhow::Result<()> {
    let store = open_store(session_dir, key)?;
    match store.current() {
        Some(identity) => {
            println!("👤 {} ({})", identity.name, identity.role.label());
            println!("   id:    {}", identity.id);
            println!("   email: {}", identity.email);
            if let Some(house) = &identity.house_number {
                println!("   house: {}", house);
            }
        }
        None => println!("🔒 Not signed in. Run `bliss login --role <admin|resident>`."),
    }
    Ok(())
}

fn handle_open(session_dir: &Path, key: &str, path: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(session_dir, key)?;
    let policy = RolePolicy::standard();
    let (decision, layout) = open_path(&policy, store.current(), path);

    if json {
        let output = serde_json::json!({ "decision": decision, "layout": layout });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match &decision.outcome {
        Outcome::Redirect(target) => {
            println!("↪️  Redirect to {}", target);
            if let Some(denial) = &decision.denial {
                println!("   reason: {:?}", denial);
            }
        }
        Outcome::Render(target) => {
            println!("✅ Render {}", target);
            match &layout {
                Some(layout) => print_layout(layout),
                None => println!("   (sign-in page)"),
            }
        }
    }
    Ok(())
}

/// Guard decision plus the layout when the path renders for a signed-in identity
fn open_path(
    policy: &RolePolicy,
    identity: Option<&Identity>,
    path: &str,
) -> (Decision, Option<Layout>) {
    let decision = Guard::new(policy).decide(identity, path);
    let layout = match (&decision.outcome, identity) {
        (Outcome::Render(target), Some(identity)) => {
            LayoutComposer::new(policy).compose(identity, target)
        }
        _ => None,
    };
    (decision, layout)
}

fn print_layout(layout: &Layout) {
    let header = &layout.header;
    println!("📋 {} | {}", header.title, layout.page.title());
    match &header.house_number {
        Some(house) => println!("   {} ({}, {})", header.name, header.role.label(), house),
        None => println!("   {} ({})", header.name, header.role.label()),
    }

    println!("   Navigation:");
    for link in &layout.side_nav {
        let marker = if link.active { "▸" } else { " " };
        println!("   {} {:<16} {}", marker, link.label, link.path);
    }
    if !layout.mobile_nav.is_empty() {
        println!("   Bottom bar: {} entries", layout.mobile_nav.len());
    }
}

fn handle_routes(role: Option<Role>) {
    let policy = RolePolicy::standard();
    let roles: Vec<Role> = match role {
        Some(role) => vec![role],
        None => Role::ALL.to_vec(),
    };

    for role in roles {
        println!("🔐 {} (landing: {})", role.label(), policy.landing_route_for(role));
        for route in policy.routes_for(role) {
            println!("   {:<28} fallback {}", route.path, route.fallback_path);
        }
        println!("   Menu:");
        for entry in policy.navigation_for(role) {
            println!("   - {:<16} {}", entry.label, entry.path);
        }
        println!(
            "   Manage bulletins: {}",
            policy.capabilities(role).can_manage
        );
        println!();
    }
}

async fn handle_config(
    show: bool,
    init: bool,
    validate: bool,
    config: &PortalConfig,
) -> anyhow::Result<()> {
    if init {
        let config_path = config_file_path();
        if let Some(dir) = config_path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        PortalConfig::default().save_to_file(&config_path)?;
        println!("✅ Configuration initialized at: {:?}", config_path);
    }

    if show {
        println!("📋 Current configuration:");
        println!("{}", toml::to_string_pretty(config)?);
    }

    if validate {
        match config.validate() {
            Ok(()) => println!("✅ Configuration is valid"),
            Err(e) => {
                println!("❌ Configuration validation failed: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}

use std::io::Write;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use pawdeck_cli::config::Config;
use pawdeck_cli::output;
use pawdeck_client::{ApiClient, AuthManager, ListingFilters, PricingFilters, SessionInfo, UserListParams};
use pawdeck_core::Role;

#[derive(Parser)]
#[command(name = "pawdeck")]
#[command(about = "Pawdeck admin console - manage the pet marketplace from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (the default)
    Tui,
    /// Log in and store the session token locally
    Login {
        /// Email or username to authenticate as
        #[arg(long)]
        email: String,
    },
    /// Remove the stored session
    Logout,
    /// Ask the server to send a password reset email
    ResetPassword {
        #[arg(long)]
        email: String,
    },
    /// Show who the stored session belongs to
    Whoami,
    /// List accounts, filtered by role
    Users {
        #[arg(long, default_value = "user")]
        role: String,
        /// Substring match on name or email
        #[arg(long)]
        search: Option<String>,
    },
    /// List featured pet listings
    Listings {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        limit: u32,
        #[arg(long)]
        pet_name: Option<String>,
        /// Pet type, e.g. Dog, Cat, Bird
        #[arg(long = "type")]
        pet_type: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// List featured-listing pricing plans
    Pricing {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        limit: u32,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = handle_command(cli.command.unwrap_or(Commands::Tui)).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing::debug!("Using API at {}", config.api_url);
    let mut auth = AuthManager::new()?;
    auth.init().await?;

    let mut client = ApiClient::with_timeout(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    if let Ok(token) = auth.valid_token() {
        client.set_access_token(token);
    }

    match command {
        Commands::Tui => start_tui(client, auth).await,
        Commands::Login { email } => {
            let password = prompt_password()?;
            let data = client.login(&email, &password).await?;
            let session = SessionInfo::from_login(data.token, &data.user);
            auth.set_session(session).await?;
            println!(
                "{} Logged in as {} ({})",
                "OK".green().bold(),
                data.user.email.cyan(),
                data.user.role
            );
            Ok(())
        }
        Commands::Logout => {
            auth.logout().await?;
            println!("{} Session removed", "OK".green().bold());
            Ok(())
        }
        Commands::ResetPassword { email } => {
            client.reset_password(&email).await?;
            println!("{} Reset email sent to {}", "OK".green().bold(), email.cyan());
            Ok(())
        }
        Commands::Whoami => {
            match auth.user_info() {
                Some((id, email, role)) => {
                    println!("{} {} (id {}, {})", "Session:".cyan(), email, id, role)
                }
                None => println!("{}", "Not logged in".yellow()),
            }
            Ok(())
        }
        Commands::Users { role, search } => {
            let role: Role = role.parse()?;
            let mut params = UserListParams::for_role(role);
            if let Some(search) = search {
                params = params.with_search(search);
            }
            let envelope = client.list_users(&params).await?;
            output::print_users(&envelope.data);
            Ok(())
        }
        Commands::Listings {
            page,
            limit,
            pet_name,
            pet_type,
            min_price,
            max_price,
        } => {
            let filters = ListingFilters {
                page: Some(page),
                limit: Some(limit),
                pet_name,
                pet_type,
                min_price,
                max_price,
                ..ListingFilters::baseline()
            };
            let envelope = client.list_featured_listings(&filters).await?;
            output::print_listings(&envelope.data, envelope.page, envelope.last_page, envelope.total);
            Ok(())
        }
        Commands::Pricing { page, limit } => {
            let filters = PricingFilters {
                page: Some(page),
                limit: Some(limit),
            };
            let envelope = client.list_pricing_plans(&filters).await?;
            output::print_pricing(&envelope.data, envelope.page, envelope.last_page, envelope.total);
            Ok(())
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

async fn start_tui(client: ApiClient, auth: AuthManager) -> anyhow::Result<()> {
    use crossterm::{execute, terminal};

    let mut app = pawdeck_tui::App::new(client);
    if let Some((_, email, _)) = auth.user_info() {
        app = app.with_session(email);
    }

    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Always restore the terminal, even when the app errored
    let cleanup_result = (|| -> anyhow::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        Ok(())
    })();
    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    result
}

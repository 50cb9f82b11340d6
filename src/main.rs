//! `library` - command line front end for the library client
//!
//! The session token is kept in the configured storage file, so a login
//! survives between invocations the same way it survives a page reload.

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_client::{
    config::{AppConfig, LoggingConfig},
    models::{BookQuery, Credentials, MyBorrowsQuery, NotificationQuery, RegisterRequest},
    App,
};

#[derive(Parser, Debug)]
#[command(name = "library", version, about = "Library management client")]
struct Args {
    /// Backend base URL, overrides configuration
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with a username or email
    Login { login: String, password: String },
    /// Create an account and log in
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current user
    Whoami,
    /// Run the navigation guard for a path
    Navigate {
        path: String,
        /// Reload the user record first so role checks can pass
        #[arg(long)]
        fetch_user: bool,
    },
    /// List or search books
    Books {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Borrow a book
    Borrow { book_id: i64 },
    /// Return a borrowed book
    Return { record_id: i64 },
    /// Renew a borrow
    Renew { record_id: i64 },
    /// Show my borrow history
    MyBorrows {
        /// Filter by status; repeatable
        #[arg(long)]
        status: Vec<String>,
    },
    /// List notifications
    Notifications {
        #[arg(long)]
        unread: bool,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_client={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = AppConfig::load()?;
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);
    tracing::debug!("Using backend {}", config.api.base_url);

    let app = App::from_config(config)?;
    let services = &app.services;

    match args.command {
        Command::Login { login, password } => {
            let response = app.store.login(&Credentials::new(login, password)).await?;
            println!(
                "Logged in as {} ({})",
                response.user.username.as_deref().unwrap_or("?"),
                response.user.role
            );
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let response = app
                .store
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                })
                .await?;
            println!("Registered user #{}", response.user.id);
        }
        Command::Logout => {
            app.store.logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            if !app.store.check_auth() {
                println!("Not logged in");
                return Ok(());
            }
            let user = app.store.fetch_current_user().await?;
            print_json(&serde_json::to_value(&user)?)?;
        }
        Command::Navigate { path, fetch_user } => {
            if fetch_user && app.store.check_auth() {
                app.store.fetch_current_user().await?;
            }
            let route = app.router.push(&path)?;
            println!("{} -> {} ({})", path, route.path, route.name);
        }
        Command::Books {
            search,
            page,
            per_page,
        } => {
            let query = BookQuery {
                page,
                per_page,
                ..Default::default()
            };
            let books = match search {
                Some(keyword) => services.books.search(&keyword, &query).await?,
                None => services.books.list(&query).await?,
            };
            print_json(&books)?;
        }
        Command::Borrow { book_id } => print_json(&services.borrows.borrow(book_id).await?)?,
        Command::Return { record_id } => {
            print_json(&services.borrows.return_book(record_id).await?)?
        }
        Command::Renew { record_id } => print_json(&services.borrows.renew(record_id).await?)?,
        Command::MyBorrows { status } => {
            let query = MyBorrowsQuery {
                status,
                ..Default::default()
            };
            print_json(&services.borrows.my_borrows(&query).await?)?;
        }
        Command::Notifications { unread } => {
            let query = NotificationQuery {
                is_read: unread.then_some(false),
                ..Default::default()
            };
            print_json(&services.notifications.list(&query).await?)?;
        }
    }

    Ok(())
}

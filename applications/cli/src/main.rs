/// myflix - command-line client for the myFlix movie API
mod config;
mod terminal;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use myflix_client::{parse_birthday, ClientConfig, ClientError, MyFlixClient, Session, UserUpdate};
use myflix_views::{AppShell, DialogResult, LoginForm, RegistrationForm};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use crate::terminal::{ArgsInput, TerminalNotifier};

#[derive(Parser)]
#[command(name = "myflix")]
#[command(about = "Browse the myFlix movie catalog", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        #[arg(short, long, default_value = "")]
        username: String,
        #[arg(short, long, env = "MYFLIX_PASSWORD", hide_env_values = true, default_value = "")]
        password: String,
        #[arg(short, long, default_value = "")]
        email: String,
        /// Birthday as YYYY-MM-DD
        #[arg(short, long, default_value = "")]
        birthday: String,
    },
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "MYFLIX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List all movies
    Movies,
    /// Show a single movie
    Movie {
        #[arg(long, conflicts_with = "title", required_unless_present = "title")]
        id: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Show a director
    Director { name: String },
    /// List all users
    Users,
    /// Show a single user
    User { id: String },
    /// Manage favorite movies
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Edit the logged-in user
    Edit {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<String>,
    },
    /// Delete the logged-in user's account
    DeleteAccount,
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Add a movie to favorites
    Add {
        title: String,
        /// User id (defaults to the logged-in user)
        #[arg(long)]
        user: Option<String>,
    },
    /// Remove a movie from favorites
    Remove {
        title: String,
        /// User id (defaults to the logged-in user)
        #[arg(long)]
        user: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "myflix=info,myflix_client=info,myflix_views=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ClientError>() {
        Some(client_err) => eprintln!("Error: {}", client_err.message()),
        None => eprintln!("Error: {:#}", err),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    tracing::debug!(
        url = %settings.api.url,
        session = %settings.session.path.display(),
        "Loaded settings"
    );

    let session = Session::file(&settings.session.path);
    let client = MyFlixClient::new(ClientConfig::new(&settings.api.url), session)?;

    match cli.command {
        Commands::Register {
            username,
            password,
            email,
            birthday,
        } => {
            let mut shell = AppShell::new(client, Arc::new(TerminalNotifier));
            let mut input = ArgsInput::registration(RegistrationForm {
                username,
                password,
                email,
                birthday,
            });
            if shell.open_registration_dialog(&mut input).await != DialogResult::Closed {
                bail!("registration was not completed");
            }
        }
        Commands::Login { username, password } => {
            let mut shell = AppShell::new(client, Arc::new(TerminalNotifier));
            let mut input = ArgsInput::login(LoginForm { username, password });
            shell.open_login_dialog(&mut input).await;
            if !shell.is_logged_in() {
                bail!("not logged in");
            }
        }
        Commands::Logout => {
            client.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => match client.current_user()? {
            Some(user) => terminal::print_user(&user),
            None => println!("Not logged in"),
        },
        Commands::Movies => {
            for movie in client.get_all_movies().await? {
                terminal::print_movie_line(&movie);
            }
        }
        Commands::Movie { id, title } => {
            let movie = match (id, title) {
                (Some(id), _) => client.get_movie_by_id(&id).await?,
                (None, Some(title)) => client.get_movie_by_title(&title).await?,
                (None, None) => bail!("either --id or --title is required"),
            };
            terminal::print_movie(&movie);
        }
        Commands::Director { name } => {
            terminal::print_director(&client.get_director(&name).await?);
        }
        Commands::Users => {
            for user in client.get_user_list().await? {
                println!("{} | {}", user.id, user.username);
            }
        }
        Commands::User { id } => {
            terminal::print_user(&client.get_user_by_id(&id).await?);
        }
        Commands::Favorite { action } => match action {
            FavoriteAction::Add { title, user } => {
                let user_id = target_user(&client, user)?;
                let user = client.add_favorite_movie(&user_id, &title).await?;
                println!("Added {} to {}'s favorites", title, user.username);
            }
            FavoriteAction::Remove { title, user } => {
                let user_id = target_user(&client, user)?;
                let user = client.delete_favorite_movie(&user_id, &title).await?;
                println!("Removed {} from {}'s favorites", title, user.username);
            }
        },
        Commands::Edit {
            username,
            password,
            email,
            birthday,
        } => {
            let user_id = target_user(&client, None)?;
            let birthday = match birthday {
                Some(text) => Some(
                    parse_birthday(&text).with_context(|| {
                        format!("invalid birthday {:?}, expected YYYY-MM-DD", text)
                    })?,
                ),
                None => None,
            };
            let update = UserUpdate {
                username,
                password,
                email,
                birthday,
            };
            if update.is_empty() {
                bail!("nothing to update");
            }
            terminal::print_user(&client.edit_user(&user_id, &update).await?);
        }
        Commands::DeleteAccount => {
            let user_id = target_user(&client, None)?;
            println!("{}", client.delete_user(&user_id).await?);
        }
    }

    Ok(())
}

/// The explicit user id, or the logged-in user's.
fn target_user(client: &MyFlixClient, explicit: Option<String>) -> anyhow::Result<String> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    client
        .current_user()?
        .map(|user| user.id)
        .context("not logged in (run `myflix login` first)")
}

//! Terminal client for the Campus Admin API.
//!
//! ```text
//! campus-client login <username> <password>
//! campus-client me
//! campus-client students
//! campus-client courses
//! campus-client logout
//! ```

use std::path::PathBuf;

use campus_admin::client::context::{AuthContext, AuthState, ClientError};
use campus_admin::client::guard::{Navigation, resolve_navigation};
use campus_admin::client::session::SessionStore;
use dotenvy::dotenv;

fn session_path() -> PathBuf {
    if let Ok(path) = std::env::var("CAMPUS_SESSION_FILE") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".campus-admin").join("session.json")
}

fn usage() -> ! {
    eprintln!("Usage: campus-client <login <username> <password> | me | students | courses | logout>");
    std::process::exit(1);
}

/// Screen a command navigates to, and whether that screen is protected.
fn screen_for(command: &str) -> (&'static str, bool) {
    match command {
        "login" => ("/login", false),
        "me" => ("/me", true),
        "students" => ("/students", true),
        "courses" => ("/courses", true),
        "logout" => ("/logout", false),
        _ => usage(),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let base_url =
        std::env::var("CAMPUS_API_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());
    let mut ctx = AuthContext::new(base_url, SessionStore::new(session_path()));

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or_else(|| usage());

    let (target, requires_auth) = screen_for(command);
    let authenticated = ctx.state() == AuthState::Authenticated;
    match resolve_navigation(authenticated, requires_auth, target) {
        Navigation::Proceed => {}
        Navigation::RedirectToLogin { next } => {
            eprintln!("Please log in first, then retry {}", next);
            std::process::exit(1);
        }
        Navigation::RedirectHome => {
            let admin = ctx.admin().expect("authenticated session has a profile");
            println!("Already signed in as {}, log out first", admin.username);
            return;
        }
    }

    let result = match command {
        "login" => {
            let username = args.get(2).unwrap_or_else(|| usage());
            let password = args.get(3).unwrap_or_else(|| usage());
            match ctx.login(username, password).await {
                Ok(()) => {
                    let admin = ctx.admin().expect("just logged in");
                    println!("Signed in as {} <{}>", admin.username, admin.email);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        "me" => print_json(&mut ctx, "/admins/me").await,
        "students" => print_json(&mut ctx, "/students").await,
        "courses" => print_json(&mut ctx, "/courses").await,
        "logout" => {
            ctx.logout();
            println!("Signed out");
            Ok(())
        }
        _ => usage(),
    };

    if let Err(e) = result {
        match e {
            ClientError::Unauthorized if command == "login" => {
                eprintln!("Invalid credentials");
            }
            // The guard let this command through, so an Unauthorized here
            // means the session could not be recovered by a refresh
            ClientError::Unauthorized => {
                eprintln!("Session expired, please log in again");
            }
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}

async fn print_json(ctx: &mut AuthContext, path: &str) -> Result<(), ClientError> {
    let body = ctx.get_json(path).await?;
    println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    Ok(())
}

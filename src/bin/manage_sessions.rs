//! CLI tool to manage sessions in the PostgreSQL session store.
//!
//! Usage:
//!   cargo run --bin manage-sessions -- issue --user <id> [--role admin|user]
//!   cargo run --bin manage-sessions -- revoke --token <token>
//!   cargo run --bin manage-sessions -- purge

use std::env;

use admin_gate::clock::{Clock, SystemClock};
use admin_gate::config::{Config, defaults};
use admin_gate::db::DbPool;
use admin_gate::models::Role;
use admin_gate::services;
use admin_gate::session::{PgSessionStore, SessionStore, SessionToken};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let Some(url) = config.database_url.as_deref() else {
        eprintln!("Error: DATABASE_URL is required");
        std::process::exit(1);
    };

    let pool = match DbPool::new(url, 2).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error running migrations: {}", e);
        std::process::exit(1);
    }

    let store = PgSessionStore::new(pool);

    match command {
        "issue" => {
            let user = find_arg(&args, &["--user", "-u"]).unwrap_or_else(|| {
                eprintln!("Error: --user is required");
                std::process::exit(1);
            });
            let role = find_arg(&args, &["--role", "-r"]).unwrap_or_else(|| "user".to_string());
            let Some(role) = Role::parse(&role) else {
                eprintln!("Error: Invalid role '{}'. Must be: admin, user", role);
                std::process::exit(1);
            };
            issue(&store, &user, role, config.session_ttl_secs).await;
        }
        "revoke" => {
            let token = find_arg(&args, &["--token", "-t"])
                .and_then(SessionToken::new)
                .unwrap_or_else(|| {
                    eprintln!("Error: --token is required");
                    std::process::exit(1);
                });
            revoke(&store, &token).await;
        }
        "purge" => purge(&store).await,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn find_arg(args: &[String], names: &[&str]) -> Option<String> {
    let mut i = 2;
    while i < args.len() {
        if names.contains(&args[i].as_str()) && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        i += 1;
    }
    None
}

async fn issue(store: &PgSessionStore, user: &str, role: Role, ttl_secs: u64) {
    let now = SystemClock.now();
    let (token, record) = match services::issue_session(store, user, role, ttl_secs, now).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error issuing session: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("  Session Issued");
    println!("════════════════════════════════════════════════════════════════");
    println!();
    println!("  User:    {}", record.user_id);
    println!("  Role:    {}", record.role);
    println!("  Created: {}", record.created_at);
    println!("  Expires: {}", record.expires_at);
    println!();
    println!("  Cookie:  session={}", token.as_str());
    println!();
    println!("  ⚠️  Save this token! It cannot be retrieved later.");
    println!("════════════════════════════════════════════════════════════════");
    println!();
}

async fn revoke(store: &PgSessionStore, token: &SessionToken) {
    match services::revoke_session(store, token).await {
        Ok(()) => println!("Session revoked"),
        Err(e) => {
            eprintln!("Error revoking session: {}", e);
            std::process::exit(1);
        }
    }
}

async fn purge(store: &PgSessionStore) {
    match store.purge_expired().await {
        Ok(removed) => println!("Removed {} expired sessions", removed),
        Err(e) => {
            eprintln!("Error purging sessions: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: manage-sessions <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  issue    Create a session");
    eprintln!("           --user, -u   User id (required)");
    eprintln!("           --role, -r   Role: admin, user (default: user)");
    eprintln!("  revoke   Delete a session");
    eprintln!("           --token, -t  Session token (required)");
    eprintln!("  purge    Delete all expired sessions");
    eprintln!();
    eprintln!(
        "Session lifetime comes from SESSION_EXPIRY (default: {}s).",
        defaults::SESSION_TTL_SECS
    );
    eprintln!();
}

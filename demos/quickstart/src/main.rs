//! Interactive demo: type tasks, then push them to Appwrite.
//!
//! Configuration comes from the environment (or a `.env` file):
//! `APPWRITE_ENDPOINT`, `APPWRITE_PROJECT_ID`, `APPWRITE_DATABASE_ID`,
//! `APPWRITE_SESSION`, optionally `APPWRITE_COLLECTION_ID` and
//! `DATABASE_URL`.

use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use taskmirror::{AppwriteRemote, TaskMirrorBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./tasks.db?mode=rwc".to_string());
    let collection = std::env::var("APPWRITE_COLLECTION_ID")
        .unwrap_or_else(|_| "tasks".to_string());

    let remote = Arc::new(AppwriteRemote::new(
        std::env::var("APPWRITE_ENDPOINT").expect("APPWRITE_ENDPOINT must be set"),
        std::env::var("APPWRITE_PROJECT_ID").expect("APPWRITE_PROJECT_ID must be set"),
        std::env::var("APPWRITE_DATABASE_ID").expect("APPWRITE_DATABASE_ID must be set"),
        std::env::var("APPWRITE_SESSION").expect("APPWRITE_SESSION must be set"),
    ));

    let mirror = TaskMirrorBuilder::new(&database_url, remote)
        .with_collection(&collection)
        .build()
        .await?;

    println!("Enter tasks as `name: description`; empty line to sync.");
    loop {
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            break;
        }
        let (name, description) = trimmed
            .split_once(':')
            .unwrap_or((trimmed, "added from quickstart"));
        let task = mirror.store().insert(name, description).await?;
        println!("stored #{}: {}", task.id, task.name);
    }

    let report = mirror.synchronize().await?;
    for linked in &report.linked {
        println!("task #{} -> {}", linked.local_id, linked.remote_id);
    }
    for failure in &report.failures {
        eprintln!("task #{} failed: {}", failure.local_id, failure.error);
    }
    println!("{} linked, {} failed", report.linked.len(), report.failures.len());

    Ok(())
}

//! Demo seed script
//!
//! Seeds the database with demo teachers and a spread of announcements
//! around today's date:
//! - 3 teachers: mrodriguez, mchen, principal
//! - 1 expired, 3 current and 2 upcoming announcements
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo [--reset]
//!
//!   --reset  Delete every existing announcement first

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::Parser;

use announcements_api::{
    db::{self, AnnouncementStore, PgAnnouncementStore},
    models::announcement::AnnouncementPayload,
};

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed demo teachers and announcements")]
struct Args {
    /// Remove all announcements before seeding
    #[arg(long)]
    reset: bool,
}

const TEACHERS: &[(&str, &str)] = &[
    ("mrodriguez", "Ms. Rodriguez"),
    ("mchen", "Mr. Chen"),
    ("principal", "Principal Martinez"),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed Demo ===");

    let pool = db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await.context("Failed to run migrations")?;

    if args.reset {
        println!("Removing existing announcements...");
        sqlx::query("DELETE FROM announcements")
            .execute(&pool)
            .await
            .context("Failed to clear announcements")?;
    }

    println!("Creating teachers...");
    for &(username, display_name) in TEACHERS {
        sqlx::query(
            "INSERT INTO teachers (username, display_name) VALUES ($1, $2)
             ON CONFLICT (username) DO UPDATE SET display_name = EXCLUDED.display_name",
        )
        .bind(username)
        .bind(display_name)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert teacher {username}"))?;
        println!("  {username}");
    }

    println!("Creating announcements...");
    let today = Local::now().date_naive();
    let days = |n: i64| today + Duration::days(n);
    let demo: Vec<(&str, &str, Option<NaiveDate>, NaiveDate)> = vec![
        ("Science fair recap", "Thanks to everyone who presented at the science fair.", Some(days(-20)), days(-5)),
        ("Library hours", "The library now stays open until 5 pm on weekdays.", None, days(30)),
        ("Midterm exams", "Midterms run all next week. Check the schedule posted outside room 104.", Some(days(-2)), days(9)),
        ("Chess club", "Chess club meets every Wednesday in room 212.", Some(days(-30)), days(60)),
        ("Spring break", "No classes during spring break. Enjoy the time off!", Some(days(14)), days(21)),
        ("Graduation rehearsal", "Seniors must attend the rehearsal in the gym.", Some(days(40)), days(41)),
    ];

    let store = PgAnnouncementStore::new(pool);
    for (title, message, start_date, end_date) in demo {
        let doc = AnnouncementPayload {
            title: title.to_string(),
            message: message.to_string(),
            start_date,
            end_date,
        }
        .into_document()
        .map_err(|e| anyhow::anyhow!("Invalid demo announcement {title:?}: {e}"))?;

        let id = store.insert(&doc).await?;
        println!("  {title} ({id})");
    }

    println!("=== Done ===");
    Ok(())
}

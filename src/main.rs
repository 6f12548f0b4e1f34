use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use course_overview_campus::config::BlockConfig;
use course_overview_campus::host::StringPack;
use course_overview_campus::models::TRACKED_RESOURCE_TYPES;
use course_overview_campus::overview::{self, PrerenderedOverview};
use course_overview_campus::{db, labels, metalink, notifications, teachers, terms};

#[derive(Parser)]
#[command(name = "course-overview-campus")]
#[command(about = "Campus formatting helpers for the course overview block", long_about = None)]
struct Cli {
    /// Block configuration (JSON); defaults to $COC_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load demo courses, meta links and modules
    Seed,
    /// Check that term start days are in order
    CheckTerms,
    /// Format a teacher list read from CSV
    Teachers {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Build a term display name
    TermLabel {
        #[arg(long)]
        term: String,
        #[arg(long)]
        year: String,
        #[arg(long, default_value = "")]
        year2: String,
    },
    /// Render new-resource badges for a user in a course
    Notifications {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        course: i64,
    },
    /// Render the meta-link badge for a course
    Metalink {
        #[arg(long)]
        course: i64,
    },
    /// Collect badge overviews for every course, in batches
    Overviews {
        #[arg(long)]
        user: i64,
    },
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

fn string_pack(config: &BlockConfig) -> anyhow::Result<StringPack> {
    match &config.strings {
        Some(path) => StringPack::load(path),
        None => Ok(StringPack::english()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = BlockConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&connect().await?).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&connect().await?).await?;
            println!("Seed data inserted.");
        }
        Commands::CheckTerms => match terms::check_term_config(&config.terms) {
            Ok(()) => println!("Term configuration is valid."),
            Err(err) => {
                println!("Term configuration is invalid: {err}");
                std::process::exit(1);
            }
        },
        Commands::Teachers { csv } => {
            let file = std::fs::File::open(&csv)
                .with_context(|| format!("failed to open {}", csv.display()))?;
            let list = teachers::read_teachers_csv(file)?;
            let names = teachers::teacher_name_string(
                &list,
                config.terms.secondrowshowteachernamestyle,
                &config.name_display(),
            );
            println!("{names}");
        }
        Commands::TermLabel { term, year, year2 } => {
            let label = labels::term_display_name(
                &term,
                &year,
                &year2,
                config.terms.termyearseparation,
                config.terms.termyearpos,
            );
            println!("{label}");
        }
        Commands::Notifications { user, course } => {
            let pool = connect().await?;
            let strings = string_pack(&config)?;

            let course_ref = db::course(&pool, course)
                .await?
                .with_context(|| format!("course {course} not found"))?;
            let cutoff = db::cutoff_for(&pool, user, course).await;
            let events = db::course_resources(&pool, course).await?;
            let counts =
                notifications::count_new_resources(&events, cutoff, TRACKED_RESOURCE_TYPES);

            let since = DateTime::from_timestamp(cutoff, 0)
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| cutoff.to_string());
            log::info!(
                "{} new resources in {} since {}",
                counts.total(),
                course_ref.shortname,
                since
            );
            for (tag, count) in counts.iter() {
                println!("- {tag}: {count}");
            }
            println!("{}", notifications::render_notifications(&counts, &strings));
        }
        Commands::Metalink { course } => {
            let pool = connect().await?;
            let strings = string_pack(&config)?;
            let links = db::meta_links_or_empty(&pool, course).await;
            if links.is_empty() {
                println!("Course {course} has no meta-linked parents.");
                return Ok(());
            }
            println!("{}", metalink::render_metalink(&links, &strings));
        }
        Commands::Overviews { user } => {
            let pool = connect().await?;
            let strings = string_pack(&config)?;
            let courses = db::courses(&pool).await?;

            let mut new_resources = HashMap::new();
            let mut parents = HashMap::new();
            for course in &courses {
                let cutoff = db::cutoff_for(&pool, user, course.id).await;
                let events = db::course_resources(&pool, course.id).await?;
                let counts =
                    notifications::count_new_resources(&events, cutoff, TRACKED_RESOURCE_TYPES);
                new_resources.insert(
                    course.id,
                    notifications::render_notifications(&counts, &strings),
                );

                let links = db::meta_links_or_empty(&pool, course.id).await;
                parents.insert(course.id, metalink::render_metalink(&links, &strings));
            }

            let new_resources = PrerenderedOverview::new("newresources", new_resources);
            let parents = PrerenderedOverview::new("metalink", parents);
            let overviews = overview::get_overviews(
                &courses,
                &config.skip_modules,
                &[&new_resources, &parents],
                config.max_modinfo_cache_size,
            );

            if overviews.is_empty() {
                println!("Nothing to show for user {user}.");
                return Ok(());
            }
            for course in &courses {
                if let Some(modules) = overviews.get(&course.id) {
                    println!("## {}", course.shortname);
                    for (module, html) in modules {
                        println!("- {module}: {html}");
                    }
                }
            }
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use block::{
    EnglishStrings, LinkBuilder, OverviewImageLookup, RecommendationBlock, StringKey, Viewer,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{CategoryId, Course, EnrollmentIndex, UserId};
use scoring::ScoredCourse;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// CourseRecs - course recommendations from co-enrollment
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Course recommendation engine using co-enrollment collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the enrollment dataset directory
    #[arg(short, long, default_value = "data/demo")]
    data_dir: PathBuf,

    /// Public site root used to build course and image links
    #[arg(long, default_value = "http://localhost")]
    www_root: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Ranked list for the terminal
    Text,
    /// Desktop dashboard card deck
    Html,
    /// Mobile app payload as JSON
    Mobile,
}

#[derive(Subcommand)]
enum Commands {
    /// Get course recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// How to present the recommendations
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Show why each course was recommended
        #[arg(long)]
        explain: bool,

        /// Render as the guest account instead of the user
        #[arg(long)]
        guest: bool,
    },

    /// Show a user's enrollments grouped by category
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Search for courses by name
    Search {
        /// Course name to search for (case-insensitive substring match)
        #[arg(long)]
        name: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let index = Arc::new(
        EnrollmentIndex::load_from_files(&cli.data_dir)
            .with_context(|| format!("Failed to load dataset from {}", cli.data_dir.display()))?,
    );
    info!("Loaded dataset in {:?}", start.elapsed());

    let links = LinkBuilder::new(cli.www_root);
    let block = RecommendationBlock::new(
        index.clone(),
        Arc::new(OverviewImageLookup::new(index.clone(), links.clone())),
        Arc::new(EnglishStrings),
        links,
    );

    match cli.command {
        Commands::Recommend {
            user_id,
            format,
            explain,
            guest,
        } => {
            let viewer = if guest { Viewer::Guest } else { Viewer::User(user_id) };
            handle_recommend(&block, viewer, format, explain)?
        }
        Commands::User { user_id } => handle_user(&index, user_id)?,
        Commands::Search { name } => handle_search(&index, &name)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(block, index, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    block: &RecommendationBlock,
    viewer: Viewer,
    format: OutputFormat,
    explain: bool,
) -> Result<()> {
    match format {
        OutputFormat::Html => {
            let content = block.desktop_content(viewer)?;
            println!("{}", content.text);
        }
        OutputFormat::Mobile => {
            let response = block.mobile_view(viewer)?;
            println!("{}", response.to_json().context("Failed to encode mobile payload")?);
        }
        OutputFormat::Text => {
            let Some(user_id) = viewer.user_id() else {
                println!("{}", block.desktop_content(viewer)?.text.yellow());
                return Ok(());
            };
            let recommendations = block.recommendations(user_id)?;
            print_recommendations(
                &block.title(),
                &block.string(StringKey::NoRecommendations),
                &recommendations,
                explain,
            );
        }
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(index: &EnrollmentIndex, user_id: UserId) -> Result<()> {
    println!("{}", format!("User ID: {}", user_id).bold().blue());

    let Some(course_ids) = index.get_user_courses(user_id) else {
        println!("{}Not enrolled in any course", "• ".yellow());
        return Ok(());
    };
    println!("{}Enrolled courses: {}", "• ".cyan(), course_ids.len());

    // Group by category, sorted by category name then course name
    let mut by_category: BTreeMap<(String, CategoryId), Vec<&Course>> = BTreeMap::new();
    for course_id in course_ids {
        if let Some(course) = index.get_course(*course_id) {
            let category_name = index
                .category_name_of(course.id)
                .unwrap_or("(unknown)")
                .to_string();
            by_category
                .entry((category_name, course.category))
                .or_default()
                .push(course);
        }
    }

    for ((category_name, _), mut courses) in by_category {
        courses.sort_by(|a, b| a.fullname.cmp(&b.fullname));
        println!("{}", category_name.green());
        for course in courses {
            let hidden = if course.visible { "" } else { " (hidden)" };
            println!("  - [{}] {}{}", course.id, course.fullname, hidden);
        }
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(index: &EnrollmentIndex, name: &str) -> Result<()> {
    let needle = name.to_lowercase();

    // Exact matches first, then substring matches; busier courses first within each
    let mut matches: Vec<(u8, usize, &Course)> = index
        .courses()
        .filter_map(|course| {
            let fullname = course.fullname.to_lowercase();
            let relevance = if fullname == needle {
                0
            } else if fullname.contains(&needle) {
                1
            } else {
                return None;
            };
            let learners = index.get_course_users(course.id).map_or(0, |u| u.len());
            Some((relevance, learners, course))
        })
        .collect();

    matches.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| a.2.fullname.cmp(&b.2.fullname))
    });

    println!("{}", format!("Search results for '{}':", name).bold().blue());
    if matches.is_empty() {
        println!("  no courses found");
    }
    for (_, learners, course) in matches.iter().take(20) {
        let category = index.category_name_of(course.id).unwrap_or("(unknown)");
        let hidden = if course.visible { "" } else { " (hidden)" };
        println!(
            "{}: {} [{}] {} learners{}",
            course.id, course.fullname, category, learners, hidden
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    block: RecommendationBlock,
    index: Arc<EnrollmentIndex>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let mut users: Vec<UserId> = index
        .courses()
        .filter_map(|course| index.get_course_users(course.id))
        .flatten()
        .copied()
        .collect();
    users.sort_unstable();
    users.dedup();
    anyhow::ensure!(!users.is_empty(), "Dataset has no enrolled users to benchmark with");

    let user_ids: Vec<UserId> = (0..requests)
        .map(|_| users[rand::random_range(0..users.len())])
        .collect();

    let limiter = Arc::new(tokio::sync::Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        let block = block.clone();
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                block.recommendations(user_id)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            })
            .await?
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(handles.len());
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }

    timings.sort();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p) as usize];
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Format and print recommendations
fn print_recommendations(
    title: &str,
    empty_message: &str,
    recommendations: &[ScoredCourse],
    explain: bool,
) {
    println!("{}", title.bold().blue());
    if recommendations.is_empty() {
        println!("  {}", empty_message.yellow());
        return;
    }

    for (rank, course) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {}",
            (rank + 1).to_string().green(),
            course.fullname,
            course.category_name,
            course.score
        );
        if explain {
            println!("   {}", course.explanation());
        }
    }
}

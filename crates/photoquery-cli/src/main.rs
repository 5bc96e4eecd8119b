use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use photoquery_core::{media, QueryOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photoquery", version, about = "Date search suggestions and image format checks for a photo library")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show date suggestions for a search phrase
    Suggest {
        /// What the user typed
        phrase: String,

        /// JSON options file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Skip free-text date parsing
        #[arg(long)]
        no_dates: bool,

        /// Skip holiday suggestions
        #[arg(long)]
        no_holidays: bool,

        /// Skip year suggestions
        #[arg(long)]
        no_years: bool,

        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show how image files would be routed for display
    Classify {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Suggest { phrase, config, today, no_dates, no_holidays, no_years, json } => {
            let mut options = match config {
                Some(path) => QueryOptions::load(&path)
                    .with_context(|| format!("loading options from {}", path.display()))?,
                None => QueryOptions::default(),
            };
            if let Some(today) = today {
                options = options.with_today(&today)?;
            }
            options.dates &= !no_dates;
            options.holidays &= !no_holidays;
            options.years &= !no_years;

            let clock = options.clock();
            let suggestions = photoquery_core::suggest(&phrase, &options, clock.as_ref());
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                for s in &suggestions {
                    println!("{}\t{}", s.label, s.value);
                }
            }
        }
        Command::Classify { files, json } => {
            let mut rows = Vec::with_capacity(files.len());
            for file in &files {
                let is_image = media::is_image(file);
                if !is_image {
                    tracing::warn!(file = %file.display(), "not an image");
                }
                let ext = media::extension_of(file).unwrap_or_default();
                rows.push(serde_json::json!({
                    "file": file,
                    "extension": ext,
                    "kind": media::classify(&ext),
                    "needs_conversion": media::needs_conversion(&ext),
                    "partial_support": media::has_partial_support(&ext),
                    "heic": media::is_heic_family(&ext),
                    "image": is_image,
                }));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (file, row) in files.iter().zip(&rows) {
                    println!(
                        "{}\t{}\tconvert={} partial={} heic={} image={}",
                        file.display(),
                        row["kind"].as_str().unwrap_or("?"),
                        row["needs_conversion"],
                        row["partial_support"],
                        row["heic"],
                        row["image"],
                    );
                }
            }
        }
    }

    Ok(())
}

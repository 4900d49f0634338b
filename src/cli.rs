use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bond;
use crate::config::Config;
use crate::content::{self, MoodId};
use crate::profile::ProfileStore;
use crate::reading::generate_reading;
use crate::ritual::{RitualTimer, TickOutcome, TICK_INTERVAL_MS};
use crate::sanctuary::{self, Coordinate, LocationError, SanctuaryView, StaticLocation};
use crate::session;
use crate::shadow::{self, ShadowStore};
use crate::share;

#[derive(Parser)]
#[command(name = "mystic", about = "Mystic Loop - the algorithmic coven, in your terminal")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the data directory (defaults under the user config dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive loop (the default)
    Session {
        /// Open with a shadow-send token, as a shared link would
        #[arg(long)]
        shadow: Option<String>,

        /// Device position as "lat,lon"; omit to exercise the fallback
        #[arg(long)]
        at: Option<String>,
    },
    /// Show the profile: coins, streak, mood, readings
    Status,
    /// State your intent for the day
    Mood { mood: String },
    /// Hold the circle for one reading
    Ritual {
        /// How long to hold, in milliseconds
        #[arg(long, default_value_t = 2600)]
        hold_ms: u64,
    },
    /// The grimoire: past readings
    History {
        #[arg(long, default_value_t = 8)]
        limit: usize,
    },
    /// Enter the fuzzed map once
    Sanctuary {
        #[arg(long)]
        at: Option<String>,
    },
    /// Roast the bond between two names
    Bond {
        name1: Option<String>,
        name2: Option<String>,
    },
    /// Share the latest reading
    Share,
    /// Shadow sends: blurred, linkable readings
    Shadow {
        #[command(subcommand)]
        command: ShadowCommands,
    },
}

#[derive(Subcommand)]
pub enum ShadowCommands {
    /// Create a shadow link for the latest reading
    Create,
    /// Look up a shadow token
    Open { token: String },
}

pub fn parse_coordinate(raw: &str) -> Result<Coordinate> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("expected \"lat,lon\", got {:?}", raw))?;
    Ok(Coordinate {
        lat: lat.trim().parse()?,
        lon: lon.trim().parse()?,
    })
}

pub async fn handle_session(
    data_dir: Option<PathBuf>,
    shadow: Option<String>,
    at: Option<String>,
) -> Result<()> {
    let at = at.as_deref().map(parse_coordinate).transpose()?;
    session::handle_session(data_dir, shadow, at).await
}

pub async fn handle_status(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut store = ProfileStore::load(config, Utc::now().date_naive());
    store.check_in(Utc::now().date_naive());
    let profile = &store.profile;

    println!("{}", "Mystic Loop Status".cyan().bold());
    println!("{}", format!("deck v{}", content::CONTENT_VERSION).dimmed());
    let flames = "🔥".repeat((profile.streak_days as usize).min(10));
    println!("Streak: {} day(s) {}", profile.streak_days, flames);
    println!("Coins: {}", profile.coins);
    println!(
        "Mood: {}",
        profile
            .selected_mood
            .map(|m| content::mood(m).label)
            .unwrap_or("not stated")
    );
    println!("Readings: {}", profile.readings.len());
    Ok(())
}

pub async fn handle_mood(mood: String, data_dir: Option<PathBuf>) -> Result<()> {
    let mood = MoodId::parse(&mood).ok_or_else(|| {
        let known: Vec<&str> = MoodId::ALL.iter().map(|m| m.as_str()).collect();
        anyhow!("unknown mood {:?} (try: {})", mood, known.join(", "))
    })?;
    let config = Config::new(data_dir)?;
    let mut store = ProfileStore::load(config, Utc::now().date_naive());
    store.select_mood(mood);
    println!("✨ {}", content::mood(mood).description.green());
    Ok(())
}

/// One-shot ritual: hold for the given time, ticking on the real
/// clock. Anything under the nominal ~2.5s is an interruption.
pub async fn handle_ritual(hold_ms: u64, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut store = ProfileStore::load(config, Utc::now().date_naive());

    let mut timer = RitualTimer::new();
    timer.press();
    println!("{}", "PRESS & HOLD".white().bold());

    let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
    interval.tick().await;

    let mut completed = false;
    for _ in 0..(hold_ms / TICK_INTERVAL_MS) {
        interval.tick().await;
        match timer.tick() {
            TickOutcome::Advanced(p) => {
                print!("\r{:>3}% synchronized", p);
                let _ = std::io::stdout().flush();
            }
            TickOutcome::Completed => {
                println!("\r100% synchronized");
                completed = true;
                break;
            }
            TickOutcome::Idle => break,
        }
    }

    if !completed {
        timer.release();
        println!("\n{}", "The void noticed your hesitation. Nothing was drawn.".yellow());
        return Ok(());
    }

    let mut rng = StdRng::from_entropy();
    let reading = generate_reading(&mut rng, store.profile.selected_mood, Utc::now());
    let card = reading.card();

    println!();
    println!("{}", card.name.bold());
    println!("{}", card.archetype.to_uppercase().dimmed());
    println!("{}", reading.variant.label().purple());
    println!("\"{}\"", reading.interpretation());
    println!("{}", "+10 aether coins".green());

    store.record_reading(reading);
    Ok(())
}

pub async fn handle_history(limit: usize, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = ProfileStore::load(config, Utc::now().date_naive());

    let recent = store.recent_readings(limit);
    if recent.is_empty() {
        println!("{}", "No readings yet. Complete your first ritual.".yellow());
        return Ok(());
    }

    println!("{}", "Grimoire Collection".cyan().bold());
    for reading in recent {
        println!(
            "{}  {:<20} {:<16} {}",
            reading.created_at.format("%Y-%m-%d %H:%M"),
            reading.card,
            reading.variant.label(),
            reading.mood.as_str().dimmed()
        );
    }
    Ok(())
}

pub async fn handle_sanctuary(at: Option<String>, _data_dir: Option<PathBuf>) -> Result<()> {
    let provider = StaticLocation(match at.as_deref().map(parse_coordinate).transpose()? {
        Some(coordinate) => Ok(coordinate),
        None => Err(LocationError::Unsupported),
    });

    let mut rng = StdRng::from_entropy();
    match sanctuary::enter(&provider, &mut rng) {
        SanctuaryView::Located { position, pois } => {
            println!("{}", "Ghost Mode Active".green().bold());
            println!("Shown position: {:.4}, {:.4}", position.lat, position.lon);
            for poi in pois {
                println!(
                    "  📍 {} — {:.1}km ({:.4}, {:.4})",
                    poi.name, poi.distance_km, poi.coordinate.lat, poi.coordinate.lon
                );
            }
        }
        SanctuaryView::Fallback { position, error } => {
            println!("{} {}", "⚠".yellow(), error);
            println!("Fallback position: {:.4}, {:.4}", position.lat, position.lon);
        }
    }
    Ok(())
}

pub async fn handle_bond(
    name1: Option<String>,
    name2: Option<String>,
    _data_dir: Option<PathBuf>,
) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    let result = bond::roast_bond(
        &mut rng,
        name1.as_deref().unwrap_or(""),
        name2.as_deref().unwrap_or(""),
        Utc::now(),
    );

    println!(
        "{} ({})  vs  {} ({})",
        result.name1.bold(),
        result.archetype1.to_uppercase(),
        result.name2.bold(),
        result.archetype2.to_uppercase()
    );
    println!(
        "{}  {}",
        format!("{}% Compatible", result.compatibility).red().bold(),
        result.verdict()
    );
    println!("\"{}\"", result.roast);
    Ok(())
}

pub async fn handle_share(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = ProfileStore::load(config, Utc::now().date_naive());

    let Some(reading) = store.last_reading() else {
        println!("{}", "Nothing to share yet.".yellow());
        return Ok(());
    };

    let text = share::reading_share_text(reading);
    let mut sinks = share::default_sinks();
    match share::share_text(&mut sinks, &text) {
        Ok(_) => println!("✨ {}", "Reading shared to the void".green()),
        Err(_) => println!("{}", "The void refused. Nothing was shared.".red()),
    }
    Ok(())
}

pub async fn handle_shadow(command: ShadowCommands, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    match command {
        ShadowCommands::Create => {
            let store = ProfileStore::load(config.clone(), Utc::now().date_naive());
            let Some(reading) = store.last_reading() else {
                println!("{}", "No reading to send. Complete a ritual first.".yellow());
                return Ok(());
            };
            let mut shadows = ShadowStore::load(config);
            let token = shadows.create(reading, Utc::now())?;
            println!("{}", "SHAREABLE LINK".dimmed());
            println!("{}", shadow::shadow_url(&token).cyan());
        }
        ShadowCommands::Open { token } => {
            let shadows = ShadowStore::load(config);
            match shadows.lookup(&token) {
                Ok(blob) => {
                    let veil = if blob.blurred { " (blurred)" } else { "" };
                    println!(
                        "👻 {}",
                        format!("A shadow send awaits: {}{}", blob.card, veil).green()
                    );
                    println!("{}", blob.variant.label().dimmed());
                    println!("{}", "Full reading unlocks after app install.".dimmed());
                }
                Err(_) => println!("{}", "That shadow has dissipated.".yellow()),
            }
        }
    }
    Ok(())
}

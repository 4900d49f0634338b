use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bond::{self, BondRoastResult};
use crate::config::Config;
use crate::content::{self, MoodId, MOODS, PAYWALL_FEATURES, PAYWALL_PRICE_LINE, PAYWALL_TAGLINE};
use crate::navigation::{HapticCue, RitualEvent, View, ViewController};
use crate::profile::{CheckInOutcome, ProfileStore};
use crate::reading::{self, InterpretationVariant};
use crate::ritual::TICK_INTERVAL_MS;
use crate::sanctuary::{
    self, Coordinate, LocationError, RequestGuard, SanctuaryView, StaticLocation,
};
use crate::shadow::{self, ShadowStore};
use crate::share;

/// Nominal hold for a full ritual, plus a little slack.
const DEFAULT_HOLD_MS: u64 = 2600;

pub async fn handle_session(
    data_dir: Option<PathBuf>,
    shadow_param: Option<String>,
    at: Option<Coordinate>,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut session = Session::new(config, at);
    session.boot(shadow_param);
    session.run().await
}

/// The whole app: one profile, one shadow store, one view controller,
/// driven by lines from stdin the way a finger would drive the real
/// thing.
pub struct Session {
    store: ProfileStore,
    shadows: ShadowStore,
    nav: ViewController,
    rng: StdRng,
    location: Option<Coordinate>,
    location_guard: RequestGuard,
    sanctuary: Option<SanctuaryView>,
    last_bond: Option<BondRoastResult>,
}

impl Session {
    pub fn new(config: Config, location: Option<Coordinate>) -> Self {
        let today = Utc::now().date_naive();
        let store = ProfileStore::load(config.clone(), today);
        let shadows = ShadowStore::load(config);

        Session {
            store,
            shadows,
            nav: ViewController::new(),
            rng: StdRng::from_entropy(),
            location,
            location_guard: RequestGuard::default(),
            sanctuary: None,
            last_bond: None,
        }
    }

    /// Daily check-in, shadow-link lookup, then leave the loading
    /// screen.
    pub fn boot(&mut self, shadow_param: Option<String>) {
        println!("{}", "SUMMONING DAEMON...".dimmed());

        match self.store.check_in(Utc::now().date_naive()) {
            CheckInOutcome::Continued { streak_days } => {
                self.nav.notify(
                    &format!("🔥 Streak continued: day {}", streak_days),
                    None,
                );
            }
            CheckInOutcome::Reset => {
                self.nav
                    .notify("The flame went out. Streak reset to 1.", None);
            }
            CheckInOutcome::Unchanged => {}
        }

        // A shadow link only earns a toast; the full blurred-preview
        // screen is an unbuilt feature, on purpose.
        if let Some(token) = shadow_param {
            match self.shadows.lookup(&token) {
                Ok(blob) => self.nav.notify(
                    &format!("👻 A shadow send awaits: {} (blurred)", blob.card),
                    None,
                ),
                Err(_) => self.nav.notify("That shadow has dissipated.", None),
            }
        }

        self.nav.boot(
            self.store.profile.onboarded,
            self.store.profile.selected_mood,
        );
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.drain_notifications();
            self.render();

            print!("{}", "loop> ".purple().bold());
            io::stdout().flush()?;

            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => {
                    println!("\n{}", "The loop releases you.".cyan());
                    break;
                }
                Ok(_) => {
                    let input = input.trim().to_string();
                    if input == "exit" || input == "quit" {
                        println!("{}", "The loop releases you.".cyan());
                        break;
                    }
                    self.dispatch(&input).await;
                }
                Err(e) => {
                    println!("{}: {}", "Input error".red().bold(), e);
                    break;
                }
            }
        }
        Ok(())
    }

    fn drain_notifications(&mut self) {
        for toast in self.nav.take_notifications() {
            let line = format!("✨ {}", toast.message);
            println!("{}", line.green());
            if let Some(cue) = toast.haptic {
                println!("{}", format!("   ~ buzz {:?}", cue.pattern()).dimmed());
            }
        }
    }

    fn render(&mut self) {
        if self.nav.paywall_open() {
            render_paywall();
            return;
        }
        match self.nav.view() {
            View::Loading => {}
            View::Welcome => render_welcome(),
            View::MoodSelect => render_mood_select(),
            View::Dashboard => self.render_dashboard(),
            View::Ritual => render_ritual(self.nav.ritual_progress()),
            View::Result => self.render_result(),
            View::Altar => self.render_altar(),
            View::Sanctuary => self.render_sanctuary(),
            View::BondRoast => self.render_bond(),
            View::ShadowSend => {}
        }
    }

    async fn dispatch(&mut self, input: &str) {
        if self.nav.paywall_open() {
            // Any input closes the overlay, same as a backdrop tap.
            self.nav.close_paywall();
            return;
        }
        if input == "esc" {
            self.nav.escape();
            return;
        }

        match self.nav.view() {
            View::Welcome => {
                self.store.mark_onboarded();
                self.nav.dismiss_welcome(self.store.profile.selected_mood);
            }
            View::MoodSelect => self.choose_mood(input),
            View::Dashboard => self.dispatch_dashboard(input).await,
            View::Ritual => self.dispatch_ritual(input).await,
            View::Result => self.dispatch_result(input),
            View::Altar => match input {
                "back" | "" => self.nav.go_back(),
                "unlock" => {
                    self.nav.open_paywall();
                }
                _ => print_hint("back, unlock"),
            },
            View::Sanctuary => self.dispatch_sanctuary(input),
            View::BondRoast => self.dispatch_bond(input),
            View::ShadowSend => self.nav.go_back(),
            View::Loading => {}
        }
    }

    fn choose_mood(&mut self, input: &str) {
        let mood = input
            .parse::<usize>()
            .ok()
            .and_then(|n| MOODS.get(n.wrapping_sub(1)))
            .map(|m| m.id)
            .or_else(|| MoodId::parse(input));

        match mood {
            Some(mood) => {
                self.store.select_mood(mood);
                self.nav.mood_selected(mood);
            }
            None => print_hint("a number 1-6 or a mood name"),
        }
    }

    async fn dispatch_dashboard(&mut self, input: &str) {
        match input {
            "ritual" | "r" => {
                if self.nav.start_ritual() {
                    self.run_hold(DEFAULT_HOLD_MS).await;
                }
            }
            "altar" | "a" => self.nav.open_altar(),
            "sanctuary" | "s" => {
                self.nav.open_sanctuary();
                self.refresh_sanctuary();
            }
            "bond" | "b" => self.nav.open_bond_roast(),
            "unlock" | "sos" => {
                self.nav.open_paywall();
            }
            "mood" => {
                // Re-state intent straight from the dashboard.
                render_mood_select();
                let choice = prompt_line("mood: ");
                self.choose_mood(&choice);
            }
            "" => {}
            _ => print_hint("ritual, altar, sanctuary, bond, unlock, esc, exit"),
        }
    }

    async fn dispatch_ritual(&mut self, input: &str) {
        match input {
            "back" => self.nav.go_back(),
            "" | "hold" => self.run_hold(DEFAULT_HOLD_MS).await,
            other => {
                if let Some(ms) = other
                    .strip_prefix("hold ")
                    .and_then(|s| s.parse::<u64>().ok())
                {
                    self.run_hold(ms).await;
                } else {
                    print_hint("hold [ms], back");
                }
            }
        }
    }

    /// Drive the press for `hold_ms` of real time, ticking every 50ms.
    /// Completing generates the reading; letting go early forfeits it.
    async fn run_hold(&mut self, hold_ms: u64) {
        self.nav.ritual_press();
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
        interval.tick().await; // First tick is immediate; skip it.

        let ticks = hold_ms / TICK_INTERVAL_MS;
        for _ in 0..ticks {
            interval.tick().await;
            match self.nav.ritual_tick() {
                RitualEvent::Progress(p) => {
                    print!("\r{}", progress_bar(p));
                    let _ = io::stdout().flush();
                }
                RitualEvent::Completed => {
                    println!("\r{}", progress_bar(100));
                    self.complete_ritual();
                    return;
                }
                RitualEvent::Idle | RitualEvent::Interrupted => break,
            }
        }
        println!();
        self.nav.ritual_release();
    }

    fn complete_ritual(&mut self) {
        let reading = reading::generate_reading(
            &mut self.rng,
            self.store.profile.selected_mood,
            Utc::now(),
        );
        self.store.record_reading(reading);
        self.nav
            .notify("+10 aether coins. The algorithm is pleased.", None);
    }

    fn dispatch_result(&mut self, input: &str) {
        match input {
            "share" => self.share_last_reading(),
            "shadow" => {
                self.nav.open_shadow_send();
                self.create_shadow_send();
            }
            "back" | "" => self.nav.go_back(),
            _ => print_hint("share, shadow, back"),
        }
    }

    fn share_last_reading(&mut self) {
        let Some(reading) = self.store.last_reading() else {
            return;
        };
        let text = share::reading_share_text(reading);
        let mut sinks = share::default_sinks();
        match share::share_text(&mut sinks, &text) {
            Ok(_) => self.nav.notify("Reading shared to the void", Some(HapticCue::Light)),
            Err(_) => self
                .nav
                .notify("The void refused. Nothing was shared.", Some(HapticCue::Error)),
        }
    }

    fn create_shadow_send(&mut self) {
        let Some(reading) = self.store.last_reading() else {
            return;
        };
        match self.shadows.create(reading, Utc::now()) {
            Ok(token) => {
                let url = shadow::shadow_url(&token);
                println!("{}", "SHAREABLE LINK".dimmed());
                println!("  {}", url.cyan());
                println!(
                    "{}",
                    "The recipient sees a blurred preview. Full reading unlocks after app install."
                        .dimmed()
                );
                self.nav
                    .notify("Link forged. Send the karmic ping.", Some(HapticCue::Medium));
            }
            Err(e) => {
                eprintln!("Failed to store shadow send: {}", e);
                self.nav.notify("The shadow slipped away. Try again.", None);
            }
        }
    }

    fn dispatch_sanctuary(&mut self, input: &str) {
        match input {
            "refresh" | "retry" => self.refresh_sanctuary(),
            "back" | "" => {
                self.sanctuary = None;
                self.nav.go_back();
            }
            _ => print_hint("refresh, retry, back"),
        }
    }

    /// One-shot position request. The token check drops completions
    /// that land after the user has already left the map.
    fn refresh_sanctuary(&mut self) {
        let token = self.location_guard.issue();
        let provider = StaticLocation(
            self.location
                .map(Ok)
                .unwrap_or(Err(LocationError::Unsupported)),
        );
        let view = sanctuary::enter(&provider, &mut self.rng);
        if self.nav.view() == View::Sanctuary && self.location_guard.is_current(token) {
            self.sanctuary = Some(view);
        }
    }

    fn dispatch_bond(&mut self, input: &str) {
        match input {
            "back" => {
                self.last_bond = None;
                self.nav.go_back();
            }
            "new" => self.last_bond = None,
            "share" => {
                if let Some(result) = &self.last_bond {
                    let text = share::bond_share_text(result);
                    let mut sinks = share::default_sinks();
                    match share::share_text(&mut sinks, &text) {
                        Ok(_) => self
                            .nav
                            .notify("Copied. Share the chaos.", Some(HapticCue::Light)),
                        Err(_) => self.nav.notify("Failed to copy", Some(HapticCue::Error)),
                    }
                }
            }
            "" | "roast" => {
                let name1 = prompt_line("First Person (or \"You\"): ");
                let name2 = prompt_line("Second Person (or \"Them\"): ");
                let result = bond::roast_bond(&mut self.rng, &name1, &name2, Utc::now());
                self.last_bond = Some(result);
                self.nav
                    .notify("Bond roasted. Share the chaos.", Some(HapticCue::Success));
            }
            _ => print_hint("roast, share, new, back"),
        }
    }

    fn render_dashboard(&self) {
        let profile = &self.store.profile;
        println!();
        println!("{}", "The Loop".cyan().bold());
        println!(
            "{}",
            format!("{} • WAXING GIBBOUS", Utc::now().format("%Y-%m-%d")).dimmed()
        );
        println!(
            "🔥 streak {}   🪙 {} coins   mood: {}",
            profile.streak_days,
            profile.coins,
            profile
                .selected_mood
                .map(|m| content::mood(m).label)
                .unwrap_or("none")
        );
        println!();
        println!("  {}  press to synchronize with the void", "[ritual]".purple());
        println!("  {}  candles, coins and the grimoire", "[altar]".yellow());
        println!("  {}  the fuzzed map", "[sanctuary]".green());
        println!("  {}  two names enter, one roast leaves", "[bond]".red());
        println!("  {}  the locked tier", "[unlock]".dimmed());
    }

    fn render_result(&self) {
        let Some(reading) = self.store.last_reading() else {
            return;
        };
        let card = reading.card();
        let [g1, g2, g3] = reading.aura.gradients();

        println!();
        println!("{}", card.name.bold().white());
        println!("{}", card.archetype.to_uppercase().dimmed());
        println!(
            "{}",
            format!(
                "aura {} / {} / {} @ {:.0}% rot {:.0}°",
                g1, g2, g3, reading.aura.position, reading.aura.rotation
            )
            .dimmed()
        );
        let tag = match reading.variant {
            InterpretationVariant::Roast => reading.variant.label().red(),
            InterpretationVariant::Mystic => reading.variant.label().purple(),
        };
        println!("{}", tag);
        println!("\"{}\"", reading.interpretation());
        println!();
        println!("{}", "share | shadow | back".dimmed());
    }

    fn render_altar(&self) {
        let profile = &self.store.profile;
        println!();
        println!("{}", "Your Altar".cyan().bold());
        println!(
            "{}",
            "Keep the flame alive to invite stronger energies.".dimmed()
        );

        let candles = (profile.streak_days as usize).min(5);
        println!("{}", "🕯".repeat(candles.max(1)));
        if profile.streak_days > 5 {
            println!("{}", format!("+ {} more", profile.streak_days - 5).dimmed());
        }
        println!("day streak: {}   aether coins: {}", profile.streak_days, profile.coins);

        println!("{}", "Grimoire Collection".bold());
        let recent = self.store.recent_readings(8);
        if recent.is_empty() {
            println!("{}", "No readings yet. Complete your first ritual.".dimmed());
        } else {
            for reading in recent {
                println!(
                    "  {} {} ({})",
                    reading.created_at.format("%m-%d"),
                    reading.card,
                    reading.mood.as_str()
                );
            }
        }
        println!("{}", "back | unlock".dimmed());
    }

    fn render_sanctuary(&self) {
        println!();
        println!("{}", "Sanctuary".green().bold());
        match &self.sanctuary {
            Some(SanctuaryView::Located { position, pois }) => {
                println!(
                    "🛡  Ghost Mode active. Shown position: {:.4}, {:.4}",
                    position.lat, position.lon
                );
                println!(
                    "{}",
                    "Your exact location is fuzzed by 400m. Only verified covens can see your true signal."
                        .dimmed()
                );
                for poi in pois {
                    println!(
                        "  📍 {} — {:.1}km ({:.4}, {:.4})",
                        poi.name, poi.distance_km, poi.coordinate.lat, poi.coordinate.lon
                    );
                }
            }
            Some(SanctuaryView::Fallback { position, error }) => {
                println!("{} {}", "⚠".yellow(), error);
                println!(
                    "Showing the vortex instead: {:.4}, {:.4}",
                    position.lat, position.lon
                );
                println!("{}", "retry to ask again".dimmed());
            }
            None => {}
        }
        println!("{}", "refresh | retry | back".dimmed());
    }

    fn render_bond(&self) {
        println!();
        println!("{}", "Bond Roast".red().bold());
        match &self.last_bond {
            None => {
                println!(
                    "{}",
                    "Get brutally honest relationship compatibility readings.".dimmed()
                );
                println!("{}", "roast to begin | back".dimmed());
            }
            Some(result) => {
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
                println!("{}", "share | new | back".dimmed());
            }
        }
    }
}

fn render_welcome() {
    println!();
    println!("{}", "Mystic Loop".purple().bold());
    println!("{}", "The Algorithmic Coven".dimmed());
    println!("Modern Mischief. Sacred Systems. Viral Magic.");
    println!("{}", "press enter to state your intent".dimmed());
}

fn render_mood_select() {
    println!();
    println!("{}", "State Your Intent".cyan().bold());
    println!("{}", "THE ALGORITHM IS LISTENING".dimmed());
    for (i, mood) in MOODS.iter().enumerate() {
        println!("  {}. {} — {}", i + 1, mood.label.bold(), mood.description.dimmed());
    }
}

fn render_ritual(progress: u8) {
    println!();
    println!("{}", "PRESS & HOLD".white().bold());
    println!("{}", progress_bar(progress));
    println!("{}", "hold [ms] | back".dimmed());
}

fn render_paywall() {
    println!();
    println!("{}", "Unlock The Void".purple().bold());
    for feature in PAYWALL_FEATURES {
        println!("  ✦ {}", feature);
    }
    println!("{}", PAYWALL_PRICE_LINE.bold());
    println!("{}", PAYWALL_TAGLINE.dimmed());
    println!("{}", "(any key closes)".dimmed());
}

fn progress_bar(progress: u8) -> String {
    let filled = (progress as usize) / 5;
    format!(
        "[{}{}] {:>3}% synchronized",
        "█".repeat(filled),
        "░".repeat(20 - filled),
        progress
    )
}

fn print_hint(options: &str) {
    println!("{}", format!("try: {}", options).dimmed());
}

fn prompt_line(prompt: &str) -> String {
    print!("{}", prompt.dimmed());
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
    line.trim().to_string()
}

use crate::content::{self, MoodId};
use crate::ritual::{ReleaseOutcome, RitualTimer, TickOutcome};

/// Every screen the loop can show. Ephemeral, reset on every launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Welcome,
    MoodSelect,
    Dashboard,
    Ritual,
    Result,
    Altar,
    Sanctuary,
    BondRoast,
    ShadowSend,
}

/// Named vibration patterns, carried as data. A phone frontend would
/// feed these to the vibration API; the terminal renders them as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticCue {
    Light,
    Medium,
    Success,
    Error,
}

impl HapticCue {
    pub fn pattern(&self) -> &'static [u32] {
        match self {
            HapticCue::Light => &[10],
            HapticCue::Medium => &[20],
            HapticCue::Success => &[10, 50, 10],
            HapticCue::Error => &[20, 50, 20, 50, 20],
        }
    }
}

/// A transient toast. Queued by the controller, drained by whatever is
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub haptic: Option<HapticCue>,
}

/// What a ritual tick did, as seen from the navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RitualEvent {
    Idle,
    Progress(u8),
    /// The hold reached 100; the view has moved to `Result` and the
    /// caller should now generate the reading.
    Completed,
    Interrupted,
}

/// Owns the current view, the paywall overlay and the ritual timer.
/// Views never mutate this directly; everything goes through intents.
#[derive(Debug)]
pub struct ViewController {
    view: View,
    paywall_open: bool,
    in_transition: bool,
    timer: RitualTimer,
    notifications: Vec<Notification>,
}

impl ViewController {
    pub fn new() -> Self {
        ViewController {
            view: View::Loading,
            paywall_open: false,
            in_transition: false,
            timer: RitualTimer::new(),
            notifications: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn paywall_open(&self) -> bool {
        self.paywall_open
    }

    pub fn ritual_progress(&self) -> u8 {
        self.timer.progress()
    }

    /// Leave the loading screen: first run goes to the welcome screen,
    /// a mood-less profile to mood selection, everything else straight
    /// to the dashboard.
    pub fn boot(&mut self, onboarded: bool, mood: Option<MoodId>) {
        debug_assert_eq!(self.view, View::Loading);
        self.view = if !onboarded {
            View::Welcome
        } else if mood.is_none() {
            View::MoodSelect
        } else {
            View::Dashboard
        };
    }

    pub fn dismiss_welcome(&mut self, mood: Option<MoodId>) {
        if self.view != View::Welcome {
            return;
        }
        self.view = if mood.is_none() {
            View::MoodSelect
        } else {
            View::Dashboard
        };
    }

    /// Mood chosen; the caller persists it, we move on and toast the
    /// mood's description.
    pub fn mood_selected(&mut self, mood: MoodId) {
        if self.view != View::MoodSelect && self.view != View::Dashboard {
            return;
        }
        self.view = View::Dashboard;
        let description = content::mood(mood).description;
        self.notify(description, Some(HapticCue::Light));
    }

    /// Start the ritual. Ignored while another transition is in
    /// flight; this is a re-entrancy guard, not a lock.
    pub fn start_ritual(&mut self) -> bool {
        if self.view != View::Dashboard || self.in_transition {
            return false;
        }
        self.in_transition = true;
        self.view = View::Ritual;
        self.in_transition = false;
        true
    }

    pub fn ritual_press(&mut self) {
        if self.view == View::Ritual {
            self.timer.press();
        }
    }

    /// Advance the hold by one tick. Completion moves to the result
    /// view; the timer itself guarantees it fires once.
    pub fn ritual_tick(&mut self) -> RitualEvent {
        if self.view != View::Ritual {
            return RitualEvent::Idle;
        }
        match self.timer.tick() {
            TickOutcome::Idle => RitualEvent::Idle,
            TickOutcome::Advanced(p) => RitualEvent::Progress(p),
            TickOutcome::Completed => {
                self.view = View::Result;
                self.notify("Pattern synchronized.", Some(HapticCue::Success));
                RitualEvent::Completed
            }
        }
    }

    pub fn ritual_release(&mut self) -> RitualEvent {
        if self.view != View::Ritual {
            return RitualEvent::Idle;
        }
        match self.timer.release() {
            ReleaseOutcome::Idle => RitualEvent::Idle,
            ReleaseOutcome::Interrupted => {
                self.notify("The void noticed your hesitation.", Some(HapticCue::Error));
                RitualEvent::Interrupted
            }
        }
    }

    pub fn open_altar(&mut self) {
        if self.view == View::Dashboard {
            self.view = View::Altar;
        }
    }

    pub fn open_sanctuary(&mut self) {
        if self.view == View::Dashboard {
            self.view = View::Sanctuary;
        }
    }

    pub fn open_bond_roast(&mut self) {
        if self.view == View::Dashboard {
            self.view = View::BondRoast;
        }
    }

    pub fn open_shadow_send(&mut self) {
        if self.view == View::Result {
            self.view = View::ShadowSend;
        }
    }

    /// Explicit back action or swipe-back. Leaf views return to the
    /// dashboard; a mid-ritual back abandons the hold.
    pub fn go_back(&mut self) {
        match self.view {
            View::Result
            | View::Altar
            | View::Sanctuary
            | View::BondRoast
            | View::ShadowSend => {
                self.view = View::Dashboard;
            }
            View::Ritual => {
                self.timer.release();
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    /// Escape closes the paywall overlay first; only when no overlay
    /// is up does it act as back.
    pub fn escape(&mut self) {
        if self.paywall_open {
            self.paywall_open = false;
        } else {
            self.go_back();
        }
    }

    /// The overlay is orthogonal to the view enum and only opens over
    /// the main surfaces.
    pub fn open_paywall(&mut self) -> bool {
        if matches!(self.view, View::Dashboard | View::Altar | View::Sanctuary) {
            self.paywall_open = true;
            true
        } else {
            false
        }
    }

    pub fn close_paywall(&mut self) {
        self.paywall_open = false;
    }

    pub fn notify(&mut self, message: &str, haptic: Option<HapticCue>) {
        self.notifications.push(Notification {
            message: message.to_string(),
            haptic,
        });
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booted() -> ViewController {
        let mut nav = ViewController::new();
        nav.boot(true, Some(MoodId::Chaos));
        nav
    }

    #[test]
    fn test_boot_routes_by_profile_state() {
        let mut nav = ViewController::new();
        nav.boot(false, None);
        assert_eq!(nav.view(), View::Welcome);

        let mut nav = ViewController::new();
        nav.boot(true, None);
        assert_eq!(nav.view(), View::MoodSelect);

        let mut nav = ViewController::new();
        nav.boot(true, Some(MoodId::Void));
        assert_eq!(nav.view(), View::Dashboard);
    }

    #[test]
    fn test_welcome_dismissal_respects_stored_mood() {
        let mut nav = ViewController::new();
        nav.boot(false, Some(MoodId::Divine));
        nav.dismiss_welcome(Some(MoodId::Divine));
        assert_eq!(nav.view(), View::Dashboard);

        let mut nav = ViewController::new();
        nav.boot(false, None);
        nav.dismiss_welcome(None);
        assert_eq!(nav.view(), View::MoodSelect);
    }

    #[test]
    fn test_mood_selection_lands_on_dashboard_with_toast() {
        let mut nav = ViewController::new();
        nav.boot(true, None);
        nav.mood_selected(MoodId::Chaos);
        assert_eq!(nav.view(), View::Dashboard);
        let toasts = nav.take_notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "You're manifesting chaos. We support that.");
    }

    #[test]
    fn test_full_ritual_flow_reaches_result() {
        let mut nav = booted();
        assert!(nav.start_ritual());
        nav.ritual_press();
        let mut event = RitualEvent::Idle;
        for _ in 0..50 {
            event = nav.ritual_tick();
        }
        assert_eq!(event, RitualEvent::Completed);
        assert_eq!(nav.view(), View::Result);
    }

    #[test]
    fn test_start_ritual_ignored_off_dashboard() {
        let mut nav = booted();
        nav.open_altar();
        assert!(!nav.start_ritual());
        assert_eq!(nav.view(), View::Altar);
    }

    #[test]
    fn test_early_release_interrupts_and_stays_in_ritual() {
        let mut nav = booted();
        nav.start_ritual();
        nav.ritual_press();
        nav.ritual_tick();
        assert_eq!(nav.ritual_release(), RitualEvent::Interrupted);
        assert_eq!(nav.view(), View::Ritual);
        assert_eq!(nav.ritual_progress(), 0);
    }

    #[test]
    fn test_back_returns_leaf_views_to_dashboard() {
        for open in [
            ViewController::open_altar,
            ViewController::open_sanctuary,
            ViewController::open_bond_roast,
        ] {
            let mut nav = booted();
            open(&mut nav);
            assert_ne!(nav.view(), View::Dashboard);
            nav.go_back();
            assert_eq!(nav.view(), View::Dashboard);
        }
    }

    #[test]
    fn test_shadow_send_only_opens_from_result() {
        let mut nav = booted();
        nav.open_shadow_send();
        assert_eq!(nav.view(), View::Dashboard);

        nav.start_ritual();
        nav.ritual_press();
        while nav.ritual_tick() != RitualEvent::Completed {}
        nav.open_shadow_send();
        assert_eq!(nav.view(), View::ShadowSend);
    }

    #[test]
    fn test_paywall_is_orthogonal_overlay() {
        let mut nav = booted();
        assert!(nav.open_paywall());
        assert_eq!(nav.view(), View::Dashboard);
        assert!(nav.paywall_open());

        // Escape closes the overlay, not the view.
        nav.escape();
        assert!(!nav.paywall_open());
        assert_eq!(nav.view(), View::Dashboard);
    }

    #[test]
    fn test_paywall_refused_outside_main_surfaces() {
        let mut nav = booted();
        nav.start_ritual();
        assert!(!nav.open_paywall());
    }

    #[test]
    fn test_escape_acts_as_back_without_overlay() {
        let mut nav = booted();
        nav.open_sanctuary();
        nav.escape();
        assert_eq!(nav.view(), View::Dashboard);
    }

    #[test]
    fn test_haptic_patterns() {
        assert_eq!(HapticCue::Success.pattern(), &[10, 50, 10]);
        assert_eq!(HapticCue::Error.pattern(), &[20, 50, 20, 50, 20]);
    }
}

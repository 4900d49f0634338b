use colored::*;

use crate::bond::BondRoastResult;
use crate::reading::Reading;

/// Shareable summary of a reading. Same copy the app has always put on
/// the clipboard.
pub fn reading_share_text(reading: &Reading) -> String {
    format!(
        "🔮 {} - {}\n\nFrom Mystic Loop: The Algorithmic Coven",
        reading.card().name,
        reading.interpretation()
    )
}

pub fn bond_share_text(result: &BondRoastResult) -> String {
    format!(
        "🔮 Bond Roast: {} ({}) vs {} ({})\n{}% Compatible\n\n\"{}\"\n\n— Mystic Loop: Modern Mischief. Sacred Systems. Viral Magic.",
        result.name1, result.archetype1, result.name2, result.archetype2,
        result.compatibility, result.roast
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Went out through the OS share sheet.
    Shared,
    /// Landed on the clipboard.
    Copied,
    /// Printed for manual copying.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// This sink does not exist in the current environment.
    Unavailable,
    /// The user backed out. Not an error for the chain.
    Cancelled,
    Failed(String),
}

/// One way of getting text out of the app. Sinks are tried in order
/// and every failure mode falls through to the next one.
pub trait ShareSink {
    fn name(&self) -> &'static str;
    fn deliver(&mut self, text: &str) -> Result<ShareOutcome, ShareError>;
}

/// Walk the chain. Cancellation and unavailability fall through
/// silently; only a fully exhausted chain is an error, so every path
/// converges on a single notification at the caller.
pub fn share_text(
    sinks: &mut [Box<dyn ShareSink>],
    text: &str,
) -> Result<ShareOutcome, ShareError> {
    let mut last_error = ShareError::Unavailable;
    for sink in sinks.iter_mut() {
        match sink.deliver(text) {
            Ok(outcome) => return Ok(outcome),
            Err(e) => {
                if let ShareError::Failed(reason) = &e {
                    eprintln!("{} failed: {}", sink.name(), reason);
                }
                last_error = e;
            }
        }
    }
    Err(last_error)
}

/// The default chain: share sheet, clipboard, manual copy.
pub fn default_sinks() -> Vec<Box<dyn ShareSink>> {
    vec![
        Box::new(NativeShare),
        Box::new(ClipboardSink),
        Box::new(ManualCopySink),
    ]
}

/// There is no OS share sheet to summon from a terminal, so this sink
/// always reports itself unavailable and the chain moves on.
pub struct NativeShare;

impl ShareSink for NativeShare {
    fn name(&self) -> &'static str {
        "share sheet"
    }

    fn deliver(&mut self, _text: &str) -> Result<ShareOutcome, ShareError> {
        Err(ShareError::Unavailable)
    }
}

pub struct ClipboardSink;

impl ShareSink for ClipboardSink {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn deliver(&mut self, text: &str) -> Result<ShareOutcome, ShareError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShareError::Failed(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ShareError::Failed(e.to_string()))?;
        Ok(ShareOutcome::Copied)
    }
}

/// Last resort: print the text so it can be selected by hand.
pub struct ManualCopySink;

impl ShareSink for ManualCopySink {
    fn name(&self) -> &'static str {
        "manual copy"
    }

    fn deliver(&mut self, text: &str) -> Result<ShareOutcome, ShareError> {
        println!("{}", "----8<----".dimmed());
        println!("{}", text);
        println!("{}", "----8<----".dimmed());
        Ok(ShareOutcome::Manual)
    }
}

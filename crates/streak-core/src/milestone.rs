use serde::Serialize;

/// Progress thresholds, in the order they are checked. The list is closed:
/// no other value is ever stored as a reached milestone.
pub const THRESHOLDS: [u32; 4] = [7, 14, 21, 30];

// ---------------------------------------------------------------------------
// Celebration payloads
// ---------------------------------------------------------------------------

/// What gets shown when a threshold is crossed for the first time in a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Celebration {
    pub threshold: u32,
    pub title: &'static str,
    pub message: &'static str,
    pub media_url: &'static str,
}

static CELEBRATIONS: [Celebration; 4] = [
    Celebration {
        threshold: 7,
        title: "🎉 ONE WEEK STREAK! 🎉",
        message: "Amazing! You've completed one full week of cleaning. Keep it up!",
        media_url: "https://media.giphy.com/media/g9582DNuQppxC/giphy.gif",
    },
    Celebration {
        threshold: 14,
        title: "🔥 TWO WEEKS! HALFWAY THERE! 🔥",
        message: "Incredible! You're halfway to your goal. The reward is in sight!",
        media_url: "https://media.giphy.com/media/artj92V8o75VPL7AeQ/giphy.gif",
    },
    Celebration {
        threshold: 21,
        title: "⭐ THREE WEEKS! SO CLOSE! ⭐",
        message: "Outstanding! Just 9 more days until you earn your treat!",
        media_url: "https://media.giphy.com/media/26u4cqiYI30juCOGY/giphy.gif",
    },
    Celebration {
        threshold: 30,
        title: "🏆 30 DAYS COMPLETE! YOU DID IT! 🏆",
        message: "🎊 CONGRATULATIONS! You've earned your treat! Time to celebrate together! 🎊",
        media_url: "https://media.giphy.com/media/3oz8xAFtqoOUUrsh7W/giphy.gif",
    },
];

pub fn celebration(threshold: u32) -> Option<&'static Celebration> {
    CELEBRATIONS.iter().find(|c| c.threshold == threshold)
}

// ---------------------------------------------------------------------------
// Crossing detection
// ---------------------------------------------------------------------------

/// The smallest threshold reached by `total_completed` that is above
/// `last_milestone`, if any. At most one threshold is reported per call.
pub fn next_crossed(total_completed: usize, last_milestone: u32) -> Option<u32> {
    THRESHOLDS
        .iter()
        .copied()
        .find(|&t| total_completed >= t as usize && t > last_milestone)
}

/// True for 0 (nothing announced yet) and for every entry of [`THRESHOLDS`].
pub fn is_known(value: u32) -> bool {
    value == 0 || THRESHOLDS.contains(&value)
}

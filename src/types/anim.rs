//! Animation table model: named frame ranges joined with per-frame details.

/// Per-frame detail record from the flat detail table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDetail {
    /// Source sprite filename this frame is drawn from.
    pub source: String,
    /// Frame number within the source sprite.
    pub frame: u16,
    /// Whether this frame belongs to the primary layer.
    pub primary: bool,
    /// Whether the frame is drawn mirrored.
    pub mirrored: bool,
    /// Trailing record bytes with unknown semantics, kept verbatim.
    pub reserved: Vec<u8>,
}

/// A named animation owning the detail records for its frame range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    /// Canonical animation name.
    pub name: String,
    /// First frame index into the detail table.
    pub start: u16,
    /// Last frame index, inclusive.
    pub end: u16,
    /// Detail records sliced from the flat table, clamped to its length.
    pub frames: Vec<FrameDetail>,
}

impl Animation {
    /// Declared frame count (end − start + 1), independent of clamping.
    pub fn declared_len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize + 1
    }
}

/// A decoded animation table.
#[derive(Debug, Clone, Default)]
pub struct AnimTable {
    pub animations: Vec<Animation>,
}

impl AnimTable {
    /// Find an animation by canonical name.
    pub fn get(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }
}

/// Map a raw animation name onto the closed set of canonical names.
///
/// Matching is case-insensitive and trims surrounding whitespace. Names with
/// no known synonym pass through lower-cased.
pub fn canonical_name(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "idle" | "stand" | "standing" | "wait" | "guard" => "idle",
        "walk" | "walking" | "move" | "run" => "walk",
        "attack" | "fire" | "shoot" | "fight" => "attack",
        "die" | "death" | "dead" | "destroyed" => "die",
        "harvest" | "gather" | "collect" | "load" => "harvest",
        _ => return lower,
    };
    canonical.to_string()
}

/// Whether a canonical animation name belongs to the movement class.
///
/// Movement-class sequences carry a directional facing count in the
/// exported descriptor.
pub fn is_movement_class(name: &str) -> bool {
    name == "walk"
}

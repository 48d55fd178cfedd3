//! Gem colors, glyphs, and rarity colors for card rendering.
//!
//! Colors are exposed as hex strings for whatever surface draws them; the
//! text UI only uses the glyphs and names.

use serde::Serialize;

use crate::net::types::Rarity;

pub const FALLBACK_GEM_HEX: &str = "#999999";
pub const FALLBACK_RARITY_HEX: &str = "#888888";
pub const COLORED_GEM_ICON: char = '◆';
pub const COLORLESS_GEM_ICON: char = '◇';

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GemColorInfo {
    pub name: String,
    pub hex_color: &'static str,
    pub icon: char,
    pub description: String,
}

const GEMS: [(&str, &str, char, &str); 7] = [
    ("Ruby", "#DC143C", COLORED_GEM_ICON, "Red"),
    ("Sapphire", "#0047AB", COLORED_GEM_ICON, "Blue"),
    ("Emerald", "#50C878", COLORED_GEM_ICON, "Green"),
    ("Topaz", "#FFD700", COLORED_GEM_ICON, "Yellow"),
    ("Amethyst", "#9966CC", COLORED_GEM_ICON, "Purple"),
    ("Diamond", "#E8E8E8", COLORLESS_GEM_ICON, "Colorless"),
    ("Obsidian", "#1A1A1A", COLORED_GEM_ICON, "Black"),
];

/// Gem info for a card color; unknown colors get a grey fallback.
#[must_use]
pub fn gem_color_info(color: &str) -> GemColorInfo {
    match GEMS.iter().find(|(name, ..)| *name == color) {
        Some(&(name, hex_color, icon, mana)) => GemColorInfo {
            name: name.to_string(),
            hex_color,
            icon,
            description: format!("{name} gem - {mana} mana"),
        },
        None => GemColorInfo {
            name: color.to_string(),
            hex_color: FALLBACK_GEM_HEX,
            icon: COLORED_GEM_ICON,
            description: format!("{color} gem"),
        },
    }
}

/// Black or white, whichever reads better on `hex_color` (`#RRGGBB`).
#[must_use]
pub fn contrasting_text_color(hex_color: &str) -> &'static str {
    let rgb = u32::from_str_radix(hex_color.trim_start_matches('#'), 16).unwrap_or(0);
    let r = f64::from((rgb >> 16) & 0xFF);
    let g = f64::from((rgb >> 8) & 0xFF);
    let b = f64::from(rgb & 0xFF);
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance > 0.5 { "#000000" } else { "#FFFFFF" }
}

/// Gem cost spelled out, e.g. `ruby, ruby, uncolored`, or `no cost`.
#[must_use]
pub fn gem_cost_text(color: &str, colored: u64, colorless: u64) -> String {
    let color = color.to_lowercase();
    let gems: Vec<&str> = std::iter::repeat_n(color.as_str(), usize::try_from(colored).unwrap_or(0))
        .chain(std::iter::repeat_n("uncolored", usize::try_from(colorless).unwrap_or(0)))
        .collect();
    if gems.is_empty() { "no cost".to_string() } else { gems.join(", ") }
}

/// Gem cost as glyphs: one colored icon per colored gem, then hollow ones.
#[must_use]
pub fn gem_glyphs(color: &str, colored: u64, colorless: u64) -> String {
    let icon = gem_color_info(color).icon;
    std::iter::repeat_n(icon, usize::try_from(colored).unwrap_or(0))
        .chain(std::iter::repeat_n(COLORLESS_GEM_ICON, usize::try_from(colorless).unwrap_or(0)))
        .collect()
}

/// Badge color for a rarity.
#[must_use]
pub fn rarity_color(rarity: &Rarity) -> &'static str {
    match rarity {
        Rarity::Mythic => "#9c3c0f",
        Rarity::Rare => "#3c6382",
        Rarity::Uncommon => "#2d5016",
        Rarity::Common => "#666666",
        Rarity::Player => "#6b3b8a",
        Rarity::AlternateArt => "#c2a000",
        Rarity::Other(_) => FALLBACK_RARITY_HEX,
    }
}

#[cfg(test)]
#[path = "gems_test.rs"]
mod gems_test;

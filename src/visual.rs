//! Visual encoding
//!
//! Pure, side-effect-free mapping from domain attributes to presentation
//! attributes. Every function has a deterministic fallback: unknown
//! categories and out-of-range severities render in neutral gray at the
//! minimum marker size instead of failing.

use crate::types::{Category, SEVERITY_MAX, SEVERITY_MIN};
use std::borrow::Cow;

/// Neutral fallback color for unknown categories and severities
pub const NEUTRAL_COLOR: &str = "#6B7280";

/// Smallest marker size; low-severity markers stay clickable
pub const MIN_MARKER_SIZE: u32 = 20;

/// Marker color for a category, raw wire value in.
pub fn color_for_category(category: &str) -> &'static str {
    match Category::parse(category) {
        Some(Category::Water) => "#3B82F6",
        Some(Category::Healthcare) => "#EF4444",
        Some(Category::Education) => "#8B5CF6",
        Some(Category::Infrastructure) => "#F59E0B",
        Some(Category::Agriculture) => "#10B981",
        Some(Category::Energy) => "#EAB308",
        None => NEUTRAL_COLOR,
    }
}

/// Color band for a severity level, neutral outside [1, 5].
pub fn color_for_severity(severity: u8) -> &'static str {
    match severity {
        1 => "#10B981",
        2 => "#F59E0B",
        3 => "#EF4444",
        4 => "#DC2626",
        5 => "#7F1D1D",
        _ => NEUTRAL_COLOR,
    }
}

/// Marker diameter in pixels, non-decreasing in severity.
///
/// Valid severities map to 20..=36; anything else gets the floor.
pub fn marker_size(severity: u8) -> u32 {
    if (SEVERITY_MIN..=SEVERITY_MAX).contains(&severity) {
        MIN_MARKER_SIZE.max(16 + 4 * severity as u32)
    } else {
        MIN_MARKER_SIZE
    }
}

/// Human-readable category label; unknown values pass through unchanged.
pub fn label_for_category(category: &str) -> Cow<'_, str> {
    match Category::parse(category) {
        Some(Category::Water) => Cow::Borrowed("Water Access"),
        Some(Category::Healthcare) => Cow::Borrowed("Healthcare"),
        Some(Category::Education) => Cow::Borrowed("Education"),
        Some(Category::Infrastructure) => Cow::Borrowed("Infrastructure"),
        Some(Category::Agriculture) => Cow::Borrowed("Agriculture"),
        Some(Category::Energy) => Cow::Borrowed("Energy"),
        None => Cow::Borrowed(category),
    }
}

/// Human-readable severity label; out-of-range values render as the number.
pub fn label_for_severity(severity: u8) -> Cow<'static, str> {
    match severity {
        1 => Cow::Borrowed("Low"),
        2 => Cow::Borrowed("Moderate"),
        3 => Cow::Borrowed("High"),
        4 => Cow::Borrowed("Severe"),
        5 => Cow::Borrowed("Critical"),
        _ => Cow::Owned(severity.to_string()),
    }
}

/// Compact count formatting: 950 -> "950", 1500 -> "1.5K", 2300000 -> "2.3M".
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

//! Medical-themed color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Recommendation;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Deep teal, used for focused borders
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    // === Secondary Colors ===

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Emerald - no antiviral / high confidence
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - other antiviral / moderate confidence
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - errors / low confidence
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Blue - named antivirals
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text (gray)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Style for secondary text
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for muted text
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for success messages
    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Style for warning messages
    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Style for danger/error messages
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for info messages
    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    /// Style for focused borders
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Highlight for non-zero entries in the processed-data table
    #[must_use]
    pub fn active_value() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Recommendation style
    #[must_use]
    pub fn recommendation(rec: Recommendation) -> Style {
        match rec {
            Recommendation::NoAntiviral => Self::success(),
            Recommendation::Oseltamivir | Recommendation::Zanamivir => Self::info(),
            Recommendation::OtherAntiviral => Self::warning(),
            Recommendation::Unknown => Self::text_muted(),
        }
    }

    /// Gauge style based on confidence
    #[must_use]
    pub fn gauge(confidence: f64) -> Style {
        if confidence >= 0.7 {
            Self::success()
        } else if confidence >= 0.4 {
            Self::warning()
        } else {
            Self::danger()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_thresholds() {
        assert_eq!(MedicalTheme::gauge(0.82), MedicalTheme::success());
        assert_eq!(MedicalTheme::gauge(0.5), MedicalTheme::warning());
        assert_eq!(MedicalTheme::gauge(0.1), MedicalTheme::danger());
    }

    #[test]
    fn test_recommendation_colors() {
        assert_eq!(
            MedicalTheme::recommendation(Recommendation::NoAntiviral),
            MedicalTheme::success()
        );
        assert_eq!(
            MedicalTheme::recommendation(Recommendation::Oseltamivir),
            MedicalTheme::info()
        );
        assert_eq!(
            MedicalTheme::recommendation(Recommendation::Unknown),
            MedicalTheme::text_muted()
        );
    }
}

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Paint colour for features hidden by a filter.
pub const TRANSPARENT: &str = "transparent";

/// The `establishment_status` values the map can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum EstablishmentStatus {
    Open,
    Closed,
}

impl EstablishmentStatus {
    /// The exact property value carried by tiles and records.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }

    /// Any other status (e.g. "Proposed to open") matches neither filter.
    pub fn classify(value: Option<&str>) -> Option<Self> {
        let value = value?;
        Self::iter().find(|status| status.label() == value)
    }
}

/// Phase-of-education categories used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum PhaseOfEducation {
    Nursery,
    Primary,
    Secondary,
    #[strum(serialize = "Not applicable")]
    NotApplicable,
    Other,
}

impl PhaseOfEducation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nursery => "Nursery",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::NotApplicable => "Not applicable",
            Self::Other => "Other",
        }
    }

    pub const fn colour(self) -> &'static str {
        match self {
            Self::Nursery => "#FFDE21",
            Self::Primary => "#007cbf",
            Self::Secondary => "#800080",
            Self::NotApplicable => "#ff69b4",
            Self::Other => "#666666",
        }
    }

    /// Categories with an explicit branch in the colour expression; every
    /// other value falls through to [`PhaseOfEducation::Other`].
    pub fn named() -> impl Iterator<Item = Self> {
        Self::iter().filter(|phase| *phase != Self::Other)
    }

    pub fn classify(value: Option<&str>) -> Self {
        value
            .and_then(|value| Self::named().find(|phase| phase.label() == value))
            .unwrap_or(Self::Other)
    }
}

/// Which establishment statuses are drawn. Open schools only by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilter {
    pub open: bool,
    pub closed: bool,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self {
            open: true,
            closed: false,
        }
    }
}

impl StatusFilter {
    pub const fn is_enabled(&self, status: EstablishmentStatus) -> bool {
        match status {
            EstablishmentStatus::Open => self.open,
            EstablishmentStatus::Closed => self.closed,
        }
    }

    pub fn toggle(&mut self, status: EstablishmentStatus) {
        let slot = match status {
            EstablishmentStatus::Open => &mut self.open,
            EstablishmentStatus::Closed => &mut self.closed,
        };
        *slot = !*slot;
    }
}

/// Which phases are drawn. Everything by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseFilter {
    pub nursery: bool,
    pub primary: bool,
    pub secondary: bool,
    pub not_applicable: bool,
    pub other: bool,
}

impl Default for PhaseFilter {
    fn default() -> Self {
        Self {
            nursery: true,
            primary: true,
            secondary: true,
            not_applicable: true,
            other: true,
        }
    }
}

impl PhaseFilter {
    fn slot(&mut self, phase: PhaseOfEducation) -> &mut bool {
        match phase {
            PhaseOfEducation::Nursery => &mut self.nursery,
            PhaseOfEducation::Primary => &mut self.primary,
            PhaseOfEducation::Secondary => &mut self.secondary,
            PhaseOfEducation::NotApplicable => &mut self.not_applicable,
            PhaseOfEducation::Other => &mut self.other,
        }
    }

    pub const fn is_enabled(&self, phase: PhaseOfEducation) -> bool {
        match phase {
            PhaseOfEducation::Nursery => self.nursery,
            PhaseOfEducation::Primary => self.primary,
            PhaseOfEducation::Secondary => self.secondary,
            PhaseOfEducation::NotApplicable => self.not_applicable,
            PhaseOfEducation::Other => self.other,
        }
    }

    pub fn toggle(&mut self, phase: PhaseOfEducation) {
        let slot = self.slot(phase);
        *slot = !*slot;
    }

    /// The paint colour for `phase`, or transparent when it is filtered out.
    pub const fn colour_for(&self, phase: PhaseOfEducation) -> &'static str {
        if self.is_enabled(phase) {
            phase.colour()
        } else {
            TRANSPARENT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("Nursery"), PhaseOfEducation::Nursery ; "nursery")]
    #[test_case(Some("Not applicable"), PhaseOfEducation::NotApplicable ; "not applicable")]
    #[test_case(Some("All-through"), PhaseOfEducation::Other ; "unlisted phase")]
    #[test_case(Some("primary"), PhaseOfEducation::Other ; "case sensitive")]
    #[test_case(None, PhaseOfEducation::Other ; "missing")]
    fn test_phase_classification(value: Option<&str>, expected: PhaseOfEducation) {
        assert_eq!(PhaseOfEducation::classify(value), expected);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(EstablishmentStatus::classify(Some("Open")), Some(EstablishmentStatus::Open));
        assert_eq!(EstablishmentStatus::classify(Some("Proposed to open")), None);
        assert_eq!(EstablishmentStatus::classify(None), None);
    }

    #[test]
    fn test_default_filters() {
        let status = StatusFilter::default();
        assert!(status.is_enabled(EstablishmentStatus::Open));
        assert!(!status.is_enabled(EstablishmentStatus::Closed));
        let phases = PhaseFilter::default();
        assert!(PhaseOfEducation::iter().all(|phase| phases.is_enabled(phase)));
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut phases = PhaseFilter::default();
        phases.toggle(PhaseOfEducation::Secondary);
        assert_eq!(phases.colour_for(PhaseOfEducation::Secondary), TRANSPARENT);
        assert_eq!(phases.colour_for(PhaseOfEducation::Primary), "#007cbf");
        phases.toggle(PhaseOfEducation::Secondary);
        assert_eq!(phases, PhaseFilter::default());

        let mut status = StatusFilter::default();
        status.toggle(EstablishmentStatus::Closed);
        assert!(status.open && status.closed);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(PhaseOfEducation::NotApplicable.to_string(), "Not applicable");
        assert_eq!(EstablishmentStatus::Closed.to_string(), "Closed");
        assert_eq!(PhaseOfEducation::named().count(), 4);
    }
}

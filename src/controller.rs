//! Presentation layer: raw field text in, display state and shared
//! animation parameters out.
//!
//! Every transition is purely a function of the current raw texts; nothing
//! carries over from prior states except the animation parameters, which
//! deliberately keep their last computed values while input is absent or
//! invalid.

use serde::{Deserialize, Serialize};

use crate::convert::{grade_to_percentage, is_valid_grade_point, yearly_grade_point, GradePoint};
use crate::scene::AnimationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Grade,
    OddTerm,
    EvenTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageId {
    Calculator,
    Summary,
}

/// Display state of one input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    /// No text entered: placeholder, no error shown.
    Empty,
    /// Text present but out of range or unparseable: placeholder plus an
    /// inline error.
    Invalid,
    /// Text present and in range: derived values shown, error hidden.
    Valid,
}

pub fn classify(raw: &str) -> FieldState {
    if raw.trim().is_empty() {
        FieldState::Empty
    } else if is_valid_grade_point(raw) {
        FieldState::Valid
    } else {
        FieldState::Invalid
    }
}

/// Everything the page needs to redraw after one input event. `None`
/// display values mean "show the placeholder".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiUpdate {
    pub field: FieldId,
    pub state: FieldState,
    pub show_error: bool,
    pub percentage: Option<String>,
    pub yearly_grade: Option<String>,
    pub yearly_percentage: Option<String>,
}

/// Qualitative performance band derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Outstanding,
    Excellent,
    Good,
    Satisfactory,
    KeepGoing,
}

impl Band {
    pub fn for_percentage(percentage: f32) -> Self {
        if percentage >= 90.0 {
            Band::Outstanding
        } else if percentage >= 80.0 {
            Band::Excellent
        } else if percentage >= 70.0 {
            Band::Good
        } else if percentage >= 60.0 {
            Band::Satisfactory
        } else {
            Band::KeepGoing
        }
    }

    /// The lowest band carries a neutral encouragement, not a celebration.
    pub fn message(self) -> &'static str {
        match self {
            Band::Outstanding => "Outstanding performance!",
            Band::Excellent => "Excellent work!",
            Band::Good => "Good job!",
            Band::Satisfactory => "Satisfactory result.",
            Band::KeepGoing => "Keep going, steady effort adds up.",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Band::Outstanding => "#22c55e",
            Band::Excellent => "#4ade80",
            Band::Good => "#facc15",
            Band::Satisfactory => "#fb923c",
            Band::KeepGoing => "#f87171",
        }
    }

    pub fn is_celebratory(self) -> bool {
        self != Band::KeepGoing
    }

    fn view(self) -> BandView {
        BandView {
            message: self.message(),
            color: self.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandView {
    pub message: &'static str,
    pub color: &'static str,
}

/// Aggregated results view, recomputed on demand from the current field
/// text rather than reactively.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub percentage: Option<f32>,
    pub yearly_grade: Option<f32>,
    pub yearly_percentage: Option<f32>,
    /// Proportional bar width, `min(percentage, 100)`.
    pub bar_width: Option<f32>,
    pub band: Option<BandView>,
}

/// Owns the raw field texts and the shared animation parameters; the single
/// entry point for input events from the page or from a test harness.
#[derive(Debug, Default)]
pub struct Controller {
    grade: String,
    odd_term: String,
    even_term: String,
    params: AnimationParams,
    latest_yearly: Option<f32>,
    recolor_pending: bool,
}

impl Controller {
    pub fn new() -> Self {
        Controller::default()
    }

    /// Handles one text-change event: stores the text, reclassifies, and
    /// recomputes every derived display from scratch. Animation parameters
    /// update only when the edited field's flow produced a new percentage.
    pub fn on_input_changed(&mut self, field: FieldId, raw: &str) -> UiUpdate {
        match field {
            FieldId::Grade => self.grade = raw.to_string(),
            FieldId::OddTerm => self.odd_term = raw.to_string(),
            FieldId::EvenTerm => self.even_term = raw.to_string(),
        }

        let state = classify(self.field_text(field));
        let grade_pct = GradePoint::parse(&self.grade).map(grade_to_percentage);
        let yearly = self.yearly();
        let yearly_pct = yearly.map(grade_to_percentage);

        match field {
            FieldId::Grade => {
                if let Some(p) = grade_pct {
                    self.params = AnimationParams::from_percentage(p);
                }
            }
            FieldId::OddTerm | FieldId::EvenTerm => {
                // Requires BOTH term fields valid; otherwise the yearly
                // displays fall back to the placeholder and the parameters
                // keep their last computed values.
                if let Some(y) = yearly {
                    self.params = AnimationParams::from_percentage(grade_to_percentage(y));
                    self.latest_yearly = Some(y.value());
                    self.recolor_pending = true;
                }
            }
        }

        UiUpdate {
            field,
            state,
            show_error: state == FieldState::Invalid,
            percentage: grade_pct.map(format_value),
            yearly_grade: yearly.map(|y| format_value(y.value())),
            yearly_percentage: yearly_pct.map(format_value),
        }
    }

    /// Navigation entry point; only the summary page produces a view.
    pub fn on_navigate(&mut self, page: PageId) -> Option<Summary> {
        match page {
            PageId::Calculator => None,
            PageId::Summary => Some(self.summary()),
        }
    }

    /// Re-reads the current field text, applies the same validity rules as
    /// the input path, and derives the performance band from the headline
    /// percentage (single-grade flow first, yearly flow as fallback).
    fn summary(&self) -> Summary {
        let percentage = GradePoint::parse(&self.grade).map(grade_to_percentage);
        let yearly = self.yearly();
        let yearly_percentage = yearly.map(grade_to_percentage);
        let headline = percentage.or(yearly_percentage);
        Summary {
            percentage,
            yearly_grade: yearly.map(GradePoint::value),
            yearly_percentage,
            bar_width: headline.map(|p| p.min(100.0)),
            band: headline.map(|p| Band::for_percentage(p).view()),
        }
    }

    /// Last computed animation parameters, read by the render tick.
    pub fn params(&self) -> AnimationParams {
        self.params
    }

    /// Yearly value awaiting a scene recolor, if a new yearly computation
    /// completed since the last call.
    pub fn take_recolor(&mut self) -> Option<f32> {
        if self.recolor_pending {
            self.recolor_pending = false;
            self.latest_yearly
        } else {
            None
        }
    }

    fn yearly(&self) -> Option<GradePoint> {
        let odd = GradePoint::parse(&self.odd_term)?;
        let even = GradePoint::parse(&self.even_term)?;
        Some(yearly_grade_point(odd, even))
    }

    fn field_text(&self, field: FieldId) -> &str {
        match field {
            FieldId::Grade => &self.grade,
            FieldId::OddTerm => &self.odd_term,
            FieldId::EvenTerm => &self.even_term,
        }
    }
}

fn format_value(value: f32) -> String {
    format!("{value:.2}")
}

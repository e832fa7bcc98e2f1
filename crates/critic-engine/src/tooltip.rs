//! Tooltip placement and hover flicker suppression

use critic_types::{IssueKind, Point, Rect, Size};

/// Spacing constants for tooltip placement
#[derive(Debug, Clone, Copy)]
pub struct TooltipLayout {
    /// Gap between the anchor box and the tooltip
    pub gap: f64,
    /// Minimum distance kept from every viewport edge
    pub margin: f64,
}

impl Default for TooltipLayout {
    fn default() -> Self {
        Self {
            gap: 5.0,
            margin: 5.0,
        }
    }
}

/// Immutable content of one tooltip, owned by the box that created it
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub kind: IssueKind,
    pub explanation: String,
    pub suggestion: Option<String>,
}

/// Pick a viewport-fitting position for a tooltip of the given size.
///
/// Default placement is below-left of the anchor. Flips above on bottom
/// overflow, right-aligns to the anchor on right overflow, then clamps both
/// axes into `[margin, viewport - size - margin]`. The anchor rect is
/// viewport-relative (tooltips are positioned `fixed`-style against the
/// viewport, not the page).
pub fn position_tooltip(
    anchor: Rect,
    tooltip: Size,
    viewport: Size,
    layout: &TooltipLayout,
) -> Point {
    let mut top = anchor.bottom() + layout.gap;
    let mut left = anchor.left;

    if top + tooltip.height > viewport.height {
        top = anchor.top - tooltip.height - layout.gap;
    }
    if left + tooltip.width > viewport.width {
        left = anchor.right() - tooltip.width;
    }

    top = top
        .min(viewport.height - tooltip.height - layout.margin)
        .max(layout.margin);
    left = left
        .min(viewport.width - tooltip.width - layout.margin)
        .max(layout.margin);

    Point::new(left, top)
}

/// Identity of a scheduled hide, handed back when the timer fires.
///
/// Tokens are monotonically increasing per machine, so a timer that was
/// cancelled (or superseded) fires as a stale no-op instead of hiding a
/// tooltip the pointer has re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    EnterAnchor,
    LeaveAnchor,
    EnterTooltip,
    LeaveTooltip,
    TimerFired(TimerToken),
}

/// What the host must do in response to a hover event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEffect {
    /// Position and show the tooltip now
    Show,
    /// Start the hide-delay timer; report back with `TimerFired`
    ScheduleHide(TimerToken),
    /// Cancel a previously scheduled hide
    CancelHide(TimerToken),
    /// Hide the tooltip now
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoverPhase {
    Idle,
    Shown,
    PendingHide(TimerToken),
}

/// Per-box hover state machine.
///
/// Showing is immediate on entering either the anchor or the tooltip;
/// hiding is debounced, and only commits if the pointer has not re-entered
/// either element before the timer fires. This keeps the tooltip stable
/// while the mouse crosses the gap between anchor and tooltip.
#[derive(Debug)]
pub struct HoverMachine {
    phase: HoverPhase,
    next_token: u64,
}

impl HoverMachine {
    pub fn new() -> Self {
        Self {
            phase: HoverPhase::Idle,
            next_token: 0,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.phase != HoverPhase::Idle
    }

    pub fn on_event(&mut self, event: HoverEvent) -> Option<HoverEffect> {
        use HoverEvent::*;
        use HoverPhase::*;

        match (self.phase, event) {
            (Idle, EnterAnchor | EnterTooltip) => {
                self.phase = Shown;
                Some(HoverEffect::Show)
            }
            (Shown, LeaveAnchor | LeaveTooltip) => {
                let token = self.fresh_token();
                self.phase = PendingHide(token);
                Some(HoverEffect::ScheduleHide(token))
            }
            (PendingHide(token), EnterAnchor | EnterTooltip) => {
                self.phase = Shown;
                Some(HoverEffect::CancelHide(token))
            }
            (PendingHide(token), TimerFired(fired)) if fired == token => {
                self.phase = Idle;
                Some(HoverEffect::Hide)
            }
            // Everything else: stale timers, repeated enters, leaves while
            // already pending
            _ => None,
        }
    }

    fn fresh_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken(self.next_token)
    }
}

impl Default for HoverMachine {
    fn default() -> Self {
        Self::new()
    }
}

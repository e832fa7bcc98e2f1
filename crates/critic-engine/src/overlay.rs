//! Overlay session: owns every highlight box from placement to teardown
//!
//! All state lives in the session, not in the document: boxes hold explicit
//! handles to their painted elements and tooltips instead of being found
//! again through id or attribute lookups. The painted side is behind
//! `OverlaySurface` so the session logic runs natively under test.

use std::collections::HashMap;
use std::collections::VecDeque;

use crate::config::EngineConfig;
use crate::error::HighlightError;
use crate::locate::locate_all;
use crate::normalize::normalize;
use crate::page::PageDom;
use crate::project::project;
use crate::tooltip::TooltipContent;
use critic_types::{HighlightRequest, IssueKind, Rect};
use tracing::{debug, warn};

/// External layout-change signals the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSignal {
    /// A tracked container (body or a main-content element) was resized
    ContainerResized,
    /// The window scrolled
    WindowScrolled,
}

/// How much layout tracking the surface managed to register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverMode {
    /// Resize observation plus the scroll listener
    Full,
    /// Resize observation unavailable; scroll listener only
    ScrollOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Active,
    TornDown,
}

/// The painted side of the overlay: one container, boxes inside it,
/// tooltips appended to the page body.
///
/// Removal methods must be safe no-ops when nothing is mounted, so the
/// session's clear stays idempotent.
pub trait OverlaySurface {
    type BoxHandle: Clone;
    type TooltipHandle: Clone;

    /// Create the single page-level container all boxes live in
    fn mount_container(&mut self) -> Result<(), HighlightError>;

    /// Remove the container and with it every box
    fn remove_container(&mut self);

    /// Create one highlight box at a page-absolute rect, visible
    ///
    /// # Errors
    /// When the host cannot create the element
    fn create_box(&mut self, kind: IssueKind, rect: Rect) -> Result<Self::BoxHandle, HighlightError>;

    /// Move a box to a new rect and make it visible
    fn update_box(&mut self, handle: &Self::BoxHandle, rect: Rect);

    /// Hide a box without destroying it
    fn hide_box(&mut self, handle: &Self::BoxHandle);

    /// Create the tooltip for a box, appended to the page body
    ///
    /// # Errors
    /// When the host cannot create the element
    fn create_tooltip(&mut self, content: &TooltipContent)
        -> Result<Self::TooltipHandle, HighlightError>;

    /// Remove every tooltip. Tooltips live outside the container, so
    /// teardown sweeps them separately.
    fn sweep_tooltips(&mut self);

    /// Register layout tracking: resize observation of the body and the
    /// given content containers, plus the window scroll listener. A partial
    /// registration reports `ScrollOnly` rather than failing.
    fn observe_layout(&mut self, content_selectors: &[String])
        -> Result<ObserverMode, HighlightError>;

    /// Release all layout tracking registered by `observe_layout`
    fn unobserve_layout(&mut self);
}

/// One highlight box: a matched rectangle plus its tooltip
#[derive(Debug)]
pub struct BoxState<B, T> {
    pub kind: IssueKind,
    /// The reviewer's original text, re-located on every re-projection
    pub request_text: String,
    pub tooltip: TooltipContent,
    /// Page-absolute rect from the last completed pass; None while hidden
    pub rect: Option<Rect>,
    pub handle: B,
    pub tooltip_handle: T,
}

/// Lifecycle: Uninitialized -> Active on the first successful placement,
/// Active -> TornDown on clear; a later batch re-activates from scratch.
pub struct OverlaySession<S: OverlaySurface> {
    config: EngineConfig,
    phase: SessionPhase,
    observer_mode: Option<ObserverMode>,
    boxes: Vec<BoxState<S::BoxHandle, S::TooltipHandle>>,
}

impl<S: OverlaySurface> OverlaySession<S> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            phase: SessionPhase::Uninitialized,
            observer_mode: None,
            boxes: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn observer_mode(&self) -> Option<ObserverMode> {
        self.observer_mode
    }

    pub fn boxes(&self) -> &[BoxState<S::BoxHandle, S::TooltipHandle>] {
        &self.boxes
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Placement pass: replace whatever was on screen with this batch.
    ///
    /// Clears the previous generation first (at most one generation live),
    /// then locates every occurrence of every request and creates one box
    /// per projected rectangle. Runs synchronously end to end, so a signal
    /// arriving mid-batch never observes a half-built overlay.
    pub fn apply_highlights<P: PageDom>(
        &mut self,
        page: &P,
        surface: &mut S,
        requests: &[HighlightRequest],
    ) {
        self.clear_highlights(surface);
        self.phase = SessionPhase::Uninitialized;

        for request in requests {
            let target = normalize(&request.text);
            if target.is_empty() {
                warn!(
                    original = %request.text,
                    "skipping highlight: {}",
                    HighlightError::EmptyTarget
                );
                continue;
            }

            let spans = locate_all(page, &self.config.exclusion_selector, &target);
            if spans.is_empty() {
                debug!(snippet = %target, "{}", HighlightError::NotFound(request.text.clone()));
                continue;
            }

            let mut placed = 0usize;
            for span in &spans {
                for rect in project(page, span) {
                    if !self.ensure_active(surface) {
                        return;
                    }
                    let tooltip = TooltipContent {
                        kind: request.kind,
                        explanation: request.explanation.clone(),
                        suggestion: request.suggestion.clone(),
                    };
                    let handle = match surface.create_box(request.kind, rect) {
                        Ok(handle) => handle,
                        Err(err) => {
                            warn!("skipping highlight box: {err}");
                            continue;
                        }
                    };
                    let tooltip_handle = match surface.create_tooltip(&tooltip) {
                        Ok(handle) => handle,
                        Err(err) => {
                            warn!("skipping highlight box, tooltip unavailable: {err}");
                            surface.hide_box(&handle);
                            continue;
                        }
                    };
                    self.boxes.push(BoxState {
                        kind: request.kind,
                        request_text: request.text.clone(),
                        tooltip,
                        rect: Some(rect),
                        handle,
                        tooltip_handle,
                    });
                    placed += 1;
                }
            }

            if placed == 0 {
                debug!(snippet = %target, "{}", HighlightError::GeometryUnavailable);
            } else {
                debug!(placed, kind = %request.kind, "highlight placement complete");
            }
        }
    }

    /// Re-projection pass: re-derive every box's rectangle from the current
    /// document. Boxes whose text cannot be located (or has no geometry)
    /// are hidden, not destroyed; the text may reappear after a further
    /// re-render. Safe to run redundantly; each pass is a pure
    /// re-derivation.
    pub fn reproject<P: PageDom>(&mut self, page: &P, surface: &mut S) {
        if self.phase != SessionPhase::Active {
            return;
        }

        // One document scan per distinct request text; rectangles are then
        // handed out to that text's boxes in order, surplus boxes hide.
        let exclusion = self.config.exclusion_selector.clone();
        let mut remaining: HashMap<String, VecDeque<Rect>> = HashMap::new();

        for state in &mut self.boxes {
            let queue = remaining
                .entry(state.request_text.clone())
                .or_insert_with(|| {
                    let target = normalize(&state.request_text);
                    let mut rects = VecDeque::new();
                    if !target.is_empty() {
                        for span in locate_all(page, &exclusion, &target) {
                            rects.extend(project(page, &span));
                        }
                    }
                    rects
                });

            match queue.pop_front() {
                Some(rect) => {
                    state.rect = Some(rect);
                    surface.update_box(&state.handle, rect);
                }
                None => {
                    state.rect = None;
                    surface.hide_box(&state.handle);
                }
            }
        }
    }

    /// A layout-change signal arrived; re-derive all geometry.
    /// Signals may burst, producing redundant but idempotent passes.
    pub fn handle_signal<P: PageDom>(&mut self, signal: LayoutSignal, page: &P, surface: &mut S) {
        debug!(?signal, "layout signal");
        self.reproject(page, surface);
    }

    /// Teardown: release observers, remove the container (and all boxes),
    /// sweep tooltips, drop all state. Idempotent and safe without a prior
    /// session.
    pub fn clear_highlights(&mut self, surface: &mut S) {
        surface.unobserve_layout();
        surface.remove_container();
        surface.sweep_tooltips();
        self.boxes.clear();
        self.observer_mode = None;
        self.phase = SessionPhase::TornDown;
    }

    /// First successful placement mounts the container and registers layout
    /// tracking. Observer failure degrades to whatever the surface could
    /// register instead of failing the session.
    fn ensure_active(&mut self, surface: &mut S) -> bool {
        if self.phase == SessionPhase::Active {
            return true;
        }

        if let Err(err) = surface.mount_container() {
            warn!("overlay container unavailable: {err}");
            return false;
        }

        match surface.observe_layout(&self.config.content_selectors) {
            Ok(mode) => {
                if mode == ObserverMode::ScrollOnly {
                    warn!("resize observation unavailable, tracking scroll only");
                }
                self.observer_mode = Some(mode);
            }
            Err(err) => {
                warn!("layout tracking unavailable: {err}");
                self.observer_mode = None;
            }
        }

        self.phase = SessionPhase::Active;
        true
    }
}

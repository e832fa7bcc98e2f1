//! Per-box hover wiring
//!
//! DOM mouse events are fed through the engine's `HoverMachine`; the
//! resulting effects are mapped onto real timers and style changes. The
//! machine owns the debounce logic, so this file is pure plumbing.

use std::cell::RefCell;
use std::rc::Rc;

use critic_engine::config::TOOLTIP_CLASS;
use critic_engine::{
    position_tooltip, HoverEffect, HoverEvent, HoverMachine, TimerToken, TooltipLayout,
};
use critic_types::{Rect, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

struct HoverShared {
    window: Window,
    anchor: Element,
    tooltip: Element,
    machine: HoverMachine,
    layout: TooltipLayout,
    hide_delay_ms: u32,
    timer: Option<HideTimer>,
}

/// Live hide timer: the token it will report, the JS timeout handle, and
/// the closure the timeout calls. Dropping the entry releases the closure.
struct HideTimer {
    token: TimerToken,
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

/// Keeps one box's hover listeners alive until the overlay generation is
/// dropped
pub struct HoverWiring {
    _closures: Vec<Closure<dyn FnMut()>>,
}

impl HoverWiring {
    pub fn attach(
        window: &Window,
        anchor: &Element,
        tooltip: &Element,
        layout: TooltipLayout,
        hide_delay_ms: u32,
    ) -> Self {
        let shared = Rc::new(RefCell::new(HoverShared {
            window: window.clone(),
            anchor: anchor.clone(),
            tooltip: tooltip.clone(),
            machine: HoverMachine::new(),
            layout,
            hide_delay_ms,
            timer: None,
        }));

        let bindings = [
            (anchor, "mouseenter", HoverEvent::EnterAnchor),
            (anchor, "mouseleave", HoverEvent::LeaveAnchor),
            (tooltip, "mouseenter", HoverEvent::EnterTooltip),
            (tooltip, "mouseleave", HoverEvent::LeaveTooltip),
        ];

        let mut closures = Vec::with_capacity(bindings.len());
        for (target, name, event) in bindings {
            let shared = Rc::clone(&shared);
            let closure = Closure::<dyn FnMut()>::new(move || dispatch(&shared, event));
            let _ = target
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closures.push(closure);
        }

        Self {
            _closures: closures,
        }
    }
}

fn dispatch(shared: &Rc<RefCell<HoverShared>>, event: HoverEvent) {
    let effect = shared.borrow_mut().machine.on_event(event);
    match effect {
        Some(HoverEffect::Show) => show(shared),
        Some(HoverEffect::ScheduleHide(token)) => schedule_hide(shared, token),
        Some(HoverEffect::CancelHide(token)) => cancel_hide(shared, token),
        Some(HoverEffect::Hide) => hide(shared),
        None => {}
    }
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

fn show(shared: &Rc<RefCell<HoverShared>>) {
    let state = shared.borrow();

    // Make the tooltip renderable before measuring it
    set_style(&state.tooltip, "display", "block");

    let anchor_rect = state.anchor.get_bounding_client_rect();
    let anchor = Rect::new(
        anchor_rect.x(),
        anchor_rect.y(),
        anchor_rect.width(),
        anchor_rect.height(),
    );
    let tooltip_rect = state.tooltip.get_bounding_client_rect();
    let tooltip_size = Size::new(tooltip_rect.width(), tooltip_rect.height());

    let dim = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let viewport = Size::new(
        dim(state.window.inner_width()),
        dim(state.window.inner_height()),
    );

    let position = position_tooltip(anchor, tooltip_size, viewport, &state.layout);
    set_style(&state.tooltip, "top", &format!("{}px", position.y));
    set_style(&state.tooltip, "left", &format!("{}px", position.x));

    // Fade in on the next frame so the transition actually runs
    let tooltip = state.tooltip.clone();
    let fade_in = Closure::once_into_js(move || {
        tooltip.set_class_name(&format!("{} visible", TOOLTIP_CLASS));
    });
    let _ = state.window.request_animation_frame(fade_in.unchecked_ref());
}

fn schedule_hide(shared: &Rc<RefCell<HoverShared>>, token: TimerToken) {
    let shared_for_timer = Rc::clone(shared);
    let fired = Closure::<dyn FnMut()>::new(move || {
        dispatch(&shared_for_timer, HoverEvent::TimerFired(token));
    });

    let mut state = shared.borrow_mut();
    let delay = state.hide_delay_ms as i32;
    if let Ok(handle) = state
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            fired.as_ref().unchecked_ref(),
            delay,
        )
    {
        state.timer = Some(HideTimer {
            token,
            handle,
            _closure: fired,
        });
    }
}

fn cancel_hide(shared: &Rc<RefCell<HoverShared>>, token: TimerToken) {
    let mut state = shared.borrow_mut();
    if let Some(timer) = state.timer.take() {
        if timer.token == token {
            state.window.clear_timeout_with_handle(timer.handle);
        } else {
            state.timer = Some(timer);
        }
    }
}

fn hide(shared: &Rc<RefCell<HoverShared>>) {
    let mut state = shared.borrow_mut();
    state.timer = None;
    state.tooltip.set_class_name(TOOLTIP_CLASS);
    set_style(&state.tooltip, "display", "none");
}

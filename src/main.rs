//! Main module for the Chronos stopwatch using Yew.
//! Wires the session, the frame loop and pointer tilt into the view components.

use std::cell::RefCell;
use std::rc::Rc;

use chronos::logging::init_logging;
use chronos::{format_time, LapRecord, Session, Status};
use log::{debug, info, warn};
use yew::prelude::*;

mod components;
mod config;
mod download;
mod hooks;

use components::{ClockFace, ControlBar, LapList};
use config::*;
use download::download_csv;
use hooks::{use_animation_frame, use_pointer_tilt};

type SessionHandle = Rc<RefCell<Session>>;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

fn status_text(status: Status) -> &'static str {
    match status {
        Status::Ready => STATUS_READY,
        Status::Engaged => STATUS_ENGAGED,
        Status::Idle => STATUS_IDLE,
    }
}

/// Wrap a session mutation as a button handler that re-renders afterwards.
fn session_action(
    session: &SessionHandle,
    force_update: &UseForceUpdateHandle,
    action: fn(&mut Session),
) -> Callback<MouseEvent> {
    let session = session.clone();
    let force_update = force_update.clone();
    Callback::from(move |_| {
        action(&mut session.borrow_mut());
        force_update.force_update();
    })
}

/// Toggle the backdrop warp effect on `<body>`.
fn set_warp(active: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    if let Err(e) = body.class_list().toggle_with_force(WARP_CLASS, active) {
        warn!("could not toggle {}: {:?}", WARP_CLASS, e);
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component: owns the session for the page's lifetime.
#[function_component(Main)]
fn main_component() -> Html {
    let session: SessionHandle = use_mut_ref(Session::default);
    let force_update = use_force_update();
    let (tilt, onmousemove) = use_pointer_tilt();

    let running = session.borrow().is_running();

    // Tick once per frame while running. A frame that lands after pause
    // finds the session stopped and leaves it alone.
    let on_frame = {
        let session = session.clone();
        let force_update = force_update.clone();
        Callback::from(move |_| {
            {
                let mut s = session.borrow_mut();
                if !s.is_running() {
                    return;
                }
                s.tick();
            }
            force_update.force_update();
        })
    };
    use_animation_frame(running, on_frame);

    use_effect_with(running, |&running| {
        set_warp(running);
        || ()
    });

    let on_start = session_action(&session, &force_update, Session::start);
    let on_pause = session_action(&session, &force_update, Session::pause);
    let on_clear = session_action(&session, &force_update, Session::clear);
    let on_lap = session_action(&session, &force_update, |s| {
        if s.lap().is_none() {
            debug!("lap ignored before first start");
        }
    });

    let on_export = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let s = session.borrow();
            if s.ledger().is_empty() {
                return;
            }
            match s.export_csv().and_then(|csv| download_csv(&csv)) {
                Ok(()) => info!("exported {} laps", s.ledger().len()),
                Err(e) => warn!("export failed: {}", e),
            }
        })
    };

    let (time, pose, controls, laps, status) = {
        let s = session.borrow();
        let laps: Rc<Vec<LapRecord>> = Rc::new(s.ledger().recent_first().cloned().collect());
        (
            format_time(s.elapsed()),
            s.dial(),
            s.controls(),
            laps,
            status_text(s.status()),
        )
    };

    html! {
        <div class="app-container" {onmousemove}>
            { (0..BG_LAYER_COUNT).map(|i| html! {
                <div class={classes!("bg-layer", format!("bg-layer-{}", i + 1))}
                     style={format!("transform: {}", tilt.layer_transform())} />
            }).collect::<Html>() }

            <div class="chronos-interface" style={format!("transform: {}", tilt.interface_transform())}>
                <div class="status-text">{ status }</div>
                <ClockFace {pose} {time} />
                <ControlBar
                    {controls}
                    {on_start}
                    {on_pause}
                    {on_lap}
                    {on_clear}
                    {on_export}
                />
                <LapList {laps} />
            </div>
        </div>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: installs the panic hook and logger, then renders the App.
fn main() {
    console_error_panic_hook::set_once();
    init_logging(LOG_LEVEL);
    yew::Renderer::<App>::new().render();
}

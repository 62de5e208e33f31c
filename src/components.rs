//! Pure Yew view components for the Chronos UI.
//!
//! Each one renders from props only; the session lives in `main.rs`.

use std::rc::Rc;

use chronos::timefmt::pad;
use chronos::{format_clock, ControlState, DialPose, LapRecord, TimeParts};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ClockFaceProps {
    pub pose: DialPose,
    pub time: TimeParts,
}

/// SVG face with rotating rings, the second hand and the sweep arc, plus the
/// numeral readout underneath.
#[function_component(ClockFace)]
pub fn clock_face(props: &ClockFaceProps) -> Html {
    let pose = &props.pose;
    html! {
        <div class="clock-face">
            <svg class="dial" viewBox="0 0 400 400">
                <g id="ring-deco-1" transform={pose.outer_ring_transform()}>
                    <circle cx="200" cy="200" r="185" class="ring ring-outer" />
                </g>
                <g id="ring-deco-2" transform={pose.inner_ring_transform()}>
                    <circle cx="200" cy="200" r="170" class="ring ring-inner" />
                </g>
                <path id="arc-seconds" class="arc" d={pose.arc_path()} />
                <g id="hand-rotator" transform={pose.hand_transform()}>
                    <line x1="200" y1="200" x2="200" y2="20" class="hand" />
                </g>
            </svg>
            <div class="readout">
                <span id="time-min">{ props.time.minutes.clone() }</span>
                { ":" }
                <span id="time-sec">{ props.time.seconds.clone() }</span>
                <span id="ms-display">{ format!(".{}", props.time.centiseconds) }</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LapListProps {
    /// Newest first.
    pub laps: Rc<Vec<LapRecord>>,
}

#[function_component(LapList)]
pub fn lap_list(props: &LapListProps) -> Html {
    html! {
        <div id="lap-list" class="lap-list">
            { props.laps.iter().map(render_lap_entry).collect::<Html>() }
        </div>
    }
}

fn render_lap_entry(lap: &LapRecord) -> Html {
    html! {
        <div class="lap-entry" key={lap.sequence}>
            <span class="seq-num">{ format!("LOG.{}", pad(lap.sequence as u64)) }</span>
            <span class="ts-delta">{ format_clock(lap.interval) }</span>
            <span class="ts-total">{ format_clock(lap.cumulative) }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ControlBarProps {
    pub controls: ControlState,
    pub on_start: Callback<MouseEvent>,
    pub on_pause: Callback<MouseEvent>,
    pub on_lap: Callback<MouseEvent>,
    pub on_clear: Callback<MouseEvent>,
    pub on_export: Callback<MouseEvent>,
}

#[function_component(ControlBar)]
pub fn control_bar(props: &ControlBarProps) -> Html {
    let c = props.controls;
    html! {
        <div class="controls">
            <button id="btn-start" disabled={c.start_disabled} onclick={props.on_start.clone()}>
                { "Start" }
            </button>
            <button id="btn-pause" disabled={c.pause_disabled} onclick={props.on_pause.clone()}>
                { "Pause" }
            </button>
            <button id="btn-lap" disabled={c.lap_disabled} onclick={props.on_lap.clone()}>
                { "Lap" }
            </button>
            <button id="btn-clear" onclick={props.on_clear.clone()}>
                { "Clear" }
            </button>
            <button id="btn-export" disabled={c.export_disabled} onclick={props.on_export.clone()}>
                { "Export" }
            </button>
        </div>
    }
}

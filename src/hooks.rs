use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chronos::ParallaxPose;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;
use yew::prelude::*;

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A self-renewing `requestAnimationFrame` chain. Dropping it cancels the
/// pending frame and tears the closure down.
struct FrameLoop {
    alive: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    closure: FrameClosure,
}

fn request_frame(closure: &Closure<dyn FnMut()>) -> Option<i32> {
    let window = web_sys::window()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

impl FrameLoop {
    fn start(on_frame: Callback<()>) -> Self {
        let alive = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let closure: FrameClosure = Rc::new(RefCell::new(None));

        let body = {
            let alive = alive.clone();
            let pending = pending.clone();
            let closure = closure.clone();
            move || {
                pending.set(None);
                // A frame that slipped through after teardown must not act.
                if !alive.get() {
                    return;
                }
                on_frame.emit(());
                if !alive.get() {
                    return;
                }
                if let Some(cb) = closure.borrow().as_ref() {
                    pending.set(request_frame(cb));
                }
            }
        };
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(body) as Box<dyn FnMut()>));

        if let Some(cb) = closure.borrow().as_ref() {
            pending.set(request_frame(cb));
        }
        debug!("frame loop started");

        Self {
            alive,
            pending,
            closure,
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.alive.set(false);
        if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
            if let Err(e) = window.cancel_animation_frame(id) {
                warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        // Breaks the closure -> cell -> closure cycle.
        self.closure.borrow_mut().take();
        debug!("frame loop stopped");
    }
}

/// Call `on_frame` once per display refresh for as long as `active` holds.
///
/// Turning `active` off, or unmounting, cancels whatever frame is pending.
#[hook]
pub fn use_animation_frame(active: bool, on_frame: Callback<()>) {
    use_effect_with(active, move |&active| {
        let frame_loop = active.then(|| FrameLoop::start(on_frame));
        move || drop(frame_loop)
    });
}

/// Tracks the pointer over the page and returns the resulting parallax pose
/// together with the `onmousemove` handler that feeds it.
#[hook]
pub fn use_pointer_tilt() -> (ParallaxPose, Callback<MouseEvent>) {
    let pose = use_state(ParallaxPose::default);

    let onmousemove = {
        let pose = pose.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            pose.set(ParallaxPose::from_pointer(
                e.client_x() as f64,
                e.client_y() as f64,
                width,
                height,
            ));
        })
    };

    (*pose, onmousemove)
}

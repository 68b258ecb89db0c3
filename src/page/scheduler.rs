use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::schedule::{FrameTask, Scheduler, Task};

/// Real timers (`setTimeout` via gloo) and `requestAnimationFrame`.
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn schedule(&self, delay_ms: u32, task: Task) {
        Timeout::new(delay_ms, task).forget();
    }

    fn next_frame(&self, task: FrameTask) {
        let callback = Closure::once_into_js(move |ts: f64| task(ts));
        if let Err(e) = self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            log::warn!("requestAnimationFrame failed: {e:?}");
        }
    }
}

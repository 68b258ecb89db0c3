//! Browser wiring for the love calculator page.
//!
//! The pure modules (`input`, `reveal`, `ring`, `hearts`, `timeline`,
//! `choices`) hold all behaviour; this module resolves the page's views once,
//! fails fast if any is missing, and connects DOM events, timers and animation
//! frames to them. State is owned by the listener closures, never global.
use std::rc::Rc;

use crate::config::PageConfig;
use crate::error::PageError;
use crate::reveal::RevealSequence;
use crate::schedule::Scheduler;

mod extras;
mod inputs;
mod observer;
mod scheduler;
mod surface;
mod views;

pub use scheduler::BrowserScheduler;

use surface::DomRevealSurface;
use views::{PageViews, listen};

pub fn start_page(config: PageConfig) -> Result<(), PageError> {
    config.validate()?;
    let window = web_sys::window().ok_or(PageError::MissingWindow)?;
    let document = window.document().ok_or(PageError::MissingDocument)?;
    let views = Rc::new(PageViews::lookup(&document)?);
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window));

    inputs::wire_name_inputs(&views, &config)?;

    // --- Trigger -------------------------------------------------------------
    let surface = Rc::new(DomRevealSurface::new(views.clone(), scheduler.clone()));
    let sequence = RevealSequence::new(scheduler, surface);
    listen(&views.calculate_btn, "click", move |_evt| {
        if let Err(e) = sequence.trigger() {
            log::warn!("ignored calculate click: {e}");
        }
    })?;

    extras::wire_choice_groups(&views)?;
    extras::wire_footer_sound(&views)?;
    extras::wire_scroll_hint(&views)?;

    log::info!(
        "page ready (targets: {} chars / {} chars)",
        config.girl_target.chars().count(),
        config.boy_target.chars().count()
    );
    Ok(())
}

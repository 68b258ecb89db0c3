//! Love Calculator core crate.
//!
//! A name-typing gate (two inputs that only ever hold a prefix of their target
//! name) unlocks a timed reveal: loading ring, percentage counter, floating
//! hearts and a scroll-staggered timeline. The behaviour lives in plain Rust
//! modules driven through a [`schedule::Scheduler`], so it runs natively under
//! `cargo test` with virtual time; `page` binds it to the browser.

use wasm_bindgen::prelude::*;

pub mod choices;
pub mod config;
pub mod error;
pub mod hearts;
pub mod input;
pub mod logging;
pub mod reveal;
pub mod ring;
pub mod schedule;
pub mod timeline;

mod page;

pub use config::PageConfig;
pub use error::{PageError, RevealError};
pub use page::BrowserScheduler;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::init(level);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Wire the page with the built-in target names.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    page::start_page(PageConfig::default()).map_err(Into::into)
}

/// Wire the page with a JSON config, e.g. `{"girl_target":"Ana","boy_target":"Bo"}`.
/// Missing keys keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(json)?;
    page::start_page(config).map_err(Into::into)
}

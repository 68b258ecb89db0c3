// DOM side of the reveal sequence: panel toggles, ring drawing, hearts.
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement};

use super::observer::arm_timeline;
use super::views::{
    PageViews, add_class, elements, force_reflow, hide_section, html_elements, remove_class,
    set_style, show_section,
};
use crate::config::ids;
use crate::error::PageError;
use crate::hearts::{Lcg, generate_hearts};
use crate::reveal::{RevealPhase, RevealSurface};
use crate::ring::{ResultsView, RingFrame, run_ring};
use crate::schedule::Scheduler;

pub struct DomRevealSurface {
    views: Rc<PageViews>,
    scheduler: Rc<dyn Scheduler>,
    results: Rc<DomResultsView>,
}

impl DomRevealSurface {
    pub fn new(views: Rc<PageViews>, scheduler: Rc<dyn Scheduler>) -> Self {
        let results = Rc::new(DomResultsView {
            document: views.document.clone(),
            percentage: views.percentage.clone(),
            ring_style: views.ring_fill.clone(),
            reveals: RefCell::new(Vec::new()),
        });
        Self {
            views,
            scheduler,
            results,
        }
    }

    fn show_results(&self) {
        let v = &self.views;
        hide_section(&v.loading);
        for section in [&v.results, &v.timeline, &v.message, &v.footer] {
            show_section(section);
        }
        force_reflow(&v.results);
        add_class(&v.results, "show");
        remove_class(&v.navbar, "nav-hidden");

        run_ring(self.scheduler.clone(), self.results.clone());
        // Hearts and timeline are independent; both are attempted.
        let failed = log_failures([
            ("hearts", spawn_hearts(v)),
            ("timeline", self.arm_timeline()),
        ]);
        if failed > 0 {
            log::error!("results reveal incomplete: {failed} effect(s) failed");
        }
    }

    fn arm_timeline(&self) -> Result<(), PageError> {
        let items = html_elements(
            self.views
                .document
                .query_selector_all(ids::TIMELINE_ITEM_SELECTOR)?,
        );
        arm_timeline(items, self.scheduler.clone())
    }
}

/// Log every failed effect and return how many failed.
fn log_failures<E: Display>(
    outcomes: impl IntoIterator<Item = (&'static str, Result<(), E>)>,
) -> usize {
    outcomes
        .into_iter()
        .filter_map(|(name, outcome)| outcome.err().map(|e| (name, e)))
        .inspect(|(name, e)| log::warn!("{name} failed: {e}"))
        .count()
}

impl RevealSurface for DomRevealSurface {
    fn enter(&self, phase: RevealPhase) {
        let v = &self.views;
        match phase {
            RevealPhase::Idle => {}
            RevealPhase::FadingCalculator => {
                add_class(&v.navbar, "nav-hidden");
                add_class(&v.calculator, "fade-out");
            }
            RevealPhase::LoadingShown => {
                hide_section(&v.calculator);
                show_section(&v.loading);
                force_reflow(&v.loading);
                add_class(&v.loading, "show");
            }
            RevealPhase::LoadingFadingOut => {
                remove_class(&v.loading, "show");
            }
            RevealPhase::ResultsShown => self.show_results(),
        }
    }
}

struct DomResultsView {
    document: Document,
    percentage: Element,
    ring_style: CssStyleDeclaration,
    /// Filled when the ring completes, not at startup.
    reveals: RefCell<Vec<Element>>,
}

impl ResultsView for DomResultsView {
    fn render_ring(&self, frame: &RingFrame) {
        self.percentage
            .set_text_content(Some(&frame.percentage.to_string()));
        set_style(
            &self.ring_style,
            "stroke-dashoffset",
            &frame.stroke_offset.to_string(),
        );
    }

    fn result_reveal_count(&self) -> usize {
        let found = match self.document.query_selector_all(ids::RESULT_REVEAL_SELECTOR) {
            Ok(list) => elements(list),
            Err(e) => {
                log::warn!("could not query result elements: {}", PageError::from(e));
                Vec::new()
            }
        };
        let count = found.len();
        *self.reveals.borrow_mut() = found;
        count
    }

    fn reveal_result(&self, index: usize) {
        if let Some(el) = self.reveals.borrow().get(index) {
            add_class(el, "revealed");
        }
    }
}

fn spawn_hearts(views: &PageViews) -> Result<(), PageError> {
    let mut rng = Lcg::from_entropy();
    for heart in generate_hearts(&mut rng) {
        let span: HtmlElement = views
            .document
            .create_element("span")?
            .dyn_into()
            .map_err(|_| PageError::WrongElementType {
                id: "floating-heart".into(),
                expected: "HtmlElement",
            })?;
        span.set_class_name("floating-heart");
        span.set_text_content(Some(heart.glyph));
        let style = span.style();
        for (property, value) in heart.style() {
            set_style(&style, property, &value);
        }
        views.hearts.append_child(&span)?;
    }
    Ok(())
}

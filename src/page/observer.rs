// IntersectionObserver-backed timeline watcher.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node,
};

use super::views::add_class;
use crate::error::PageError;
use crate::schedule::Scheduler;
use crate::timeline::{
    TimelineDriver, TimelineView, VISIBILITY_THRESHOLD, VisibilityWatcher, parse_stagger,
    stagger_for,
};

const STAGGER_KEY: &str = "stagger";

struct ObserverWatcher {
    observer: IntersectionObserver,
    items: Vec<HtmlElement>,
}

impl VisibilityWatcher for ObserverWatcher {
    fn observe(&self, index: usize) {
        if let Some(item) = self.items.get(index) {
            self.observer.observe(item);
        }
    }

    fn unobserve(&self, index: usize) {
        if let Some(item) = self.items.get(index) {
            self.observer.unobserve(item);
        }
    }
}

struct ItemsView {
    items: Vec<HtmlElement>,
}

impl TimelineView for ItemsView {
    fn show_item(&self, index: usize) {
        if let Some(item) = self.items.get(index) {
            add_class(item, "visible");
        }
    }
}

/// Tag every item with its stagger and start watching them.
pub fn arm_timeline(
    items: Vec<HtmlElement>,
    scheduler: Rc<dyn Scheduler>,
) -> Result<(), PageError> {
    for (i, item) in items.iter().enumerate() {
        item.dataset().set(STAGGER_KEY, &stagger_for(i).to_string())?;
    }

    // The observer callback needs the driver and the driver needs the
    // observer; the slot is filled once both exist.
    let slot: Rc<RefCell<Option<TimelineDriver>>> = Rc::new(RefCell::new(None));
    let cb_slot = slot.clone();
    let cb_items = items.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let Some(driver) = cb_slot.borrow().clone() else {
                return;
            };
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target: Element = entry.target();
                let target_node: &Node = &target;
                let Some(index) = cb_items
                    .iter()
                    .position(|item| item.is_same_node(Some(target_node)))
                else {
                    continue;
                };
                let stagger = parse_stagger(cb_items[index].dataset().get(STAGGER_KEY).as_deref());
                driver.handle_intersection(index, stagger);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    let count = items.len();
    let watcher = Rc::new(ObserverWatcher {
        observer,
        items: items.clone(),
    });
    let view = Rc::new(ItemsView { items });
    let driver = TimelineDriver::new(count, scheduler, watcher, view);
    *slot.borrow_mut() = Some(driver.clone());
    driver.arm();
    Ok(())
}

// Element lookup and the small set of DOM mutations the page performs.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, EventTarget, HtmlAudioElement,
    HtmlButtonElement, HtmlElement, HtmlInputElement, NodeList, SvgElement,
};

use crate::config::ids;
use crate::error::PageError;

/// Every view the page touches, resolved once at startup.
pub struct PageViews {
    pub document: Document,
    pub girl_input: HtmlInputElement,
    pub boy_input: HtmlInputElement,
    pub calculate_btn: HtmlButtonElement,
    pub btn_wrapper: Element,
    pub navbar: Element,
    pub calculator: HtmlElement,
    pub loading: HtmlElement,
    pub results: HtmlElement,
    pub timeline: HtmlElement,
    pub message: HtmlElement,
    pub footer: HtmlElement,
    pub scroll_hint: Element,
    pub ring_fill: CssStyleDeclaration,
    pub percentage: Element,
    pub hearts: Element,
    pub sound: HtmlAudioElement,
}

impl PageViews {
    pub fn lookup(document: &Document) -> Result<Self, PageError> {
        Ok(Self {
            document: document.clone(),
            girl_input: typed(document, ids::GIRL_INPUT, "HtmlInputElement")?,
            boy_input: typed(document, ids::BOY_INPUT, "HtmlInputElement")?,
            calculate_btn: typed(document, ids::CALCULATE_BTN, "HtmlButtonElement")?,
            btn_wrapper: element(document, ids::BTN_WRAPPER)?,
            navbar: element(document, ids::NAVBAR)?,
            calculator: typed(document, ids::CALCULATOR, "HtmlElement")?,
            loading: typed(document, ids::LOADING, "HtmlElement")?,
            results: typed(document, ids::RESULTS, "HtmlElement")?,
            timeline: typed(document, ids::TIMELINE, "HtmlElement")?,
            message: typed(document, ids::MESSAGE, "HtmlElement")?,
            footer: typed(document, ids::FOOTER, "HtmlElement")?,
            scroll_hint: element(document, ids::SCROLL_HINT)?,
            ring_fill: style_of(&element(document, ids::RING_FILL)?, ids::RING_FILL)?,
            percentage: element(document, ids::PERCENTAGE)?,
            hearts: element(document, ids::HEARTS)?,
            sound: typed(document, ids::SOUND, "HtmlAudioElement")?,
        })
    }
}

pub fn element(document: &Document, id: &str) -> Result<Element, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement { id: id.to_string() })
}

fn typed<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T, PageError> {
    element(document, id)?
        .dyn_into::<T>()
        .map_err(|_| PageError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

/// Inline style of an HTML or SVG element (the ring is an SVG circle).
fn style_of(el: &Element, id: &str) -> Result<CssStyleDeclaration, PageError> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        Ok(html.style())
    } else if let Some(svg) = el.dyn_ref::<SvgElement>() {
        Ok(svg.style())
    } else {
        Err(PageError::WrongElementType {
            id: id.to_string(),
            expected: "HtmlElement or SvgElement",
        })
    }
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    elements(list)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

// --- Mutations -----------------------------------------------------------------
// Failures here are JS-side oddities we cannot recover from mid-animation; they
// are logged and the choreography carries on.

pub fn add_class(el: &Element, class: &str) {
    if let Err(e) = el.class_list().add_1(class) {
        log::warn!("add class {class}: {e:?}");
    }
}

pub fn remove_class(el: &Element, class: &str) {
    if let Err(e) = el.class_list().remove_1(class) {
        log::warn!("remove class {class}: {e:?}");
    }
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(e) = el.class_list().toggle_with_force(class, on) {
        log::warn!("toggle class {class}: {e:?}");
    }
}

pub fn show_section(el: &HtmlElement) {
    if let Err(e) = el.style().remove_property("display") {
        log::warn!("show section: {e:?}");
    }
}

pub fn hide_section(el: &HtmlElement) {
    if let Err(e) = el.style().set_property("display", "none") {
        log::warn!("hide section: {e:?}");
    }
}

/// Read layout so a class added right after a display change animates instead
/// of snapping.
pub fn force_reflow(el: &HtmlElement) {
    let _ = el.offset_height();
}

pub fn set_style(style: &CssStyleDeclaration, property: &str, value: &str) {
    if let Err(e) = style.set_property(property, value) {
        log::warn!("set {property}: {e:?}");
    }
}

/// Attach a listener that lives for the page's lifetime.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), PageError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

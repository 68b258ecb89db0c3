// Wiring of the two constrained name inputs and the trigger button state.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_sys::HtmlInputElement;

use super::views::{PageViews, listen, set_class};
use crate::config::PageConfig;
use crate::error::PageError;
use crate::input::{FieldId, NameGate};

pub fn wire_name_inputs(views: &Rc<PageViews>, config: &PageConfig) -> Result<(), PageError> {
    let gate = Rc::new(RefCell::new(NameGate::new(
        &config.girl_target,
        &config.boy_target,
    )));
    wire_field(FieldId::Girl, &views.girl_input, &gate, views)?;
    wire_field(FieldId::Boy, &views.boy_input, &gate, views)?;

    // Markup may ship with stale values after a soft reload.
    for id in [FieldId::Girl, FieldId::Boy] {
        let input = field_input(views, id);
        input.set_value(gate.borrow().field(id).visible());
    }
    set_trigger_ready(views, gate.borrow().ready());
    Ok(())
}

fn field_input(views: &PageViews, id: FieldId) -> &HtmlInputElement {
    match id {
        FieldId::Girl => &views.girl_input,
        FieldId::Boy => &views.boy_input,
    }
}

fn set_trigger_ready(views: &PageViews, ready: bool) {
    views.calculate_btn.set_disabled(!ready);
    set_class(&views.btn_wrapper, "visible", ready);
}

fn pin_caret(input: &HtmlInputElement, caret: u32) {
    if let Err(e) = input.set_selection_range(caret, caret) {
        log::warn!("set caret: {e:?}");
    }
}

fn wire_field(
    id: FieldId,
    input: &HtmlInputElement,
    gate: &Rc<RefCell<NameGate>>,
    views: &Rc<PageViews>,
) -> Result<(), PageError> {
    // Our own rewrite of the value must not be treated as another user edit.
    let updating = Rc::new(Cell::new(false));

    {
        let input_el = input.clone();
        let gate = gate.clone();
        let views = views.clone();
        listen(input, "input", move |_evt| {
            if updating.get() {
                return;
            }
            updating.set(true);
            let outcome = gate.borrow_mut().edit(id, &input_el.value());
            input_el.set_value(&outcome.text);
            pin_caret(&input_el, outcome.caret);
            updating.set(false);
            set_trigger_ready(&views, outcome.ready);
        })?;
    }

    for event in ["paste", "drop"] {
        listen(input, event, |evt| evt.prevent_default())?;
    }

    {
        let input_el = input.clone();
        listen(input, "mouseup", move |_evt| {
            let caret = input_el.value().encode_utf16().count() as u32;
            pin_caret(&input_el, caret);
        })?;
    }
    Ok(())
}

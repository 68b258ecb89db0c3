// Choice buttons, footer sound and the scroll hint.
use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use super::views::{PageViews, elements, listen, set_class};
use crate::choices::ChoiceGroup;
use crate::config::ids;
use crate::error::PageError;

/// Each `.choice-buttons` container is an independent single-select group.
pub fn wire_choice_groups(views: &PageViews) -> Result<(), PageError> {
    let groups = elements(views.document.query_selector_all(ids::CHOICE_GROUP_SELECTOR)?);
    for group_el in groups {
        let buttons = Rc::new(elements(group_el.query_selector_all(ids::CHOICE_BTN_SELECTOR)?));
        let group = Rc::new(RefCell::new(ChoiceGroup::new(buttons.len())));
        for (index, button) in buttons.iter().enumerate() {
            let all = buttons.clone();
            let group = group.clone();
            listen(button, "click", move |_evt| {
                let mut state = group.borrow_mut();
                state.select(index);
                for (i, selected) in state.flags() {
                    set_class(&all[i], "selected", selected);
                }
            })?;
        }
    }
    Ok(())
}

/// Every footer link restarts the shared sound. Rapid clicks simply restart
/// playback; overlapping is accepted.
pub fn wire_footer_sound(views: &PageViews) -> Result<(), PageError> {
    let links = elements(views.document.query_selector_all(ids::FOOTER_LINK_SELECTOR)?);
    for link in links {
        let sound = views.sound.clone();
        listen(&link, "click", move |_evt| {
            sound.set_current_time(0.0);
            if let Err(e) = sound.play() {
                log::warn!("footer sound: {e:?}");
            }
        })?;
    }
    Ok(())
}

pub fn wire_scroll_hint(views: &Rc<PageViews>) -> Result<(), PageError> {
    let target = views.clone();
    listen(&views.scroll_hint, "click", move |_evt| {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        target
            .timeline
            .scroll_into_view_with_scroll_into_view_options(&options);
    })
}

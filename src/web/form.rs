use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement, Window};

use crate::config::{FormConfig, Hooks};
use crate::dom::{build, Options};
use crate::form::{mark_all, ContactForm, Field, FieldErrors, MarkerHost, MessageCounter, Submission};
use crate::web::page::{describe, materialize};

struct FormView {
    window: Window,
    document: Document,
    form: HtmlFormElement,
    name: Option<web_sys::Element>,
    email: Option<web_sys::Element>,
    message: Option<web_sys::Element>,
    counter: Option<web_sys::Element>,
}

impl FormView {
    fn field(&self, field: Field) -> Option<&web_sys::Element> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Email => self.email.as_ref(),
            Field::Message => self.message.as_ref(),
        }
    }

    fn value(&self, field: Field) -> String {
        self.field(field)
            .and_then(|el| js_sys::Reflect::get(el, &JsValue::from_str("value")).ok())
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    }

    fn show_counter(&self, counter: MessageCounter) {
        if let Some(el) = &self.counter {
            el.set_text_content(Some(&counter.text()));
            if let Err(e) = el.class_list().toggle_with_force("error", counter.over_limit) {
                warn!("[form] Could not flag counter: {}", describe(&e));
            }
        }
    }

    fn clear_errors(&self) {
        mark_all(self, &FieldErrors::default());
    }

    fn acknowledge(&self, text: &str) {
        if let Err(e) = self.window.alert_with_message(text) {
            debug!("[form] Alert unavailable: {}", describe(&e));
        }
    }
}

impl MarkerHost for FormView {
    type Input = web_sys::Element;

    fn input(&self, field: Field) -> Option<web_sys::Element> {
        self.field(field).cloned()
    }

    fn remove_note_after(&self, input: &web_sys::Element) {
        if let Some(next) = input.next_element_sibling() {
            if next.class_list().contains("error-text") {
                next.remove();
            }
        }
    }

    fn flag(&self, input: &web_sys::Element, invalid: bool) {
        let classes = input.class_list();
        let result = if invalid {
            classes.add_1("error")
        } else {
            classes.remove_1("error")
        };
        if let Err(e) = result {
            warn!("[form] Could not update error class on #{}: {}", input.id(), describe(&e));
        }
    }

    fn insert_note_after(&self, input: &web_sys::Element, message: &str) {
        let note = build(
            "div",
            Options::new().class("error-text error").text(message),
            vec![],
        );
        let result = materialize(&self.document, &note, &mut Vec::new())
            .and_then(|el| input.insert_adjacent_element("afterend", &el));
        if let Err(e) = result {
            warn!("[form] Could not show error for #{}: {}", input.id(), describe(&e));
        }
    }
}

fn find_in(form: &HtmlFormElement, id: &str) -> Option<web_sys::Element> {
    form.query_selector(&format!("#{}", id)).ok().flatten()
}

/// Use the page's counter element, or create one right after the message
/// field.
fn counter_element(
    document: &Document,
    hooks: &Hooks,
    message: Option<&web_sys::Element>,
) -> Option<web_sys::Element> {
    if let Some(existing) = document.get_element_by_id(&hooks.counter) {
        return Some(existing);
    }
    let message = message?;
    let tree = build(
        "div",
        Options::new().id(&hooks.counter).class("message-counter"),
        vec![],
    );
    let el = materialize(document, &tree, &mut Vec::new()).ok()?;
    match message.insert_adjacent_element("afterend", &el) {
        Ok(_) => Some(el),
        Err(e) => {
            warn!("[form] Could not insert message counter: {}", describe(&e));
            None
        }
    }
}

/// Bind validation and the live counter to the contact form, if the page
/// has one.
pub fn attach(window: &Window, document: &Document, hooks: &Hooks, config: &FormConfig) {
    let Some(form) = document.get_element_by_id(&hooks.form) else {
        debug!("[form] No #{} on page, validation not bound", hooks.form);
        return;
    };
    let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
        warn!("[form] #{} is not a form element", hooks.form);
        return;
    };

    let name = find_in(&form, &hooks.name);
    let email = find_in(&form, &hooks.email);
    let message = find_in(&form, &hooks.message);
    let counter = counter_element(document, hooks, message.as_ref());

    let view = Rc::new(FormView {
        window: window.clone(),
        document: document.clone(),
        form,
        name,
        email,
        message,
        counter,
    });
    let state = Rc::new(RefCell::new(ContactForm::new(config.clone())));

    {
        let mut state = state.borrow_mut();
        let counter = state.input_message(view.value(Field::Message));
        view.show_counter(counter);
    }

    if let Some(message) = &view.message {
        let (v, s) = (view.clone(), state.clone());
        let on_input = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let counter = s.borrow_mut().input_message(v.value(Field::Message));
            v.show_counter(counter);
        });
        if let Err(e) =
            message.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
        {
            warn!("[form] Could not bind message input: {}", describe(&e));
        }
        on_input.forget();
    }

    let (v, s) = (view.clone(), state.clone());
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        e.prevent_default();
        let mut state = s.borrow_mut();
        for field in Field::ALL {
            state.set_field(field, v.value(field));
        }
        match state.submit() {
            Submission::Rejected(errors) => mark_all(v.as_ref(), &errors),
            Submission::Accepted { acknowledgment } => {
                v.acknowledge(&acknowledgment);
                v.form.reset();
                v.clear_errors();
                // Reset restores default field content; count what is shown.
                state.input_message(v.value(Field::Message));
            }
        }
        v.show_counter(state.counter());
    });
    if let Err(e) = view
        .form
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
    {
        warn!("[form] Could not bind submit: {}", describe(&e));
    }
    on_submit.forget();
}

#![forbid(unsafe_code)]

//! DOM side of the client: the transcript container, status label and
//! rendered prompts.
//!
//! Prompt elements are held by [`PromptId`] so disabling one never depends
//! on looking it up by element id.

use std::collections::HashMap;

use mudlink_core::prompt::{
    ACTIVE_PROMPT_ID, BUTTON_BOX_CLASS, DATA_PROMPT_ACTION, DATA_PROMPT_ID, PROMPT_CLASS,
    PROMPT_DISABLED_CLASS, WRAPPER_CLASS,
};
use mudlink_core::transcript::ENTRY_CLASS;
use mudlink_core::{
    ConnectionStatus, DomIds, FieldKind, FollowDecision, FormField, PromptButton, PromptId,
    PromptView, ScrollMetrics,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlCollection, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::host::prompt_target;

fn missing(id: &str) -> JsValue {
    JsValue::from_str(&format!("missing element #{id}"))
}

fn elements(collection: &HtmlCollection) -> impl Iterator<Item = Element> + '_ {
    (0..collection.length()).filter_map(|idx| collection.item(idx))
}

/// The prompt button a click inside the stream landed on, if any.
#[must_use]
pub fn clicked_button(event: &Event) -> Option<(PromptId, PromptButton)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target
        .closest(&format!("button[{DATA_PROMPT_ACTION}]"))
        .ok()??;
    prompt_target(
        button.get_attribute(DATA_PROMPT_ID).as_deref(),
        button.get_attribute(DATA_PROMPT_ACTION).as_deref(),
    )
}

pub struct Dom {
    document: Document,
    metabox: HtmlElement,
    stream: Element,
    status: Element,
    prompts: HashMap<PromptId, Element>,
}

impl Dom {
    /// Look up the page elements named by `ids`.
    pub fn resolve(document: &Document, ids: &DomIds) -> Result<Self, JsValue> {
        let metabox = document
            .get_element_by_id(&ids.metabox)
            .ok_or_else(|| missing(&ids.metabox))?
            .dyn_into::<HtmlElement>()?;
        let stream = document
            .get_element_by_id(&ids.stream)
            .ok_or_else(|| missing(&ids.stream))?;
        let status = document
            .get_element_by_id(&ids.status)
            .ok_or_else(|| missing(&ids.status))?;
        Ok(Self {
            document: document.clone(),
            metabox,
            stream,
            status,
            prompts: HashMap::new(),
        })
    }

    /// The element button clicks are delegated from.
    #[must_use]
    pub fn stream(&self) -> &Element {
        &self.stream
    }

    #[must_use]
    pub fn prompt(&self, id: PromptId) -> Option<&Element> {
        self.prompts.get(&id)
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            f64::from(self.metabox.scroll_height()),
            f64::from(self.metabox.offset_height()),
            f64::from(self.metabox.scroll_top()),
        )
    }

    pub fn scroll_to_bottom(&self) {
        self.metabox.set_scroll_top(self.metabox.scroll_height());
    }

    /// Run `append`, then scroll to the bottom if `decide` said to follow
    /// given the geometry measured beforehand.
    pub fn with_follow<T>(
        &mut self,
        decide: impl FnOnce(ScrollMetrics) -> FollowDecision,
        append: impl FnOnce(&mut Self) -> Result<T, JsValue>,
    ) -> Result<T, JsValue> {
        let decision = decide(self.metrics());
        let out = append(self)?;
        if decision == FollowDecision::Follow {
            self.scroll_to_bottom();
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Transcript
    // -----------------------------------------------------------------------

    pub fn append_entry(&self, html: &str) -> Result<Element, JsValue> {
        let entry = self.document.create_element("div")?;
        entry.set_attribute("class", ENTRY_CLASS)?;
        entry.set_inner_html(html);
        self.stream.append_child(&entry)?;
        Ok(entry)
    }

    pub fn set_status(&self, status: ConnectionStatus) -> Result<(), JsValue> {
        self.status.set_text_content(Some(&status.label()));
        self.status.set_attribute("class", status.css_class())
    }

    pub fn lock(&self) -> Result<(), JsValue> {
        self.metabox.style().set_property("pointer-events", "none")
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    pub fn append_prompt(&mut self, view: &PromptView) -> Result<(), JsValue> {
        let wrapper = self.document.create_element("div")?;
        wrapper.set_attribute("class", WRAPPER_CLASS)?;

        let prompt = self.document.create_element("div")?;
        prompt.set_attribute("class", PROMPT_CLASS)?;
        prompt.set_attribute("id", ACTIVE_PROMPT_ID)?;
        prompt.set_inner_html(&view.html);
        wrapper.append_child(&prompt)?;

        let button_box = self.document.create_element("div")?;
        button_box.set_attribute("class", BUTTON_BOX_CLASS)?;
        let id = view.id.get().to_string();
        for button in &view.buttons {
            let el = self.document.create_element("button")?;
            el.set_attribute("type", "button")?;
            el.set_attribute(DATA_PROMPT_ID, &id)?;
            el.set_attribute(DATA_PROMPT_ACTION, button.action_name())?;
            el.set_text_content(Some(button.label()));
            button_box.append_child(&el)?;
        }
        prompt.append_child(&button_box)?;

        self.stream.append_child(&wrapper)?;
        self.prompts.insert(view.id, prompt);
        Ok(())
    }

    /// Snapshot every `input` and `textarea` inside prompt `id`.
    #[must_use]
    pub fn read_fields(&self, id: PromptId) -> Vec<FormField> {
        let Some(prompt) = self.prompts.get(&id) else {
            return Vec::new();
        };
        let mut fields = Vec::new();
        for el in elements(&prompt.get_elements_by_tag_name("input")) {
            let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
                continue;
            };
            fields.push(FormField {
                name: input.name(),
                kind: FieldKind::from_input_type(&input.type_()),
                value: input.value(),
                checked: input.checked(),
            });
        }
        for el in elements(&prompt.get_elements_by_tag_name("textarea")) {
            let Ok(textarea) = el.dyn_into::<HtmlTextAreaElement>() else {
                continue;
            };
            fields.push(FormField::textarea(textarea.name(), textarea.value()));
        }
        fields
    }

    /// Fields to send with `button`; Back never reads the form.
    #[must_use]
    pub fn fields_for(&self, id: PromptId, button: PromptButton) -> Vec<FormField> {
        match button {
            PromptButton::Submit => self.read_fields(id),
            PromptButton::Back => Vec::new(),
        }
    }

    pub fn disable_prompt(&mut self, id: PromptId) -> Result<(), JsValue> {
        let Some(prompt) = self.prompts.remove(&id) else {
            return Ok(());
        };
        for tag in ["input", "textarea"] {
            for el in elements(&prompt.get_elements_by_tag_name(tag)) {
                el.set_attribute("disabled", "true")?;
            }
        }
        for el in elements(&prompt.get_elements_by_class_name(BUTTON_BOX_CLASS)) {
            el.set_inner_html("");
        }
        prompt.set_attribute("class", PROMPT_DISABLED_CLASS)?;
        prompt.remove_attribute("id")
    }
}

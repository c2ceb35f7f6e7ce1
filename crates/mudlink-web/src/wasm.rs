#![forbid(unsafe_code)]

//! `wasm-bindgen` entry point and event wiring.
//!
//! One [`App`] lives for the page lifetime behind `Rc<RefCell<_>>`. Every
//! socket or DOM event borrows it once, forwards the event to
//! [`ClientCore`], and executes the returned [`UiCommand`]s. Closures are
//! registered once and leaked; prompt buttons share a single delegated click
//! listener on the stream element.

use std::cell::RefCell;
use std::rc::Rc;

use mudlink_core::endpoint::{PageLocation, websocket_url};
use mudlink_core::{ClientConfig, ClientCore, ClientError, PromptButton, PromptId, UiCommand};
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Element, Event, MessageEvent, WebSocket};

use crate::console::{init_logging, install_panic_hook};
use crate::dom::{Dom, clicked_button};

struct App {
    core: ClientCore,
    dom: Dom,
    socket: WebSocket,
}

type Shared = Rc<RefCell<App>>;

impl App {
    fn apply(&mut self, commands: Vec<UiCommand>) {
        let Self { core, dom, socket } = self;
        for command in commands {
            let result = match command {
                UiCommand::AppendEntry { html } => dom
                    .with_follow(|m| core.follow_decision(m), |dom| dom.append_entry(&html))
                    .map(drop),
                UiCommand::AppendPrompt(view) => dom.with_follow(
                    |m| core.follow_decision(m),
                    |dom| dom.append_prompt(&view),
                ),
                UiCommand::DisablePrompt(id) => dom.disable_prompt(id),
                UiCommand::SetStatus(status) => dom.set_status(status),
                UiCommand::LockTranscript => dom.lock(),
                UiCommand::ScrollToBottom => {
                    dom.scroll_to_bottom();
                    Ok(())
                }
                UiCommand::Send(frame) => socket.send_with_str(&frame),
            };
            if let Err(err) = result {
                warn!(error = ?err, "ui command failed");
            }
        }
    }

    fn on_frame(&mut self, frame: &str) {
        match self.core.handle_frame(frame) {
            Ok(commands) => self.apply(commands),
            Err(err) => report(&err, "dropped inbound frame"),
        }
    }

    fn on_button(&mut self, id: PromptId, button: PromptButton) {
        let fields = self.dom.fields_for(id, button);
        match self.core.handle_button(id, button, &fields) {
            Ok(commands) => self.apply(commands),
            Err(err) => report(&err, "prompt action rejected"),
        }
    }
}

fn report(err: &ClientError, what: &str) {
    if err.is_recoverable() {
        warn!(%err, "{what}");
    } else {
        error!(%err, "{what}");
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Start the client on the current page.
///
/// `config_json` is an optional JSON object overriding
/// [`ClientConfig`] defaults. Call once, after the DOM has loaded.
#[wasm_bindgen]
pub fn start_client(config_json: Option<String>) -> Result<(), JsValue> {
    install_panic_hook();
    let config = ClientConfig::from_optional_json(config_json.as_deref()).map_err(js_error)?;
    init_logging(&config.log_level);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let dom = Dom::resolve(&document, &config.dom)?;

    let location = window.location();
    let page = PageLocation::new(location.protocol()?, location.hostname()?, location.port()?);
    let url = websocket_url(&page, &config.socket_path);
    info!(%url, "opening websocket");
    let socket = WebSocket::new(&url)?;

    let stream = dom.stream().clone();
    let app: Shared = Rc::new(RefCell::new(App {
        core: ClientCore::new(&config),
        dom,
        socket: socket.clone(),
    }));

    install_socket_handlers(&socket, &app);
    install_click_handler(&stream, &app)?;
    install_resize_handler(&window, &app)?;
    Ok(())
}

fn install_socket_handlers(socket: &WebSocket, app: &Shared) {
    let on_open = {
        let app = Rc::clone(app);
        Closure::wrap(Box::new(move |_: Event| {
            let mut app = app.borrow_mut();
            let commands = app.core.handle_open();
            app.apply(commands);
        }) as Box<dyn FnMut(_)>)
    };
    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    on_open.forget();

    let on_message = {
        let app = Rc::clone(app);
        Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(frame) = event.data().as_string() else {
                warn!("ignoring non-text frame");
                return;
            };
            app.borrow_mut().on_frame(&frame);
        }) as Box<dyn FnMut(_)>)
    };
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    let on_close = {
        let app = Rc::clone(app);
        Closure::wrap(Box::new(move |event: CloseEvent| {
            debug!(code = event.code(), reason = %event.reason(), "socket close event");
            let mut app = app.borrow_mut();
            let commands = app.core.handle_close();
            app.apply(commands);
        }) as Box<dyn FnMut(_)>)
    };
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();

    let on_error = Closure::wrap(Box::new(move |_: Event| {
        warn!("websocket error");
    }) as Box<dyn FnMut(_)>);
    socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();
}

fn install_click_handler(stream: &Element, app: &Shared) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        if let Some((id, button)) = clicked_button(&event) {
            app.borrow_mut().on_button(id, button);
        }
    }) as Box<dyn FnMut(_)>);
    stream.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn install_resize_handler(window: &web_sys::Window, app: &Shared) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let on_resize = Closure::wrap(Box::new(move |_: Event| {
        let mut app = app.borrow_mut();
        let commands = app.core.handle_resize();
        app.apply(commands);
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

//! Browser implementation of the cross-origin channel: a hidden iframe plus a
//! window `message` listener.
//!
//! TRADE-OFFS
//! ==========
//! Message payloads cross into Rust through `JSON.stringify`, so anything the
//! other origin posts that is not JSON-representable arrives as `null` and is
//! ignored by the handshake like any other malformed payload.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use futures::channel::mpsc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::auth_handshake::{CrossOriginChannel, HandshakeError, InboundMessage};

type MessageListener = Closure<dyn FnMut(web_sys::MessageEvent)>;

/// Hidden-iframe channel on the current window.
#[derive(Clone, Copy, Debug, Default)]
pub struct IframeChannel;

impl CrossOriginChannel for IframeChannel {
    type Handle = web_sys::HtmlIFrameElement;
    type Messages = MessageStream;

    fn open(&self, url: &str) -> Result<Self::Handle, HandshakeError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| HandshakeError::Channel("no document".to_owned()))?;
        let body = document.body().ok_or_else(|| HandshakeError::Channel("no document body".to_owned()))?;

        let iframe = document
            .create_element("iframe")
            .map_err(|e| HandshakeError::Channel(format!("{e:?}")))?
            .dyn_into::<web_sys::HtmlIFrameElement>()
            .map_err(|_| HandshakeError::Channel("created element is not an iframe".to_owned()))?;
        iframe.set_src(url);
        let _ = iframe.set_attribute("aria-hidden", "true");
        let _ = iframe.style().set_property("display", "none");

        body.append_child(&iframe).map_err(|e| HandshakeError::Channel(format!("{e:?}")))?;
        Ok(iframe)
    }

    fn on_message(&self) -> Self::Messages {
        let (tx, rx) = mpsc::unbounded();
        let Some(window) = web_sys::window() else {
            // Sender dropped here, so the stream ends immediately.
            return MessageStream { rx, registration: None };
        };

        let listener = MessageListener::wrap(Box::new(move |event: web_sys::MessageEvent| {
            let data = js_sys::JSON::stringify(&event.data())
                .ok()
                .map(String::from)
                .and_then(|raw| serde_json::from_str(&raw).ok())
                .unwrap_or(serde_json::Value::Null);
            let _ = tx.unbounded_send(InboundMessage { origin: event.origin(), data });
        }) as Box<dyn FnMut(web_sys::MessageEvent)>);

        if window
            .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
            .is_err()
        {
            leptos::logging::warn!("iframe channel: failed to register message listener");
            return MessageStream { rx, registration: None };
        }
        MessageStream { rx, registration: Some((window, listener)) }
    }

    fn close(&self, handle: Self::Handle) {
        handle.remove();
    }
}

/// Stream of window messages; dropping it unregisters the listener.
pub struct MessageStream {
    rx: mpsc::UnboundedReceiver<InboundMessage>,
    registration: Option<(web_sys::Window, MessageListener)>,
}

impl Stream for MessageStream {
    type Item = InboundMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl Drop for MessageStream {
    fn drop(&mut self) {
        if let Some((window, listener)) = self.registration.take() {
            let _ = window.remove_event_listener_with_callback("message", listener.as_ref().unchecked_ref());
        }
    }
}

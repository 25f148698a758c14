//! The decorator listener.

use doxen_core::{Event, Leaf, Listener, MarkupConverter, NodeEvent, SignalEvent};
use doxen_markdown::MarkdownConverter;

use crate::resolve::{IMAGE_LINK_PARAM, resolve_image};
use crate::response::jpeg_response;
use crate::signal::Signal;

/// Listener that renders text leaves and serves document images.
///
/// On node events, the content of text and file leaves is replaced by its
/// rendered markup. Containers and assets are left alone.
///
/// On the `parsedown2image` signal, the image named by the `imageLink`
/// parameter is loaded from the page's directory and sent as a JPEG. Every
/// failure produces the error image instead, so a recognized signal always
/// yields exactly one response. Other signals are ignored.
#[derive(Clone, Debug)]
pub struct Decorator<C = MarkdownConverter> {
    converter: C,
}

impl Decorator {
    /// Create a decorator with the markdown converter, routing document
    /// images through the image signal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_converter(MarkdownConverter::new().with_image_signal(Signal::Image.as_str()))
    }
}

impl Default for Decorator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MarkupConverter> Decorator<C> {
    /// Create a decorator with a custom converter.
    pub fn with_converter(converter: C) -> Self {
        Self { converter }
    }

    fn decorate_node(&self, event: NodeEvent<'_>) {
        let NodeEvent { node, control } = event;
        let Some(text) = node.as_leaf_mut().and_then(Leaf::text_mut) else {
            return;
        };
        *text = self.converter.render(text, control);
    }

    fn decorate_signal(event: SignalEvent<'_>) {
        match event.signal.parse::<Signal>() {
            Ok(Signal::Image) => Self::process_image(event),
            Err(err) => tracing::trace!(page = %event.control.page(), "{err}, ignoring"),
        }
    }

    fn process_image(event: SignalEvent<'_>) {
        let SignalEvent { control, tree, .. } = event;
        let image = resolve_image(tree, control.page(), control.parameter(IMAGE_LINK_PARAM));
        control.send_response(jpeg_response(image));
    }
}

impl<C: MarkupConverter> Listener for Decorator<C> {
    fn listen(&self, event: Event<'_>) {
        match event {
            Event::Node(event) => self.decorate_node(event),
            Event::Signal(event) => Self::decorate_signal(event),
        }
    }
}

//! One-shot fallback substitution for rendering surfaces that fail to load.
//!
//! A [`LoadErrorHandler`] is a two-state machine. While `Armed`, the first
//! failure signal swaps the surface's source for the fallback and moves it to
//! `Fired`; a fired handler never acts again and asks to be detached. If the
//! fallback itself fails to load, the surface keeps showing it and nothing
//! retries.

use crate::url_model::ResolvedUrl;

/// Anything that displays an image from a source URL and can hold one
/// failure listener.
pub trait RenderSurface {
    fn source(&self) -> &str;
    fn set_source(&mut self, url: ResolvedUrl);

    /// Registered failure listener, if any.
    fn error_handler(&self) -> Option<&LoadErrorHandler>;
    fn error_handler_slot(&mut self) -> &mut Option<LoadErrorHandler>;

    /// True while a handler is registered for the failure signal.
    fn has_error_handler(&self) -> bool {
        self.error_handler().is_some()
    }

    /// Deliver a load-failure signal. Returns true if a handler acted on it.
    fn signal_load_error(&mut self) -> bool {
        let Some(mut handler) = self.error_handler_slot().take() else {
            tracing::trace!(src = self.source(), "load error with no handler attached");
            return false;
        };
        // The handler is out of its slot while it runs, so it stays detached
        // whatever the disposition.
        matches!(handler.on_load_error(self), Disposition::Substituted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Armed,
    Fired,
}

/// What the surface should do with the handler after a failure signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Handler substituted the fallback; deregister it.
    Substituted,
    /// Handler had already fired and did nothing; deregister it.
    AlreadyFired,
}

#[derive(Debug, Clone)]
pub struct LoadErrorHandler {
    fallback: ResolvedUrl,
    state: HandlerState,
}

impl LoadErrorHandler {
    pub fn new(fallback: ResolvedUrl) -> Self {
        Self {
            fallback,
            state: HandlerState::Armed,
        }
    }

    pub fn state(&self) -> HandlerState {
        self.state
    }

    pub fn fallback(&self) -> &ResolvedUrl {
        &self.fallback
    }

    /// React to a load failure on `surface`.
    pub fn on_load_error<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Disposition {
        match self.state {
            HandlerState::Armed => {
                tracing::debug!(
                    failed = surface.source(),
                    fallback = %self.fallback,
                    "image load failed, substituting fallback"
                );
                surface.set_source(self.fallback.clone());
                self.state = HandlerState::Fired;
                Disposition::Substituted
            }
            HandlerState::Fired => Disposition::AlreadyFired,
        }
    }
}

/// In-memory image surface: a source URL plus an optional failure listener.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    src: String,
    on_error: Option<LoadErrorHandler>,
}

impl ImageSurface {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            on_error: None,
        }
    }
}

impl RenderSurface for ImageSurface {
    fn source(&self) -> &str {
        &self.src
    }

    fn set_source(&mut self, url: ResolvedUrl) {
        self.src = url.into_string();
    }

    fn error_handler(&self) -> Option<&LoadErrorHandler> {
        self.on_error.as_ref()
    }

    fn error_handler_slot(&mut self) -> &mut Option<LoadErrorHandler> {
        &mut self.on_error
    }
}

/// Arm a one-shot handler on `surface` that swaps in `fallback` on the first
/// load failure. Replaces any handler already attached.
pub fn attach_load_error_handler<S>(surface: &mut S, fallback: ResolvedUrl)
where
    S: RenderSurface + ?Sized,
{
    *surface.error_handler_slot() = Some(LoadErrorHandler::new(fallback));
}

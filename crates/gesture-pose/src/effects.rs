use crate::classify::Gesture;
use crate::error::Result;

/// Page action triggered by a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the page for the given location.
    Navigate(String),
    /// Scroll vertically by this many pixels; positive scrolls down.
    ScrollBy(i32),
}

impl Effect {
    /// Map a gesture to the action it triggers, if any.
    pub fn for_gesture(gesture: Gesture, navigate_target: &str, scroll_delta: i32) -> Option<Self> {
        match gesture {
            Gesture::HandsUp => Some(Effect::Navigate(navigate_target.to_string())),
            Gesture::ScrollDown => Some(Effect::ScrollBy(scroll_delta)),
            Gesture::ScrollUp => Some(Effect::ScrollBy(-scroll_delta)),
            Gesture::None => None,
        }
    }
}

/// Receiver of page actions.
///
/// Implementations wrap whatever actually moves the page: a browser bridge,
/// a window manager, or the in-memory [`PageState`].
pub trait EffectSink {
    fn apply(&mut self, effect: Effect) -> Result<()>;
}

impl<S: EffectSink + ?Sized> EffectSink for &mut S {
    fn apply(&mut self, effect: Effect) -> Result<()> {
        (**self).apply(effect)
    }
}

/// In-memory page: where it is and how far it is scrolled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    scroll_offset: i64,
    location: Option<String>,
    navigations: usize,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical scroll offset in pixels. Never negative.
    pub fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    /// Last navigation target, `None` while still on the starting page.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn navigations(&self) -> usize {
        self.navigations
    }
}

impl EffectSink for PageState {
    fn apply(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::Navigate(target) => {
                self.location = Some(target);
                self.navigations += 1;
            }
            Effect::ScrollBy(delta) => {
                // Like a browser viewport, scrolling stops at the top.
                self.scroll_offset = (self.scroll_offset + i64::from(delta)).max(0);
            }
        }
        Ok(())
    }
}

/// Sink adapter that logs every effect before forwarding it.
#[derive(Debug)]
pub struct LoggingSink<S> {
    inner: S,
}

impl<S: EffectSink> LoggingSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EffectSink> EffectSink for LoggingSink<S> {
    fn apply(&mut self, effect: Effect) -> Result<()> {
        match &effect {
            Effect::Navigate(target) => log::info!("navigate to {}", target),
            Effect::ScrollBy(delta) => log::info!("scroll by {}", delta),
        }
        self.inner.apply(effect)
    }
}

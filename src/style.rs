/// Color-inversion style injection
///
/// Dark mode on a page is exactly one thing: a `<style>` element with the
/// reserved id `config::MARKER_ID`. `StyleInjector` adds or removes it through
/// a `StyleHost`, which is the real DOM in the browser (`crate::dom`) and a
/// fake in tests.

use crate::config::TRANSITION_SECS;
use crate::host::{HostError, PageCommand};
use serde_json::Value;
use std::cell::Cell;

const INVERT_FILTER: &str = "filter: invert(1) hue-rotate(180deg) !important;";

/// Payload variants of the injected stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvertStyle {
    /// Used on page load, where a fade would show as a flash
    Immediate,
    /// Used for user-triggered toggles
    Animated,
}

/// Build the stylesheet text for a payload variant
pub fn invert_css(style: InvertStyle) -> String {
    let transition = match style {
        InvertStyle::Immediate => String::new(),
        InvertStyle::Animated => format!("\n  transition: filter {}s ease !important;", TRANSITION_SECS),
    };

    format!(
        "html {{\n  {filter}{transition}\n}}\n\
         img, video, iframe, canvas, svg {{\n  {filter}\n}}\n\
         [style*=\"background-image\"] {{\n  {filter}\n}}\n",
        filter = INVERT_FILTER,
        transition = transition,
    )
}

/// Whether the marker element is on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Active,
    Inactive,
}

impl MarkerState {
    pub fn from_present(present: bool) -> Self {
        if present { MarkerState::Active } else { MarkerState::Inactive }
    }

    pub fn is_active(self) -> bool {
        self == MarkerState::Active
    }

    /// Next state and whether anything changed
    pub fn activate(self) -> (MarkerState, bool) {
        (MarkerState::Active, self == MarkerState::Inactive)
    }

    pub fn deactivate(self) -> (MarkerState, bool) {
        (MarkerState::Inactive, self == MarkerState::Active)
    }

    pub fn toggled(self) -> MarkerState {
        match self {
            MarkerState::Active => MarkerState::Inactive,
            MarkerState::Inactive => MarkerState::Active,
        }
    }
}

/// Document operations the injector needs
pub trait StyleHost {
    fn has_marker(&self) -> bool;

    fn head_ready(&self) -> bool;

    /// Append the marker with `css` to the head; the head must exist
    fn attach_marker(&self, css: &str) -> Result<(), HostError>;

    /// Detach the marker; returns whether one was present
    fn detach_marker(&self) -> bool;

    /// Attach the marker once the head exists, at most once
    fn attach_when_ready(&self, css: String) -> Result<(), HostError>;
}

/// A pending insert that waits for `<head>`
///
/// Several triggers (load event, DOM mutations) may call `attempt`; only the
/// first one that sees a head does anything. Once it ran, later triggers are
/// no-ops even if the marker was removed in between.
#[derive(Debug)]
pub struct DeferredAttach {
    css: String,
    done: Cell<bool>,
}

impl DeferredAttach {
    pub fn new(css: String) -> Self {
        DeferredAttach { css, done: Cell::new(false) }
    }

    pub fn is_done(&self) -> bool {
        self.done.get()
    }

    /// Returns true on the call that completed the attachment
    pub fn attempt<H: StyleHost>(&self, host: &H) -> bool {
        if self.done.get() || !host.head_ready() {
            return false;
        }
        self.done.set(true);

        if !host.has_marker() {
            if let Err(e) = host.attach_marker(&self.css) {
                log::warn!("Deferred dark mode insert failed: {}", e);
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Attached,
    AlreadyActive,
    Deferred,
}

pub struct StyleInjector<H> {
    host: H,
}

impl<H: StyleHost> StyleInjector<H> {
    pub fn new(host: H) -> Self {
        StyleInjector { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn state(&self) -> MarkerState {
        MarkerState::from_present(self.host.has_marker())
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn apply(&self, style: InvertStyle) -> Result<ApplyOutcome, HostError> {
        let (_, changed) = self.state().activate();
        if !changed {
            return Ok(ApplyOutcome::AlreadyActive);
        }

        let css = invert_css(style);
        if self.host.head_ready() {
            self.host.attach_marker(&css)?;
            log::debug!("Dark mode style attached ({:?})", style);
            Ok(ApplyOutcome::Attached)
        } else {
            self.host.attach_when_ready(css)?;
            log::debug!("Document head missing, dark mode style deferred");
            Ok(ApplyOutcome::Deferred)
        }
    }

    pub fn remove(&self) -> bool {
        let (_, changed) = self.state().deactivate();
        changed && self.host.detach_marker()
    }
}

/// Run a remotely requested command against the page
///
/// `IsActive` answers the current state; the other commands answer the state
/// after running. Failures leave the page untouched and answer `false`.
pub fn run_page_command<H: StyleHost>(injector: &StyleInjector<H>, command: PageCommand) -> Value {
    let active = match command {
        PageCommand::IsActive => injector.is_active(),
        PageCommand::Remove => {
            injector.remove();
            false
        }
        PageCommand::ApplyImmediate | PageCommand::ApplyAnimated => {
            let style = if command == PageCommand::ApplyImmediate {
                InvertStyle::Immediate
            } else {
                InvertStyle::Animated
            };
            match injector.apply(style) {
                Ok(_) => true,
                Err(e) => {
                    log::warn!("Failed to apply dark mode: {}", e);
                    false
                }
            }
        }
    };
    Value::Bool(active)
}

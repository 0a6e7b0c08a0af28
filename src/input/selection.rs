use std::{fmt, sync::Arc};

use crate::{
    data::result::SearchResult,
    layers::marker::ActionControl,
    macros::{map_debug, map_trace},
};

/// Host callback receiving the result whose marker was selected
pub type SelectionCallback = Box<dyn FnMut(Arc<SearchResult>)>;

/// Turns taps on a marker's detail control into one host callback.
///
/// At most one callback is registered; registering again replaces it.
#[derive(Default)]
pub struct SelectionRouter {
    callback: Option<SelectionCallback>,
}

impl SelectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: impl FnMut(Arc<SearchResult>) + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn set_callback(&mut self, callback: impl FnMut(Arc<SearchResult>) + 'static) {
        if self.callback.is_some() {
            map_debug!("replacing selection callback");
        }
        self.callback = Some(Box::new(callback));
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Delivers the control's bound result. Returns whether the callback ran.
    pub fn on_action(&mut self, control: &ActionControl) -> bool {
        let Some(result) = control.payload() else {
            map_trace!("ignoring tap on control without a bound result");
            return false;
        };
        match self.callback.as_mut() {
            Some(callback) => {
                map_debug!("selected result {}", result.id);
                callback(Arc::clone(result));
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for SelectionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionRouter")
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

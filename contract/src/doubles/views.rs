//! Recording view renderer

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::ViewRenderer;
use crate::domain::request::Assigns;

/// One `render` call
#[derive(Debug, Clone)]
pub struct Rendered {
    pub template: String,
    pub assigns: Assigns,
}

/// Records which template was rendered with which view variables
#[derive(Default)]
pub struct ViewRecorder {
    renders: Mutex<Vec<Rendered>>,
}

impl ViewRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Rendered> {
        self.lock().last().cloned()
    }

    pub fn render_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Rendered>> {
        self.renders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ViewRenderer for ViewRecorder {
    fn render(&self, template: &str, assigns: Assigns) -> String {
        let body = format!("<!-- rendered {} -->", template);
        self.lock().push(Rendered {
            template: template.to_string(),
            assigns,
        });
        body
    }
}

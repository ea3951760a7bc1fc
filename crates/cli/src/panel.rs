// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output containers.
//!
//! Every command writes one `<div id="CONTAINER">` fragment. A container is
//! either loading (fetch in flight), ready (rendered content) or in its
//! error state.

use std::fmt;
use tix_core::html::escape;

/// The page element a command renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Tree,
    Burndown,
    Churn,
}

impl Container {
    pub fn id(&self) -> &'static str {
        match self {
            Container::Tree => "tree",
            Container::Burndown => "burndown-chart",
            Container::Churn => "churn-chart",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// State of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Loading,
    /// Rendered markup, inserted verbatim.
    Ready(String),
    /// Failure message, escaped on output.
    Error(String),
}

impl Panel {
    pub fn fragment(&self, container: Container) -> String {
        let id = container.id();
        match self {
            Panel::Loading => format!(r#"<div id="{id}"><div class="spinner"></div></div>"#),
            Panel::Ready(html) => format!(r#"<div id="{id}">{html}</div>"#),
            Panel::Error(message) => format!(
                r#"<div id="{id}" class="error">failed to load: {}</div>"#,
                escape(message)
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Panel::Error(_))
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;

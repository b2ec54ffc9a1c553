//! Root navigation shell.
//!
//! A single stack rooted at the tabs screen, plus a modal stack drawn on top
//! of it. Routes use the same path scheme as the mobile app so deep links
//! like `/listing/10003` resolve to screens.

/// Every screen the shell can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Home tabs (explorer header + listing feed).
    Tabs,
    /// "Log in or sign up" modal.
    Login,
    /// "Where to?" booking modal.
    Booking,
    /// Listing detail.
    Listing { id: String },
}

/// How a route is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Stack,
    Modal,
}

impl Route {
    pub fn presentation(&self) -> Presentation {
        match self {
            Self::Login | Self::Booking => Presentation::Modal,
            Self::Tabs | Self::Listing { .. } => Presentation::Stack,
        }
    }

    /// Header title. Empty for screens that draw their own header.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Log in or sign up",
            Self::Booking => "Booking",
            Self::Tabs | Self::Listing { .. } => "",
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Tabs => "/(tabs)".to_string(),
            Self::Login => "/(modals)/login".to_string(),
            Self::Booking => "/(modals)/booking".to_string(),
            Self::Listing { id } => format!("/listing/{}", id),
        }
    }

    /// Resolve a path. Unknown paths return `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim().trim_end_matches('/');
        match path {
            "" | "/" | "/(tabs)" => Some(Self::Tabs),
            "/(modals)/login" | "/login" => Some(Self::Login),
            "/(modals)/booking" | "/booking" => Some(Self::Booking),
            _ => {
                let id = path.strip_prefix("/listing/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some(Self::Listing { id: id.to_string() })
            }
        }
    }
}

/// Navigation state: stack screens plus modals on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    stack: Vec<Route>,
    modals: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start at the tabs root.
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Tabs],
            modals: Vec::new(),
        }
    }

    /// Top-most route, modals first.
    pub fn current(&self) -> &Route {
        self.modals
            .last()
            .or_else(|| self.stack.last())
            .unwrap_or(&Route::Tabs)
    }

    /// Top-most stack route, ignoring modals.
    pub fn current_screen(&self) -> &Route {
        self.stack.last().unwrap_or(&Route::Tabs)
    }

    /// Top-most modal, if any.
    pub fn current_modal(&self) -> Option<&Route> {
        self.modals.last()
    }

    /// Push a route, presenting it as a modal when that is its presentation.
    pub fn push(&mut self, route: Route) {
        tracing::debug!(path = %route.to_path(), "Navigating (push)");
        match route.presentation() {
            Presentation::Modal => self.modals.push(route),
            Presentation::Stack => self.stack.push(route),
        }
    }

    /// Go to `route`, reusing an existing entry when one is already open.
    ///
    /// Navigating to a stack route closes all modals and pops back to the
    /// route if it is in the stack; otherwise it is pushed.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(path = %route.to_path(), "Navigating");
        match route.presentation() {
            Presentation::Modal => {
                if let Some(pos) = self.modals.iter().position(|r| *r == route) {
                    self.modals.truncate(pos + 1);
                } else {
                    self.modals.push(route);
                }
            }
            Presentation::Stack => {
                self.modals.clear();
                if let Some(pos) = self.stack.iter().position(|r| *r == route) {
                    self.stack.truncate(pos + 1);
                } else {
                    self.stack.push(route);
                }
            }
        }
    }

    /// Dismiss the top modal, or pop the stack. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.modals.pop().is_some() {
            return true;
        }
        if self.stack.len() > 1 {
            self.stack.pop();
            return true;
        }
        false
    }

    pub fn dismiss_modal(&mut self) -> bool {
        self.modals.pop().is_some()
    }

    pub fn has_modal(&self) -> bool {
        !self.modals.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len() + self.modals.len()
    }
}

//! Keybinding registry — maps actions to key events with config overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    NextCategory,
    PrevCategory,
    ClearCategory,
    Select,
    Back,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    Share,
    OpenInBrowser,
    OpenSearch,
    OpenLogin,
    SignOut,
    SignInGoogle,
    SignInApple,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Next item",
            Self::NavUp => "Previous item",
            Self::NextCategory => "Next category",
            Self::PrevCategory => "Previous category",
            Self::ClearCategory => "Show all listings",
            Self::Select => "Open / confirm",
            Self::Back => "Go back / close",
            Self::ScrollDown => "Scroll down",
            Self::ScrollUp => "Scroll up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::Share => "Share listing",
            Self::OpenInBrowser => "Open listing in browser",
            Self::OpenSearch => "Where to?",
            Self::OpenLogin => "Log in or sign up",
            Self::SignOut => "Sign out",
            Self::SignInGoogle => "Continue with Google",
            Self::SignInApple => "Continue with Apple",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context — determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Feed,
    Detail,
    Login,
    Booking,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Left", "Right", "Space"
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then_some(KeySpec::ctrl(c));
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then_some(KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(KeySpec::ch(c))
}

/// Format a KeySpec for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// fall back to `Global` when the context has no binding.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings, in registration order, for the help screen.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Context::*;

        let defaults = [
            // === Global ===
            (Global, KeySpec::ch('q'), Action::Quit),
            (Global, KeySpec::ctrl('c'), Action::Quit),
            (Global, KeySpec::plain(KeyCode::Esc), Action::Back),
            (Global, KeySpec::ch('T'), Action::CycleTheme),
            (Global, KeySpec::ch('?'), Action::ShowHelp),
            // === Home feed ===
            (Feed, KeySpec::ch('j'), Action::NavDown),
            (Feed, KeySpec::plain(KeyCode::Down), Action::NavDown),
            (Feed, KeySpec::ch('k'), Action::NavUp),
            (Feed, KeySpec::plain(KeyCode::Up), Action::NavUp),
            (Feed, KeySpec::ch('l'), Action::NextCategory),
            (Feed, KeySpec::plain(KeyCode::Right), Action::NextCategory),
            (Feed, KeySpec::plain(KeyCode::Tab), Action::NextCategory),
            (Feed, KeySpec::ch('h'), Action::PrevCategory),
            (Feed, KeySpec::plain(KeyCode::Left), Action::PrevCategory),
            (Feed, KeySpec::plain(KeyCode::BackTab), Action::PrevCategory),
            (Feed, KeySpec::ch('0'), Action::ClearCategory),
            (Feed, KeySpec::plain(KeyCode::Enter), Action::Select),
            (Feed, KeySpec::ch('/'), Action::OpenSearch),
            (Feed, KeySpec::ch('L'), Action::OpenLogin),
            (Feed, KeySpec::ch('X'), Action::SignOut),
            // === Listing detail ===
            (Detail, KeySpec::ch('j'), Action::ScrollDown),
            (Detail, KeySpec::plain(KeyCode::Down), Action::ScrollDown),
            (Detail, KeySpec::ch('k'), Action::ScrollUp),
            (Detail, KeySpec::plain(KeyCode::Up), Action::ScrollUp),
            (Detail, KeySpec::ctrl('d'), Action::PageDown),
            (Detail, KeySpec::plain(KeyCode::PageDown), Action::PageDown),
            (Detail, KeySpec::ctrl('u'), Action::PageUp),
            (Detail, KeySpec::plain(KeyCode::PageUp), Action::PageUp),
            (Detail, KeySpec::ch('b'), Action::Back),
            (Detail, KeySpec::ch('s'), Action::Share),
            (Detail, KeySpec::ch('o'), Action::OpenInBrowser),
            // === Login modal ===
            (Login, KeySpec::ch('j'), Action::NavDown),
            (Login, KeySpec::plain(KeyCode::Down), Action::NavDown),
            (Login, KeySpec::plain(KeyCode::Tab), Action::NavDown),
            (Login, KeySpec::ch('k'), Action::NavUp),
            (Login, KeySpec::plain(KeyCode::Up), Action::NavUp),
            (Login, KeySpec::plain(KeyCode::Enter), Action::Select),
            (Login, KeySpec::ch('g'), Action::SignInGoogle),
            (Login, KeySpec::ch('a'), Action::SignInApple),
            // === Booking modal ===
            (Booking, KeySpec::plain(KeyCode::Enter), Action::Back),
        ];

        for (context, key, action) in defaults {
            self.bind(context, key, action);
        }
    }

    /// Apply user overrides from the config keybindings map.
    ///
    /// Keys are action names (e.g., "quit", "next_category"), values are key
    /// strings (e.g., "q", "Ctrl+d", "F5"). An override replaces every
    /// default key of that action, in each context it was bound in.
    ///
    /// Returns a warning per unrecognized action name or unparseable key.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, trying `context` first, then Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        // Terminals report Shift alongside uppercase chars and BackTab
        let modifiers = match code {
            KeyCode::Char(_) | KeyCode::BackTab => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        let key = KeySpec::new(code, modifiers);

        self.lookup.get(&(context, key)).copied().or_else(|| {
            (context != Context::Global)
                .then(|| self.lookup.get(&(Context::Global, key)).copied())
                .flatten()
        })
    }

    /// All bindings as (context, key label, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name from config.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "next_category" => Some(Action::NextCategory),
        "prev_category" | "previous_category" => Some(Action::PrevCategory),
        "clear_category" | "all" => Some(Action::ClearCategory),
        "select" | "enter" => Some(Action::Select),
        "back" => Some(Action::Back),
        "scroll_down" => Some(Action::ScrollDown),
        "scroll_up" => Some(Action::ScrollUp),
        "page_down" => Some(Action::PageDown),
        "page_up" => Some(Action::PageUp),
        "share" => Some(Action::Share),
        "open_in_browser" | "open" => Some(Action::OpenInBrowser),
        "open_search" | "search" => Some(Action::OpenSearch),
        "open_login" | "login" => Some(Action::OpenLogin),
        "sign_out" | "logout" => Some(Action::SignOut),
        "sign_in_google" | "google" => Some(Action::SignInGoogle),
        "sign_in_apple" | "apple" => Some(Action::SignInApple),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(c: char) -> (KeyCode, KeyModifiers) {
        (KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_global_quit_reachable_from_every_context() {
        let reg = KeybindingRegistry::new();
        let (code, mods) = plain('q');
        for ctx in [
            Context::Global,
            Context::Feed,
            Context::Detail,
            Context::Login,
            Context::Booking,
        ] {
            assert_eq!(reg.action_for_key(code, mods, ctx), Some(Action::Quit));
        }
    }

    #[test]
    fn test_same_key_differs_by_context() {
        let reg = KeybindingRegistry::new();
        let (code, mods) = plain('j');
        assert_eq!(reg.action_for_key(code, mods, Context::Feed), Some(Action::NavDown));
        assert_eq!(
            reg.action_for_key(code, mods, Context::Detail),
            Some(Action::ScrollDown)
        );
    }

    #[test]
    fn test_shifted_keys_match_plain_bindings() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('X'), KeyModifiers::SHIFT, Context::Feed),
            Some(Action::SignOut)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::BackTab, KeyModifiers::SHIFT, Context::Feed),
            Some(Action::PrevCategory)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('T'), KeyModifiers::SHIFT, Context::Detail),
            Some(Action::CycleTheme)
        );
    }

    #[test]
    fn test_unbound_key_is_none() {
        let reg = KeybindingRegistry::new();
        let (code, mods) = plain('z');
        assert_eq!(reg.action_for_key(code, mods, Context::Feed), None);
    }

    #[test]
    fn test_parse_key_string_formats() {
        assert_eq!(parse_key_string("q"), Some(KeySpec::ch('q')));
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(
            parse_key_string("enter"),
            Some(KeySpec::plain(KeyCode::Enter))
        );
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("Space"), Some(KeySpec::ch(' ')));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("Ctrl+ab"), None);
        assert_eq!(parse_key_string("abc"), None);
        assert_eq!(parse_key_string(""), None);
    }

    #[test]
    fn test_override_replaces_default_key() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("next_category".to_string(), "n".to_string())]);
        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        let (code, mods) = plain('n');
        assert_eq!(
            reg.action_for_key(code, mods, Context::Feed),
            Some(Action::NextCategory)
        );
        let (code, mods) = plain('l');
        assert_eq!(reg.action_for_key(code, mods, Context::Feed), None);
    }

    #[test]
    fn test_override_warnings() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([
            ("teleport".to_string(), "t".to_string()),
            ("share".to_string(), "NotAKey".to_string()),
        ]);
        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 2);
        // The unparseable override left the default untouched
        let (code, mods) = plain('s');
        assert_eq!(
            reg.action_for_key(code, mods, Context::Detail),
            Some(Action::Share)
        );
    }

    #[test]
    fn test_all_bindings_describe_actions() {
        let reg = KeybindingRegistry::new();
        let bindings = reg.all_bindings();
        assert!(bindings
            .iter()
            .any(|(ctx, key, action, _)| *ctx == Context::Detail
                && key == "Ctrl+d"
                && *action == Action::PageDown));
        assert!(bindings.iter().all(|(_, _, _, desc)| !desc.is_empty()));
    }
}

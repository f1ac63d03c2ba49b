//! UI context chain
//!
//! Widgets receive a `&dyn UiContext` and find the screen, lifecycle or
//! theme by walking `base_context()` links outward, like an overlay wrapped
//! around a screen wrapped around the app. Every walk is bounded by
//! [`MAX_CONTEXT_DEPTH`], so a malformed chain fails instead of spinning.
//!
//! The [`ContextRegistry`] is the fallback for code that is not attached to
//! a chain (a dialog opened from a background notice, for instance). It is
//! created once at startup and passed down explicitly.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use ratatui::style::Color;

use super::theme::{Theme, ThemeAttr};
use crate::error::ContextError;
use crate::lifecycle::Lifecycle;

/// Longest chain a lookup will follow
pub const MAX_CONTEXT_DEPTH: usize = 16;

/// A node in the context chain
pub trait UiContext: Any + Send + Sync {
    /// The context this one wraps, if any
    fn base_context(&self) -> Option<&dyn UiContext>;

    fn as_any(&self) -> &dyn Any;

    /// Set on nodes that represent a whole screen
    fn as_screen(&self) -> Option<&dyn Screen> {
        None
    }

    fn lifecycle(&self) -> Option<Lifecycle> {
        None
    }

    fn theme(&self) -> Option<Theme> {
        None
    }
}

/// A screen-level node: identity plus its own lifecycle
pub trait Screen {
    fn screen_id(&self) -> &str;
    fn title(&self) -> &str;
    fn screen_lifecycle(&self) -> &Lifecycle;
}

fn walk<'a, R>(
    ctx: &'a dyn UiContext,
    capability: &'static str,
    mut visit: impl FnMut(&'a dyn UiContext) -> Option<R>,
) -> Result<R, ContextError> {
    let mut node = Some(ctx);
    let mut depth = 0;
    while let Some(current) = node {
        if depth >= MAX_CONTEXT_DEPTH {
            return Err(ContextError::DepthExceeded {
                limit: MAX_CONTEXT_DEPTH,
            });
        }
        if let Some(found) = visit(current) {
            return Ok(found);
        }
        node = current.base_context();
        depth += 1;
    }
    Err(ContextError::NotFound { capability })
}

/// Nearest node of concrete type `T`, starting at `ctx` itself
pub fn find_context<T: UiContext>(ctx: &dyn UiContext) -> Result<&T, ContextError> {
    walk(ctx, type_name::<T>(), |node| node.as_any().downcast_ref::<T>())
}

pub fn screen_of(ctx: &dyn UiContext) -> Result<&dyn Screen, ContextError> {
    walk(ctx, "screen", |node| node.as_screen())
}

pub fn lifecycle_of(ctx: &dyn UiContext) -> Result<Lifecycle, ContextError> {
    walk(ctx, "lifecycle", |node| node.lifecycle())
}

pub fn theme_of(ctx: &dyn UiContext) -> Result<Theme, ContextError> {
    walk(ctx, "theme", |node| node.theme())
}

/// Resolve a theme role through the chain
pub fn theme_color(ctx: &dyn UiContext, attr: ThemeAttr) -> Result<Color, ContextError> {
    theme_of(ctx).map(|theme| theme.color(attr))
}

// ============================================================================
// Nodes
// ============================================================================

/// Root of every chain; provides the theme
pub struct AppContext {
    theme: RwLock<Theme>,
}

impl AppContext {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: RwLock::new(theme),
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        *self.theme.write().unwrap_or_else(PoisonError::into_inner) = theme;
    }

    pub fn current_theme(&self) -> Theme {
        *self.theme.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("theme", &self.current_theme().name)
            .finish()
    }
}

impl UiContext for AppContext {
    fn base_context(&self) -> Option<&dyn UiContext> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn theme(&self) -> Option<Theme> {
        Some(self.current_theme())
    }
}

#[derive(Debug, Clone)]
pub struct ScreenContext {
    base: Arc<AppContext>,
    id: String,
    title: String,
    lifecycle: Lifecycle,
}

impl ScreenContext {
    pub fn new(
        base: Arc<AppContext>,
        id: impl Into<String>,
        title: impl Into<String>,
        lifecycle: Lifecycle,
    ) -> Self {
        Self {
            base,
            id: id.into(),
            title: title.into(),
            lifecycle,
        }
    }
}

impl Screen for ScreenContext {
    fn screen_id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn screen_lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}

impl UiContext for ScreenContext {
    fn base_context(&self) -> Option<&dyn UiContext> {
        Some(&*self.base)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_screen(&self) -> Option<&dyn Screen> {
        Some(self)
    }

    fn lifecycle(&self) -> Option<Lifecycle> {
        Some(self.lifecycle.clone())
    }
}

/// Wraps a screen for dialogs and popups drawn on top of it
#[derive(Debug, Clone)]
pub struct OverlayContext {
    base: ScreenContext,
    name: &'static str,
}

impl OverlayContext {
    pub fn new(base: ScreenContext, name: &'static str) -> Self {
        Self { base, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl UiContext for OverlayContext {
    fn base_context(&self) -> Option<&dyn UiContext> {
        Some(&self.base)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Screens that are currently alive, most recently registered last
#[derive(Debug, Default)]
pub struct ContextRegistry {
    screens: RwLock<Vec<ScreenContext>>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen; an existing entry with the same id is replaced
    pub fn register_screen(&self, screen: ScreenContext) {
        let mut screens = self.screens.write().unwrap_or_else(PoisonError::into_inner);
        screens.retain(|s| s.id != screen.id);
        tracing::debug!(screen = %screen.id, "screen registered");
        screens.push(screen);
    }

    pub fn unregister_screen(&self, id: &str) {
        let mut screens = self.screens.write().unwrap_or_else(PoisonError::into_inner);
        screens.retain(|s| s.id != id);
    }

    /// Most recently registered screen that is not destroyed
    pub fn current_screen(&self) -> Option<ScreenContext> {
        let screens = self.screens.read().unwrap_or_else(PoisonError::into_inner);
        screens
            .iter()
            .rev()
            .find(|s| !s.lifecycle.is_destroyed())
            .cloned()
    }

    /// Screen for `ctx`: its own chain first, then the registry
    pub fn require_screen(&self, ctx: &dyn UiContext) -> Result<ScreenContext, ContextError> {
        match find_context::<ScreenContext>(ctx) {
            Ok(screen) => Ok(screen.clone()),
            Err(ContextError::NotFound { .. }) => {
                self.current_screen().ok_or(ContextError::NoActiveScreen)
            }
            Err(err) => Err(err),
        }
    }

    pub fn clear(&self) {
        self.screens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::{DRACULA, NORD};

    fn screen(app: &Arc<AppContext>, id: &str) -> ScreenContext {
        ScreenContext::new(app.clone(), id, "Favorites", Lifecycle::new())
    }

    struct Loop;

    impl UiContext for Loop {
        fn base_context(&self) -> Option<&dyn UiContext> {
            Some(self)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_overlay_finds_screen_and_theme() {
        let app = Arc::new(AppContext::new(NORD));
        let overlay = OverlayContext::new(screen(&app, "favorites"), "confirm");

        let found = screen_of(&overlay).unwrap();
        assert_eq!(found.screen_id(), "favorites");
        assert_eq!(theme_of(&overlay).unwrap(), NORD);
        assert_eq!(
            theme_color(&overlay, ThemeAttr::Error).unwrap(),
            NORD.error
        );
        assert!(lifecycle_of(&overlay).is_ok());
    }

    #[test]
    fn test_theme_change_visible_through_chain() {
        let app = Arc::new(AppContext::new(NORD));
        let screen = screen(&app, "favorites");
        app.set_theme(DRACULA);
        assert_eq!(theme_of(&screen).unwrap().name, "Dracula");
    }

    #[test]
    fn test_missing_capability() {
        let app = AppContext::new(NORD);
        assert_eq!(
            screen_of(&app).err(),
            Some(ContextError::NotFound {
                capability: "screen"
            })
        );
        assert!(matches!(
            find_context::<OverlayContext>(&app),
            Err(ContextError::NotFound { .. })
        ));
    }

    #[test]
    fn test_cyclic_chain_is_bounded() {
        assert_eq!(
            lifecycle_of(&Loop).err(),
            Some(ContextError::DepthExceeded {
                limit: MAX_CONTEXT_DEPTH
            })
        );
    }

    #[test]
    fn test_registry_fallback() {
        let app = Arc::new(AppContext::new(NORD));
        let registry = ContextRegistry::new();
        assert_eq!(
            registry.require_screen(&*app).err(),
            Some(ContextError::NoActiveScreen)
        );

        registry.register_screen(screen(&app, "favorites"));
        let found = registry.require_screen(&*app).unwrap();
        assert_eq!(found.screen_id(), "favorites");
    }

    #[test]
    fn test_registry_skips_destroyed_screens() {
        let app = Arc::new(AppContext::new(NORD));
        let registry = ContextRegistry::new();
        let first = screen(&app, "first");
        let second = screen(&app, "second");
        registry.register_screen(first);
        registry.register_screen(second.clone());

        second.screen_lifecycle().destroy();
        assert_eq!(registry.current_screen().unwrap().screen_id(), "first");

        registry.unregister_screen("first");
        assert!(registry.current_screen().is_none());

        registry.register_screen(screen(&app, "third"));
        registry.clear();
        assert!(registry.current_screen().is_none());
    }

    #[test]
    fn test_own_chain_wins_over_registry() {
        let app = Arc::new(AppContext::new(NORD));
        let registry = ContextRegistry::new();
        registry.register_screen(screen(&app, "registered"));

        let own = OverlayContext::new(screen(&app, "own"), "help");
        assert_eq!(registry.require_screen(&own).unwrap().screen_id(), "own");
    }
}

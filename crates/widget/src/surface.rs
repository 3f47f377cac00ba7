//! The page surface the cart is drawn onto.
//!
//! The controller never touches markup directly. It hands rendered output,
//! totals, and visibility changes to a [`CartSurface`], which owns the fixed
//! page elements:
//!
//! | Element id      | Surface method          |
//! |-----------------|-------------------------|
//! | `cart-items`    | `replace_items`         |
//! | `cart-subtotal` | `set_totals`            |
//! | `cart-total`    | `set_totals`            |
//! | `loader`        | `set_loading`           |
//! | `removeModal`   | `set_modal_visible`     |
//!
//! Rendering replaces the item container wholesale, so the surface also
//! replaces its handler table on every render and only accepts events aimed
//! at controls from the latest render.

use std::collections::HashSet;

use cart_widget_core::Totals;

use crate::render::{Binding, RenderedCart};

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    /// CSS modifier class for this level.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice-info",
            Self::Warning => "notice-warning",
            Self::Error => "notice-error",
        }
    }
}

/// A blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: &'static str,
}

impl Notification {
    pub const ORDER_PLACED: Self = Self::info("Order successfully placed!");
    pub const CART_EMPTY: Self = Self::info("Your cart is empty.");
    pub const QUANTITY_TOO_LOW: Self = Self {
        level: NotificationLevel::Warning,
        message: "Quantity must be at least 1.",
    };
    pub const QUANTITY_TOO_HIGH: Self = Self {
        level: NotificationLevel::Warning,
        message: "That quantity is too large for this cart.",
    };
    pub const LOAD_FAILED: Self = Self {
        level: NotificationLevel::Error,
        message: "Could not load cart data. Please try again.",
    };

    const fn info(message: &'static str) -> Self {
        Self {
            level: NotificationLevel::Info,
            message,
        }
    }
}

/// Output side of the widget.
pub trait CartSurface: Send {
    /// Replace the item container and rebind its dynamic controls.
    fn replace_items(&mut self, rendered: RenderedCart);

    /// Update the subtotal and total displays.
    fn set_totals(&mut self, totals: &Totals);

    /// Show or hide the loading indicator.
    fn set_loading(&mut self, visible: bool);

    /// Show or hide the removal confirmation modal.
    fn set_modal_visible(&mut self, visible: bool);

    /// Show a blocking notification.
    fn notify(&mut self, notification: Notification);

    /// Whether `binding` belongs to the most recent render.
    fn is_bound(&self, binding: &Binding) -> bool;
}

/// Holds the loading indicator visible for its lifetime.
///
/// The indicator is hidden when the guard drops, so every exit path of the
/// guarded scope (success, error, or a dropped future) clears it.
pub struct LoadingGuard<'a, V: CartSurface + ?Sized> {
    surface: &'a mut V,
}

impl<'a, V: CartSurface + ?Sized> LoadingGuard<'a, V> {
    /// Show the indicator.
    pub fn acquire(surface: &'a mut V) -> Self {
        surface.set_loading(true);
        Self { surface }
    }
}

impl<V: CartSurface + ?Sized> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.surface.set_loading(false);
    }
}

/// Server-side surface that records what the page should currently show.
///
/// Each HTTP response renders a [`WidgetView`] taken from this surface.
#[derive(Debug, Clone)]
pub struct PageSurface {
    items_html: String,
    bindings: HashSet<Binding>,
    subtotal: String,
    total: String,
    loading: bool,
    modal_open: bool,
    notifications: Vec<Notification>,
}

impl Default for PageSurface {
    fn default() -> Self {
        let totals = Totals::default();
        Self {
            items_html: String::new(),
            bindings: HashSet::new(),
            subtotal: totals.subtotal_display(),
            total: totals.total_display(),
            loading: false,
            modal_open: false,
            notifications: Vec::new(),
        }
    }
}

impl PageSurface {
    /// Create a surface with an empty container and zero totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current item container markup.
    #[must_use]
    pub fn items_html(&self) -> &str {
        &self.items_html
    }

    /// Current subtotal display text.
    #[must_use]
    pub fn subtotal(&self) -> &str {
        &self.subtotal
    }

    /// Current total display text.
    #[must_use]
    pub fn total(&self) -> &str {
        &self.total
    }

    /// Whether the loading indicator is visible.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the confirmation modal is visible.
    #[must_use]
    pub const fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Notifications not yet delivered to the user.
    #[must_use]
    pub fn pending_notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Snapshot the page for rendering, handing off pending notifications.
    pub fn take_view(&mut self) -> WidgetView {
        WidgetView {
            items_html: self.items_html.clone(),
            subtotal: self.subtotal.clone(),
            total: self.total.clone(),
            loading: self.loading,
            modal_open: self.modal_open,
            notifications: std::mem::take(&mut self.notifications),
        }
    }
}

impl CartSurface for PageSurface {
    fn replace_items(&mut self, rendered: RenderedCart) {
        self.items_html = rendered.html;
        self.bindings = rendered.bindings.into_iter().collect();
    }

    fn set_totals(&mut self, totals: &Totals) {
        self.subtotal = totals.subtotal_display();
        self.total = totals.total_display();
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.modal_open = visible;
    }

    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => {
                tracing::warn!(notice = notification.message, "User notified");
            }
            _ => tracing::debug!(notice = notification.message, "User notified"),
        }
        self.notifications.push(notification);
    }

    fn is_bound(&self, binding: &Binding) -> bool {
        self.bindings.contains(binding)
    }
}

/// Everything a response needs to draw the widget.
#[derive(Debug, Clone)]
pub struct WidgetView {
    pub items_html: String,
    pub subtotal: String,
    pub total: String,
    pub loading: bool,
    pub modal_open: bool,
    pub notifications: Vec<Notification>,
}

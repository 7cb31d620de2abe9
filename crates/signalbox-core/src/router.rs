//! View router.
//!
//! Single-selection state over the menu resolved for the active role. Lives
//! exactly as long as the authenticated session; there is no router (and so
//! no permitted view) while signed out.

use crate::{
    access::{self, DASHBOARD, MenuCapability},
    error::AccessError,
    role::Role,
};

/// Body text shown under the heading of a placeholder panel.
pub const PLACEHOLDER_DETAIL: &str =
    "This module is under development and will be available soon.";

/// What the main area shows for the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// Live operational dashboard.
    Dashboard,
    /// Placeholder for panels not yet built.
    UnderDevelopment {
        /// Heading derived from the view id.
        title: String,
    },
}

/// Active-view selection for one authenticated role.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    role: Role,
    menu: Vec<&'static MenuCapability>,
    active: &'static MenuCapability,
}

impl ViewRouter {
    /// Router for `role`, starting on the first capability of its menu.
    ///
    /// # Errors
    ///
    /// Fails closed with [`AccessError::ViewNotPermitted`] if the role
    /// resolves to an empty menu.
    pub fn new(role: Role) -> Result<Self, AccessError> {
        let menu = access::resolve_menu(role);
        let active = *menu
            .first()
            .ok_or_else(|| AccessError::ViewNotPermitted { view: DASHBOARD.to_string() })?;

        Ok(Self { role, menu, active })
    }

    /// Make `id` the active view.
    ///
    /// # Errors
    ///
    /// [`AccessError::ViewNotPermitted`] if `id` is not in this role's menu.
    /// The active view is left unchanged.
    pub fn select_view(&mut self, id: &str) -> Result<(), AccessError> {
        let capability = self
            .menu
            .iter()
            .copied()
            .find(|capability| capability.id == id)
            .ok_or_else(|| AccessError::ViewNotPermitted { view: id.to_string() })?;

        if self.active.id != capability.id {
            tracing::debug!(from = self.active.id, to = capability.id, "view changed");
        }
        self.active = capability;
        Ok(())
    }

    /// Whether `id` is in this role's menu.
    pub fn is_permitted(&self, id: &str) -> bool {
        self.menu.iter().any(|capability| capability.id == id)
    }

    /// Role the menu was resolved for.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Resolved menu, in table order.
    pub fn menu(&self) -> &[&'static MenuCapability] {
        &self.menu
    }

    /// Active view id.
    pub fn active_view(&self) -> &'static str {
        self.active.id
    }

    /// Active capability.
    pub fn active_capability(&self) -> &'static MenuCapability {
        self.active
    }

    /// Panel to render for the active view.
    pub fn panel(&self) -> Panel {
        if self.active.id == DASHBOARD {
            Panel::Dashboard
        } else {
            Panel::UnderDevelopment { title: view_title(self.active.id) }
        }
    }
}

/// Heading for a view id: first letter capitalised, camel-case split.
fn view_title(id: &str) -> String {
    let mut title = String::with_capacity(id.len() + 4);
    for (i, ch) in id.chars().enumerate() {
        if i == 0 {
            title.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            title.push(' ');
            title.push(ch);
        } else {
            title.push(ch);
        }
    }
    title
}

// src/models/nav.rs

use serde::Serialize;
use utoipa::ToSchema;

/// One entry in the side navigation. `url` names an application route;
/// contextual back-links carry a direct `href` instead.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NavItem {
    #[schema(example = "Customers")]
    pub label: String,
    pub url: Option<String>,
    pub href: Option<String>,
    #[schema(example = "bi-people-fill")]
    pub icon: Option<String>,
    pub admin_only: bool,
    pub children: Vec<NavItem>,
}

impl NavItem {
    fn route(label: &str, url: &str, icon: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            url: Some(url.to_string()),
            href: None,
            icon: icon.map(str::to_string),
            admin_only: false,
            children: Vec::new(),
        }
    }

    fn admin_route(label: &str, url: &str) -> Self {
        Self {
            admin_only: true,
            ..Self::route(label, url, None)
        }
    }
}

/// Contextual back-link that replaces the customers entry on detail pages.
#[derive(Debug, Clone, PartialEq)]
pub struct BackLink {
    pub label: String,
    pub href: String,
}

impl BackLink {
    pub fn to_customer(href: String) -> Self {
        Self {
            label: "Back to Customer".to_string(),
            href,
        }
    }

    pub fn to_policy(href: String) -> Self {
        Self {
            label: "Back to Policy".to_string(),
            href,
        }
    }
}

/// Build the navigation tree for one request. Returns a fresh structure on
/// every call; admin-only entries are filtered out for non-admins, and a
/// contextual back-link substitutes the customers entry when given.
pub fn build_nav(is_admin: bool, back: Option<&BackLink>) -> Vec<NavItem> {
    let customers = match back {
        Some(link) => NavItem {
            label: link.label.clone(),
            url: None,
            href: Some(link.href.clone()),
            icon: Some("bi-arrow-left-circle".to_string()),
            admin_only: false,
            children: Vec::new(),
        },
        None => NavItem::route("Customers", "customer_search", Some("bi-people-fill")),
    };

    let settings_children = [
        NavItem::route("Agency Information", "agency_settings", None),
        NavItem::admin_route("Manage Users", "user_list"),
        NavItem::route("Manage Carriers", "carrier_list", None),
    ]
    .into_iter()
    .filter(|child| is_admin || !child.admin_only)
    .collect();

    vec![
        NavItem::route("Dashboard", "dashboard", Some("bi-speedometer2")),
        customers,
        NavItem {
            children: settings_children,
            ..NavItem::route("Settings", "#", Some("bi-gear"))
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_admins_do_not_see_admin_entries() {
        let nav = build_nav(false, None);
        let settings = nav.iter().find(|item| item.label == "Settings").unwrap();
        assert!(settings.children.iter().all(|child| !child.admin_only));
        assert!(
            !settings
                .children
                .iter()
                .any(|child| child.label == "Manage Users")
        );

        let admin_nav = build_nav(true, None);
        let settings = admin_nav
            .iter()
            .find(|item| item.label == "Settings")
            .unwrap();
        assert!(
            settings
                .children
                .iter()
                .any(|child| child.label == "Manage Users")
        );
    }

    #[test]
    fn back_link_replaces_the_customers_entry() {
        let back = BackLink::to_policy("/policies/42".to_string());
        let nav = build_nav(false, Some(&back));
        let entry = nav.iter().find(|item| item.href.is_some()).unwrap();
        assert_eq!(entry.label, "Back to Policy");
        assert_eq!(entry.href.as_deref(), Some("/policies/42"));
        assert_eq!(entry.icon.as_deref(), Some("bi-arrow-left-circle"));
        assert!(entry.url.is_none());
        assert!(!nav.iter().any(|item| item.label == "Customers"));
    }

    #[test]
    fn each_call_returns_an_independent_tree() {
        let mut first = build_nav(true, None);
        first[0].label = "mutated".to_string();
        first.pop();
        let second = build_nav(true, None);
        assert_eq!(second[0].label, "Dashboard");
        assert_eq!(second.len(), 3);
    }
}

//! Per-user favorites (shortcuts)
//!
//! Shortcuts live in their own sled tree next to the settings record, keyed by
//! `user \0 link_to` so that one user can hold each target at most once.

use crate::api::{failure_message, truncate_message, ApiResponse, Caller};
use crate::config::ApiConfig;
use crate::error::{ApiError, StorageError, ValidationError};
use crate::store::persistence::{to_storage_data, to_storage_io};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use std::io;
use std::path::Path;
use tracing::{debug, error, info};

const TREE_SHORTCUTS: &str = "user_shortcuts";

/// What a shortcut points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutType {
    DocType,
    Report,
    Page,
    #[serde(rename = "URL")]
    Url,
}

impl ShortcutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutType::DocType => "DocType",
            ShortcutType::Report => "Report",
            ShortcutType::Page => "Page",
            ShortcutType::Url => "URL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "doctype" => Some(ShortcutType::DocType),
            "report" => Some(ShortcutType::Report),
            "page" => Some(ShortcutType::Page),
            "url" => Some(ShortcutType::Url),
            _ => None,
        }
    }
}

/// Stored shortcut row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub user: String,
    pub label: String,
    pub link_to: String,
    pub shortcut_type: ShortcutType,
    /// Explicit route; when absent the route is derived from `link_to`
    #[serde(default)]
    pub route: Option<String>,
    pub created_at: String,
    /// Insertion order within the database
    #[serde(default)]
    pub seq: u64,
}

impl Shortcut {
    pub fn new(
        user: impl Into<String>,
        link_to: impl Into<String>,
        label: impl Into<String>,
        shortcut_type: ShortcutType,
    ) -> Self {
        Self {
            user: user.into(),
            label: label.into(),
            link_to: link_to.into(),
            shortcut_type,
            route: None,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            seq: 0,
        }
    }

    pub fn with_route(mut self, route: Option<String>) -> Self {
        self.route = route.filter(|r| !r.trim().is_empty());
        self
    }

    /// Client-side route for this shortcut.
    pub fn route(&self) -> String {
        if let Some(route) = &self.route {
            return route.clone();
        }
        match self.shortcut_type {
            ShortcutType::DocType => doctype_route(&self.link_to),
            _ => self.link_to.clone(),
        }
    }

    pub fn to_favorite(&self) -> Favorite {
        Favorite {
            label: self.label.clone(),
            route: self.route(),
            kind: self.shortcut_type,
        }
    }
}

/// `/app/<name>` with the name lowercased and spaces turned into dashes.
pub fn doctype_route(doctype: &str) -> String {
    format!("/app/{}", doctype.to_lowercase().replace(' ', "-"))
}

/// What the favorites endpoint returns per shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub label: String,
    pub route: String,
    #[serde(rename = "type")]
    pub kind: ShortcutType,
}

/// Sled tree holding every user's shortcuts.
#[derive(Clone)]
pub struct FavoritesStore {
    db: Db,
    tree: Tree,
}

impl FavoritesStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| {
            StorageError::IoError(io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            ))
        })?;
        Self::from_db(db)
    }

    pub fn from_db(db: Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(TREE_SHORTCUTS).map_err(to_storage_io)?;
        Ok(Self { db, tree })
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush().map_err(to_storage_io)?;
        Ok(())
    }

    /// A user's shortcuts, oldest first, at most `limit` of them.
    pub fn list(&self, user: &str, limit: usize) -> Result<Vec<Shortcut>, StorageError> {
        let mut shortcuts = Vec::new();
        for entry in self.tree.scan_prefix(user_prefix(user)) {
            let (_, raw) = entry.map_err(to_storage_io)?;
            let shortcut: Shortcut = serde_json::from_slice(&raw).map_err(to_storage_data)?;
            shortcuts.push(shortcut);
        }
        shortcuts.sort_by_key(|s| s.seq);
        shortcuts.truncate(limit);
        Ok(shortcuts)
    }

    pub fn contains(&self, user: &str, link_to: &str) -> Result<bool, StorageError> {
        self.tree
            .contains_key(shortcut_key(user, link_to))
            .map_err(to_storage_io)
    }

    /// Insert unless the user already has this target. Returns whether it was added.
    pub fn add(&self, mut shortcut: Shortcut) -> Result<bool, StorageError> {
        shortcut.seq = self.db.generate_id().map_err(to_storage_io)?;
        let value = serde_json::to_vec(&shortcut).map_err(to_storage_data)?;
        let swapped = self
            .tree
            .compare_and_swap(
                shortcut_key(&shortcut.user, &shortcut.link_to),
                None as Option<&[u8]>,
                Some(value),
            )
            .map_err(to_storage_io)?;
        Ok(swapped.is_ok())
    }

    /// Returns whether a shortcut was removed.
    pub fn remove(&self, user: &str, link_to: &str) -> Result<bool, StorageError> {
        let removed = self
            .tree
            .remove(shortcut_key(user, link_to))
            .map_err(to_storage_io)?;
        Ok(removed.is_some())
    }
}

fn user_prefix(user: &str) -> Vec<u8> {
    let mut key = user.as_bytes().to_vec();
    key.push(0);
    key
}

fn shortcut_key(user: &str, link_to: &str) -> Vec<u8> {
    let mut key = user_prefix(user);
    key.extend_from_slice(link_to.as_bytes());
    key
}

/// Favorites endpoints. All of them act on the caller's own shortcuts.
#[derive(Clone)]
pub struct FavoritesApi {
    store: FavoritesStore,
    limits: ApiConfig,
}

impl FavoritesApi {
    pub fn new(store: FavoritesStore) -> Self {
        Self::with_limits(store, ApiConfig::default())
    }

    pub fn with_limits(store: FavoritesStore, limits: ApiConfig) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &FavoritesStore {
        &self.store
    }

    /// The caller's favorites. Guests and store failures get an empty list.
    pub fn get_user_favorites(&self, caller: &Caller) -> Vec<Favorite> {
        let Ok(user) = caller.require_user() else {
            return Vec::new();
        };
        match self.store.list(user, self.limits.favorites_limit) {
            Ok(shortcuts) => shortcuts.iter().map(Shortcut::to_favorite).collect(),
            Err(e) => {
                let message = truncate_message(&e.to_string(), self.limits.error_message_limit);
                error!(user, error = %message, "Failed to list favorites");
                Vec::new()
            }
        }
    }

    /// Bookmark a DocType. `route`, when given, replaces the derived `/app/...` route.
    pub fn add_to_favorites(
        &self,
        caller: &Caller,
        doctype: &str,
        label: &str,
        route: Option<&str>,
    ) -> ApiResponse {
        self.add_shortcut(caller, doctype, label, ShortcutType::DocType, route)
    }

    pub fn add_shortcut(
        &self,
        caller: &Caller,
        link_to: &str,
        label: &str,
        shortcut_type: ShortcutType,
        route: Option<&str>,
    ) -> ApiResponse {
        let result = caller.require_user().and_then(|user| {
            let link_to = link_to.trim();
            if link_to.is_empty() {
                return Err(ApiError::Validation(ValidationError::InvalidValue {
                    field: "link_to".to_string(),
                    reason: "must not be empty".to_string(),
                }));
            }
            let label = if label.trim().is_empty() { link_to } else { label };
            let shortcut = Shortcut::new(user, link_to, label, shortcut_type)
                .with_route(route.map(str::to_string));
            let added = self.store.add(shortcut)?;
            if added {
                info!(user, link_to, "Added favorite");
            } else {
                debug!(user, link_to, "Favorite already present");
            }
            Ok(added)
        });
        match result {
            Ok(true) => ApiResponse::ok("Added to favorites"),
            Ok(false) => ApiResponse::failed("Already in favorites"),
            Err(e) => ApiResponse::failed(failure_message(
                "Add favorite failed",
                &e,
                self.limits.error_message_limit,
            )),
        }
    }

    pub fn remove_from_favorites(&self, caller: &Caller, link_to: &str) -> ApiResponse {
        let result = caller.require_user().and_then(|user| {
            let removed = self.store.remove(user, link_to)?;
            if removed {
                info!(user, link_to, "Removed favorite");
            }
            Ok(removed)
        });
        match result {
            Ok(true) => ApiResponse::ok("Removed from favorites"),
            Ok(false) => ApiResponse::failed("Not in favorites"),
            Err(e) => ApiResponse::failed(failure_message(
                "Remove favorite failed",
                &e,
                self.limits.error_message_limit,
            )),
        }
    }
}

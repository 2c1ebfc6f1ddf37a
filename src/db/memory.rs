use crate::db::models::{
    ActivityEntry, NewPackage, NewTrackingEvent, NewUser, Package, PackageStatus, PackageUpdate,
    TrackingEvent, User,
};
use crate::error::FedpackError;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-lifetime store for users, packages and tracking events.
///
/// Records are keyed by generated id. Lookups by tracking number, username,
/// owner or package id are linear scans. Cloning shares the same maps.
#[derive(Clone, Default)]
pub struct MemStorage {
    inner: Arc<RwLock<StorageInner>>,
}

#[derive(Default)]
struct StorageInner {
    users: HashMap<String, User>,
    packages: HashMap<String, Package>,
    events: HashMap<String, TrackingEvent>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn newest_first(events: &mut [TrackingEvent]) {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.inner.read().await.users.get(id).cloned()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub async fn create_user(&self, new: NewUser) -> Result<User, FedpackError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == new.username) {
            return Err(FedpackError::DuplicateUsername(new.username));
        }
        let user = User {
            id: new_id(),
            username: new.username,
            password: new.password,
        };
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    pub async fn get_package(&self, id: &str) -> Option<Package> {
        self.inner.read().await.packages.get(id).cloned()
    }

    pub async fn get_package_by_tracking_number(&self, tracking_number: &str) -> Option<Package> {
        self.inner
            .read()
            .await
            .packages
            .values()
            .find(|p| p.tracking_number == tracking_number)
            .cloned()
    }

    /// All packages, oldest first. An empty `user_id` is treated as no filter.
    pub async fn get_all_packages(&self, user_id: Option<&str>) -> Vec<Package> {
        let inner = self.inner.read().await;
        let owner = user_id.filter(|u| !u.is_empty());
        let mut packages: Vec<Package> = inner
            .packages
            .values()
            .filter(|p| owner.is_none_or(|o| p.user_id.as_deref() == Some(o)))
            .cloned()
            .collect();
        packages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        packages
    }

    /// Register a package in `pending` state. Tracking numbers are unique.
    pub async fn create_package(&self, new: NewPackage) -> Result<Package, FedpackError> {
        let mut inner = self.inner.write().await;
        if inner
            .packages
            .values()
            .any(|p| p.tracking_number == new.tracking_number)
        {
            return Err(FedpackError::DuplicateTrackingNumber(new.tracking_number));
        }
        let now = Utc::now();
        let pkg = Package {
            id: new_id(),
            tracking_number: new.tracking_number,
            title: new.title.filter(|t| !t.is_empty()),
            carrier: None,
            status: PackageStatus::Pending,
            origin: None,
            destination: None,
            estimated_delivery: None,
            last_update: now,
            tracking_data: None,
            is_active: true,
            user_id: new.user_id.filter(|u| !u.is_empty()),
            created_at: now,
        };
        inner.packages.insert(pkg.id.clone(), pkg.clone());
        Ok(pkg)
    }

    /// Apply `update` and bump `last_update`. `None` when the id is unknown.
    pub async fn update_package(&self, id: &str, update: PackageUpdate) -> Option<Package> {
        let mut inner = self.inner.write().await;
        let pkg = inner.packages.get_mut(id)?;
        update.apply(pkg);
        Some(pkg.clone())
    }

    /// Remove a package. Its events are left in place.
    pub async fn delete_package(&self, id: &str) -> bool {
        self.inner.write().await.packages.remove(id).is_some()
    }

    /// Events of one package, newest first.
    pub async fn get_tracking_events(&self, package_id: &str) -> Vec<TrackingEvent> {
        let inner = self.inner.read().await;
        let mut events: Vec<TrackingEvent> = inner
            .events
            .values()
            .filter(|e| e.package_id == package_id)
            .cloned()
            .collect();
        newest_first(&mut events);
        events
    }

    pub async fn create_tracking_event(&self, new: NewTrackingEvent) -> TrackingEvent {
        let mut inner = self.inner.write().await;
        insert_event(&mut inner, new)
    }

    /// Store carrier events for a package, skipping ones already recorded
    /// with the same timestamp and description. Returns how many were added.
    pub async fn record_tracking_events(&self, events: Vec<NewTrackingEvent>) -> usize {
        let mut inner = self.inner.write().await;
        let mut added = 0;
        for new in events {
            let seen = inner.events.values().any(|e| {
                e.package_id == new.package_id
                    && e.timestamp == new.timestamp
                    && e.description == new.description
            });
            if !seen {
                insert_event(&mut inner, new);
                added += 1;
            }
        }
        added
    }

    /// Most recent events across the packages of `user_id` (all packages when
    /// unset), newest first.
    pub async fn recent_activity(&self, user_id: Option<&str>, limit: usize) -> Vec<ActivityEntry> {
        let packages = self.get_all_packages(user_id).await;
        let inner = self.inner.read().await;
        let tracking_numbers: HashMap<&str, &str> = packages
            .iter()
            .map(|p| (p.id.as_str(), p.tracking_number.as_str()))
            .collect();
        let mut entries: Vec<ActivityEntry> = inner
            .events
            .values()
            .filter_map(|e| {
                let tn = tracking_numbers.get(e.package_id.as_str())?;
                Some(ActivityEntry {
                    event: e.clone(),
                    tracking_number: (*tn).to_string(),
                })
            })
            .collect();
        entries.sort_by(|a, b| b.event.timestamp.cmp(&a.event.timestamp));
        entries.truncate(limit);
        entries
    }
}

fn insert_event(inner: &mut StorageInner, new: NewTrackingEvent) -> TrackingEvent {
    let event = TrackingEvent {
        id: new_id(),
        package_id: new.package_id,
        status: new.status,
        location: new.location.filter(|l| !l.is_empty()),
        description: new.description.filter(|d| !d.is_empty()),
        timestamp: new.timestamp,
        created_at: Utc::now(),
    };
    inner.events.insert(event.id.clone(), event.clone());
    event
}

//! In-memory stores backing the integration tests: the full request path
//! runs against these without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::{ProductStore, UserStore};
use crate::models::{Product, User};

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    items: Mutex<HashMap<Uuid, Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<Product> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    pub fn all(&self) -> Vec<Product> {
        self.items.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn save(&self, product: &Product) -> Result<(), sqlx::Error> {
        self.items
            .lock()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Product>, sqlx::Error> {
        let mut active: Vec<Product> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|p| !p.is_archived())
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    items: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn save(&self, user: &User) -> Result<(), sqlx::Error> {
        self.items.lock().unwrap().insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.items.lock().unwrap().len() as i64)
    }
}

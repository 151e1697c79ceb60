//! 프로세스 메모리 저장소
//!
//! `STORAGE_BACKEND=memory`로 외부 의존성 없이 서버를 띄우거나, 테스트에서
//! 서비스와 핸들러를 구성할 때 사용합니다. ID는 1부터 순서대로 발급됩니다.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::tags::{Neche, NewNeche, NewTag, Tag};
use crate::domain::entities::users::{Account, NewAccount};
use crate::errors::{AppError, AppResult};
use crate::repositories::{AccountRepository, NecheRepository, TagRepository};

/// ID 순으로 정렬된 행 집합
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;

        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn page(&self, limit: i64, offset: i64) -> Vec<T> {
        self.rows
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect()
    }
}

fn poisoned() -> AppError {
    AppError::DatabaseError("in-memory table lock poisoned".to_string())
}

pub struct InMemoryAccountRepository {
    table: RwLock<Table<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn save(&self, account: NewAccount) -> AppResult<Account> {
        let mut table = self.table.write().map_err(|_| poisoned())?;

        if table.rows.values().any(|existing| existing.email == account.email) {
            return Err(AppError::ConflictError("Email already exists".to_string()));
        }

        Ok(table.insert_with(|id| account.into_account(id, Utc::now())))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().find(|account| account.email == email).cloned())
    }
}

pub struct InMemoryTagRepository {
    table: RwLock<Table<Tag>>,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryTagRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn save(&self, tag: NewTag) -> AppResult<Tag> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        Ok(table.insert_with(|id| tag.into_tag(id)))
    }

    async fn update(&self, tag: &Tag) -> AppResult<bool> {
        let mut table = self.table.write().map_err(|_| poisoned())?;

        match table.rows.get_mut(&tag.id) {
            Some(existing) => {
                existing.name = tag.name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Tag>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Tag>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.page(limit, offset))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        Ok(table.rows.remove(&id).is_some())
    }
}

pub struct InMemoryNecheRepository {
    table: RwLock<Table<Neche>>,
}

impl InMemoryNecheRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryNecheRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NecheRepository for InMemoryNecheRepository {
    async fn save(&self, neche: NewNeche) -> AppResult<Neche> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        Ok(table.insert_with(|id| neche.into_neche(id)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Neche>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Neche>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.page(limit, offset))
    }

    async fn find_by_tag_ids(&self, tag_ids: &[i64]) -> AppResult<Vec<Neche>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .rows
            .values()
            .filter(|neche| tag_ids.contains(&neche.tag_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn delete_by_tag(&self, tag_id: i64) -> AppResult<u64> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        let before = table.rows.len();
        table.rows.retain(|_, neche| neche.tag_id != tag_id);
        Ok((before - table.rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::Role;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Jane".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::User,
        }
    }

    #[actix_web::test]
    async fn test_account_email_is_unique() {
        let repo = InMemoryAccountRepository::new();

        let first = repo.save(new_account("jane@example.com")).await.unwrap();
        assert_eq!(first.id, 1);

        let err = repo.save(new_account("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));

        let found = repo.find_by_email("jane@example.com").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(1));
    }

    #[actix_web::test]
    async fn test_tag_pagination_is_ordered_by_id() {
        let repo = InMemoryTagRepository::new();
        for name in ["a", "b", "c", "d"] {
            repo.save(NewTag { name: name.to_string() }).await.unwrap();
        }

        let page: Vec<String> = repo
            .find_all(2, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|tag| tag.name)
            .collect();

        assert_eq!(page, vec!["b", "c"]);
        assert!(repo.find_all(10, 10).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_delete_neches_by_tag() {
        let repo = InMemoryNecheRepository::new();
        for (kind, tag_id) in [("x", 1), ("y", 1), ("z", 2)] {
            repo.save(NewNeche { neche_type: kind.to_string(), tag_id }).await.unwrap();
        }

        assert_eq!(repo.delete_by_tag(1).await.unwrap(), 2);
        assert_eq!(repo.find_by_tag_ids(&[1, 2]).await.unwrap().len(), 1);
        assert!(!repo.delete(1).await.unwrap());
    }
}

//! 인메모리 계정 저장소.
//!
//! 테스트 및 `DATABASE_URL` 없이 실행할 때 사용합니다. 프로세스 종료 시 내용이 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use rolegate_core::{Account, NewAccount};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountStore, StoreError, StoreResult};

/// 프로세스 메모리 기반 계정 저장소.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 계정 수.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .filter(|a| a.email == email)
            .min_by_key(|a| a.created_at)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn insert(&self, new: NewAccount) -> StoreResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.name == new.name) {
            return Err(StoreError::Duplicate(new.name));
        }

        let account = Account::create(new);
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::Role;

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryAccountStore::new();
        let created = store
            .insert(NewAccount::new("Alice", "a@x.com", "hash"))
            .await
            .unwrap();

        let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
        assert_eq!(by_id.role, Role::Common);
    }

    #[tokio::test]
    async fn test_email_lookup_is_exact() {
        let store = InMemoryAccountStore::new();
        store
            .insert(NewAccount::new("Alice", "a@x.com", "hash"))
            .await
            .unwrap();

        assert!(store.find_by_email("A@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("a@x.co").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = InMemoryAccountStore::new();
        store
            .insert(NewAccount::new("Alice", "a@x.com", "hash"))
            .await
            .unwrap();

        let err = store
            .insert(NewAccount::new("Alice", "other@x.com", "hash"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref n) if n == "Alice"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let store = InMemoryAccountStore::new();
        for (name, email) in [("A", "a@x.com"), ("B", "b@x.com"), ("C", "c@x.com")] {
            store.insert(NewAccount::new(name, email, "hash")).await.unwrap();
        }

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_missing_id_returns_none() {
        let store = InMemoryAccountStore::new();
        assert!(store.is_empty().await);
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }
}

//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::directory::RoleDirectory;
use crate::error::{DirectoryError, IdentityProviderError};
use crate::identity::IdentityProvider;
use crate::types::{NewAccount, NewProfile, ProfileRecord};

#[derive(Default)]
pub(crate) struct FakeIdentityProvider {
    accounts: Mutex<HashMap<String, NewAccount>>,
    failure: Mutex<Option<String>>,
    next_id: AtomicUsize,
}

impl FakeIdentityProvider {
    pub(crate) fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub(crate) fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub(crate) fn account(&self, uid: &str) -> Option<NewAccount> {
        self.accounts.lock().unwrap().get(uid).cloned()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn create_account(&self, account: NewAccount) -> Result<String, IdentityProviderError> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(IdentityProviderError::Provider(message));
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|a| a.email == account.email) {
            return Err(IdentityProviderError::EmailAlreadyExists);
        }

        let uid = format!("uid-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        accounts.insert(uid.clone(), account);
        Ok(uid)
    }
}

#[derive(Default)]
pub(crate) struct FakeRoleDirectory {
    profiles: Mutex<HashMap<String, ProfileRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl FakeRoleDirectory {
    /// Insert a profile directly; not counted as a write.
    pub(crate) fn seed(&self, subject_id: &str, role: &str) {
        self.profiles.lock().unwrap().insert(
            subject_id.to_string(),
            ProfileRecord {
                subject_id: subject_id.to_string(),
                email: None,
                role: role.to_string(),
                created_at: None,
            },
        );
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn profile(&self, subject_id: &str) -> Option<ProfileRecord> {
        self.profiles.lock().unwrap().get(subject_id).cloned()
    }
}

#[async_trait]
impl RoleDirectory for FakeRoleDirectory {
    async fn get_profile(&self, subject_id: &str) -> Result<Option<ProfileRecord>, DirectoryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DirectoryError::Request("read timed out".to_string()));
        }
        Ok(self.profile(subject_id))
    }

    async fn set_profile(&self, subject_id: &str, profile: NewProfile) -> Result<(), DirectoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DirectoryError::Request("write rejected".to_string()));
        }
        self.profiles.lock().unwrap().insert(
            subject_id.to_string(),
            ProfileRecord {
                subject_id: subject_id.to_string(),
                email: Some(profile.email),
                role: profile.role.as_str().to_string(),
                created_at: Some(chrono::Utc::now().to_rfc3339()),
            },
        );
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

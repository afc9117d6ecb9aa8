//! In-memory state store. It is the only owner of dashboard records: readers get
//! cloned snapshots, writers go through the mutation methods in the submodules.

mod assignments;
mod lifecycle;

use std::sync::Mutex;

use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::assignment::Assignment;
use crate::models::feedback::Feedback;
use crate::models::request::DonationRequest;
use crate::models::shopkeeper::Shopkeeper;
use crate::models::transaction::Transaction;
use crate::models::user::User;

pub use assignments::AssignmentGuard;

#[derive(Default)]
pub struct Store {
    users: DashMap<Uuid, User>,
    shopkeepers: DashMap<Uuid, Shopkeeper>,
    requests: DashMap<Uuid, DonationRequest>,
    transactions: DashMap<Uuid, Transaction>,
    feedback: DashMap<Uuid, Feedback>,
    assignments: DashMap<Uuid, Assignment>,
    assignment_lock: Mutex<()>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub users: usize,
    pub shopkeepers: usize,
    pub requests: usize,
    pub transactions: usize,
    pub feedback: usize,
    pub assignments: usize,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn insert_shopkeeper(&self, shopkeeper: Shopkeeper) {
        self.shopkeepers.insert(shopkeeper.id, shopkeeper);
    }

    pub fn insert_request(&self, request: DonationRequest) {
        self.requests.insert(request.id, request);
    }

    pub fn insert_transaction(&self, transaction: Transaction) {
        self.transactions.insert(transaction.id, transaction);
    }

    pub fn insert_feedback(&self, feedback: Feedback) {
        self.feedback.insert(feedback.id, feedback);
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            users: self.users.len(),
            shopkeepers: self.shopkeepers.len(),
            requests: self.requests.len(),
            transactions: self.transactions.len(),
            feedback: self.feedback.len(),
            assignments: self.assignments.len(),
        }
    }

    /// Oldest account first.
    pub fn users(&self) -> Vec<User> {
        let mut users = snapshot(&self.users);
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        users
    }

    /// Sorted by name so that rotation ties resolve the same way on every call.
    pub fn shopkeepers(&self) -> Vec<Shopkeeper> {
        let mut shopkeepers = snapshot(&self.shopkeepers);
        shopkeepers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        shopkeepers
    }

    /// Newest first.
    pub fn requests(&self) -> Vec<DonationRequest> {
        let mut requests = snapshot(&self.requests);
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        requests
    }

    /// Newest first.
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut transactions = snapshot(&self.transactions);
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        transactions
    }

    /// Newest first.
    pub fn feedback(&self) -> Vec<Feedback> {
        let mut feedback = snapshot(&self.feedback);
        feedback.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        feedback
    }

    /// In assignment order.
    pub fn assignments(&self) -> Vec<Assignment> {
        let mut assignments = snapshot(&self.assignments);
        assignments.sort_by(|a, b| a.assigned_at.cmp(&b.assigned_at).then(a.id.cmp(&b.id)));
        assignments
    }

    pub fn user(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }

    pub fn shopkeeper(&self, id: Uuid) -> Result<Shopkeeper, AppError> {
        self.shopkeepers
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("shopkeeper {} not found", id)))
    }

    pub fn request(&self, id: Uuid) -> Result<DonationRequest, AppError> {
        self.requests
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("request {} not found", id)))
    }

    pub fn feedback_item(&self, id: Uuid) -> Result<Feedback, AppError> {
        self.feedback
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("feedback {} not found", id)))
    }
}

fn snapshot<T: Clone>(map: &DashMap<Uuid, T>) -> Vec<T> {
    map.iter().map(|entry| entry.value().clone()).collect()
}

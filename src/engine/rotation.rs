//! Shopkeeper rotation: spreads new requests across the active pool.
//!
//! Priority order, earliest first:
//! 1. fewest `total_assignments`
//! 2. oldest `last_assigned` (never assigned counts as oldest)
//! 3. highest `rating`
//!
//! Ties on all three keys keep their input order.

use std::cmp::Ordering;

use crate::models::shopkeeper::Shopkeeper;

pub fn compare_priority(a: &Shopkeeper, b: &Shopkeeper) -> Ordering {
    a.total_assignments
        .cmp(&b.total_assignments)
        .then_with(|| a.last_assigned.cmp(&b.last_assigned))
        .then_with(|| b.rating.total_cmp(&a.rating))
}

/// Orders the active shopkeepers by rotation priority. Inactive entries are dropped.
pub fn rank(shopkeepers: &[Shopkeeper]) -> Vec<Shopkeeper> {
    let mut ranked: Vec<Shopkeeper> = shopkeepers
        .iter()
        .filter(|shopkeeper| shopkeeper.is_active())
        .cloned()
        .collect();

    ranked.sort_by(compare_priority);
    ranked
}

pub fn recommend(shopkeepers: &[Shopkeeper]) -> Option<Shopkeeper> {
    shopkeepers
        .iter()
        .filter(|shopkeeper| shopkeeper.is_active())
        .min_by(|a, b| compare_priority(a, b))
        .cloned()
}

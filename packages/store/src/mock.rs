//! In-memory collections for the screens without a backend endpoint
//!
//! General listings, payments, feeds, pairs, feed requests and
//! promotion banners follow the same table / form / confirm-delete
//! flow as the remote collections, but their data
//! lives here and is gone on exit. The collection mirrors the remote
//! behavior closely enough that the table layer cannot tell the
//! difference: substring filtering, local pagination, and delete that
//! fails cleanly on a missing id.

use pawdeck_core::{Feed, FeedRequest, Listing, Pair, PaymentTransaction, PromotionBanner};

use crate::error::StoreError;

/// One page of a mock collection, shaped like a paged server response
#[derive(Debug, Clone)]
pub struct MockPage<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: u64,
    pub last_page: u32,
}

pub trait MockRecord: Clone {
    fn id(&self) -> &str;
    /// Case-insensitive substring match used by the search box
    fn matches(&self, needle: &str) -> bool;
}

pub struct MockCollection<T: MockRecord> {
    records: Vec<T>,
}

impl<T: MockRecord> MockCollection<T> {
    pub fn new(seed: Vec<T>) -> Self {
        Self { records: seed }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Filtered, paginated view. An empty search returns everything.
    pub fn page(&self, search: &str, page: u32, limit: u32) -> MockPage<T> {
        let needle = search.trim().to_lowercase();
        let filtered: Vec<&T> = self
            .records
            .iter()
            .filter(|record| needle.is_empty() || record.matches(&needle))
            .collect();

        let total = filtered.len() as u64;
        let limit = limit.max(1);
        let last_page = ((total as u32).div_ceil(limit)).max(1);
        let page = page.clamp(1, last_page);
        let start = ((page - 1) * limit) as usize;

        let items = filtered
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        MockPage {
            items,
            page,
            total,
            last_page,
        }
    }

    pub fn create(&mut self, record: T) -> Result<(), StoreError> {
        if self.get(record.id()).is_some() {
            return Err(StoreError::Duplicate(record.id().to_string()));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn update<F>(&mut self, id: &str, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut T),
    {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                apply(record);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Remove exactly the record with the given id
    pub fn delete(&mut self, id: &str) -> Result<T, StoreError> {
        match self.records.iter().position(|record| record.id() == id) {
            Some(index) => Ok(self.records.remove(index)),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Next zero-padded id, matching the fixture data style
    pub fn next_id(&self) -> String {
        let max = self
            .records
            .iter()
            .filter_map(|record| record.id().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("{:02}", max + 1)
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl MockRecord for Listing {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.owner, needle)
            || contains(&self.listing_type, needle)
            || contains(&self.status, needle)
    }
}

impl MockRecord for PromotionBanner {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.description, needle)
    }
}

impl MockRecord for PaymentTransaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.email, needle)
            || contains(&self.method, needle)
            || contains(&self.status, needle)
    }
}

impl MockRecord for FeedRequest {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains(&self.user_name, needle)
            || contains(&self.email, needle)
            || contains(&self.subject, needle)
            || contains(&self.status, needle)
    }
}

impl MockRecord for Pair {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains(&self.pairs_name, needle)
            || contains(&self.owner, needle)
            || contains(&self.pair_type, needle)
            || contains(&self.status, needle)
    }
}

impl MockRecord for Feed {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.email, needle)
            || contains(&self.feed_type, needle)
            || contains(&self.status, needle)
    }
}

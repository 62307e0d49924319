//! The testimonial store.
//!
//! Same snapshot-and-rollback discipline as the booking store, without
//! any scheduling semantics: the only checks are field presence (done at
//! the API boundary) and the rating bounds.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::models::Testimonial;

use super::{snapshot, StoreError, StorePaths};

/// Validated testimonial fields prior to admission.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub review_title: Option<String>,
    pub review_text: String,
    pub rating: u8,
    pub genuine_opinion: bool,
}

pub struct TestimonialStore {
    path: PathBuf,
    testimonials: Vec<Testimonial>,
    last_id: i64,
}

impl TestimonialStore {
    pub fn load(paths: &StorePaths) -> Self {
        let path = paths.testimonials_file();
        let testimonials: Vec<Testimonial> = snapshot::load_or_empty(&path);
        let last_id = testimonials.iter().map(|t| t.id).max().unwrap_or(0);
        info!(
            "Loaded {} testimonials from {:?}",
            testimonials.len(),
            path
        );
        Self {
            path,
            testimonials,
            last_id,
        }
    }

    pub fn add(&mut self, new: NewTestimonial) -> Result<Testimonial, StoreError> {
        if !(1..=5).contains(&new.rating) {
            return Err(StoreError::InvalidRating(new.rating));
        }

        let testimonial = Testimonial {
            id: self.next_id(),
            reviewer_name: new.reviewer_name,
            reviewer_email: new.reviewer_email,
            review_title: new.review_title,
            review_text: new.review_text,
            rating: new.rating,
            genuine_opinion: new.genuine_opinion,
            created_at: Utc::now(),
        };

        self.testimonials.push(testimonial.clone());
        if let Err(e) = snapshot::write_array(&self.path, &self.testimonials) {
            self.testimonials.pop();
            return Err(e.into());
        }

        info!(
            "Stored testimonial {} from {}",
            testimonial.id, testimonial.reviewer_name
        );
        Ok(testimonial)
    }

    /// All testimonials, newest first.
    pub fn list(&self) -> Vec<Testimonial> {
        let mut items = self.testimonials.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    pub fn remove(&mut self, id: i64) -> Result<Testimonial, StoreError> {
        let idx = self
            .testimonials
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.testimonials.remove(idx);
        if let Err(e) = snapshot::write_array(&self.path, &self.testimonials) {
            self.testimonials.insert(idx, removed);
            return Err(e.into());
        }

        info!("Removed testimonial {}", id);
        Ok(removed)
    }

    fn next_id(&mut self) -> i64 {
        let candidate = Utc::now().timestamp_millis();
        self.last_id = candidate.max(self.last_id + 1);
        self.last_id
    }
}

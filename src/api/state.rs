use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::notify::NotificationSink;
use crate::store::{BookingStore, TestimonialStore};

/// Shared application state.
///
/// The stores sit behind write locks: create/cancel hold the write guard
/// across the whole check-then-mutate-then-persist sequence, which is
/// what keeps the conflict check atomic under concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bookings: Arc<RwLock<BookingStore>>,
    pub testimonials: Arc<RwLock<TestimonialStore>>,
    pub notifier: Arc<dyn NotificationSink>,
}

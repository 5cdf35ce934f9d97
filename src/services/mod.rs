pub mod price_cache;
pub mod refresher;
pub mod signals;

pub use price_cache::PriceCache;
pub use refresher::{RefreshReport, SignalRefresher};
pub use signals::{SignalEngine, SignalStore};

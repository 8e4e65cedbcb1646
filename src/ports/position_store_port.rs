//! Position persistence port trait.

use crate::domain::error::TickerTrackError;
use crate::domain::position::{NewPosition, TrackedPosition};

pub trait PositionStorePort {
    fn insert(&self, position: &NewPosition) -> Result<TrackedPosition, TickerTrackError>;

    /// All positions, oldest first.
    fn list(&self) -> Result<Vec<TrackedPosition>, TickerTrackError>;

    /// Returns `false` when no position had this id.
    fn delete(&self, id: i64) -> Result<bool, TickerTrackError>;

    fn update_quote(
        &self,
        id: i64,
        current_price: f64,
        daily_change: f64,
    ) -> Result<(), TickerTrackError>;
}

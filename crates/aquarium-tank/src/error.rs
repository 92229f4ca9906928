use aquarium_logic::indicators::Timestamp;
use thiserror::Error;

use crate::tank::FishId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TankError {
    #[error("{0} is not in the tank")]
    UnknownFish(FishId),
    /// The event predates the latest one already applied to this fish.
    #[error("{fish}: event at {event_at} is older than latest applied event at {latest}")]
    OutOfOrder {
        fish: FishId,
        event_at: Timestamp,
        latest: Timestamp,
    },
}

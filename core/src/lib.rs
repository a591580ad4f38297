pub mod dates;
pub mod destination;
pub mod error;
pub mod fetch;
pub mod guests;
pub mod hotel;
pub mod index;
pub mod pricing;
pub mod room;
pub mod tokenizer;

pub use destination::Destination;
pub use error::{DateError, DecodeError, FetchError};
pub use fetch::{PollOutcome, PollPayload, RetryPolicy};
pub use hotel::{Hotel, ImageDetails};
pub use index::DestinationIndex;
pub use pricing::PriceBreakdown;
pub use room::RoomOffer;

mod ids;
mod price;
mod token;
mod track;

pub use ids::TrackId;
pub use price::Price;
pub use token::TokenRecord;
pub use track::Track;

pub mod listing;
pub mod viewport;

pub use listing::Listing;
pub use viewport::Viewport;

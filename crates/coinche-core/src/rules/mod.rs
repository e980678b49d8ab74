pub mod bidding;
pub mod play;
pub mod scoring;

pub mod artist;
pub mod error;
pub mod listing;
pub mod schedule;
pub mod show;
pub mod venue;

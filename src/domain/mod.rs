//! Host-platform data contracts populated by the feed.

pub mod bar;
pub mod exchange;
pub mod interval;
pub mod request;
pub mod tick;

pub use bar::Bar;
pub use exchange::{Exchange, UnknownExchange};
pub use interval::{Interval, UnknownInterval};
pub use request::HistoryRequest;
pub use tick::{Tick, DEPTH};

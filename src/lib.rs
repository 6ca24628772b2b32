pub mod clock;
pub mod live;
pub mod localize;
pub mod model;
pub mod render;
pub mod schedule;
pub mod server;

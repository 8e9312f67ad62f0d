pub mod advise;
pub mod ambience;
pub mod config;
pub mod flow;
pub mod task;
pub mod timer;

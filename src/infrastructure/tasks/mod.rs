pub mod counter;

pub use counter::counter_task;

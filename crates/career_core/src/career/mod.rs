//! Career orchestration: the season phase machine, persistence boundary and
//! observer hooks.

pub mod cycle;
pub mod observer;
pub mod repository;


pub use cycle::{CareerCycle, CyclePhase, Engines, WindowDecision};
pub use observer::{CareerObserver, LoggingObserver};
pub use repository::{validate_key, CareerRepository, MemoryRepository};

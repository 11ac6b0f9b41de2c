//! Infrastructure layer: the gadget device, wall clock, storage, and test doubles.

pub mod clock;
pub mod gadget;
pub mod mock;
pub mod storage;

pub use clock::SystemClock;
pub use gadget::HidGadget;

//! Async storage traits
//!
//! The service layer depends on these rather than on [`crate::Storage`]
//! directly, so services can be handed any backing store.

pub mod entry;
pub mod medicine;

pub use entry::EntryStore;
pub use medicine::{MedicineStore, PivotStore, StatsStore};

/// Everything the services need from one store.
pub trait HabitStore: MedicineStore + PivotStore + EntryStore + StatsStore {}

impl<T> HabitStore for T where T: MedicineStore + PivotStore + EntryStore + StatsStore {}

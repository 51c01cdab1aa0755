//! Core business logic module
//!
//! This module contains the components behind the menus:
//! - `traits` - The persistence seam (`DocumentBackend`)
//! - `store` - Accounts, transactions and settings with write-through saves
//! - `exchange` - Static offline exchange rates
//! - `names` - Default account name suggestions

pub mod exchange;
pub mod names;
pub mod store;
pub mod traits;

pub use exchange::RateTable;
pub use names::{FixedNameGenerator, FunnyNameGenerator, NameGenerator};
pub use store::Store;
pub use traits::DocumentBackend;

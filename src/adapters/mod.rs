// Adapters layer: concrete implementations of the domain ports.

pub mod intake;

pub use intake::{JsonDraftIntake, PlaceholderIntake, UnavailableIntake};

pub mod events;
pub mod selection;

// Re-export the essential types
pub use events::{EventHandled, MapDelegate, MapEvent, MapEventHandler};
pub use selection::{SelectionCallback, SelectionRouter};

// Adapters layer: concrete implementations for the external collaborators
// (the Earth Engine REST service and the embeddable map document).
// Storage backends live with their config providers under src/config.

pub mod gee;
pub mod map;

//! Repository layout: locating manifests and isolating them from the
//! commands that rewrite them.

pub mod finder;
pub mod snapshot;

pub use finder::ManifestFinder;
pub use snapshot::ManifestSnapshot;

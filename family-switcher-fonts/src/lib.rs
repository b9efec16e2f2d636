//! Font discovery for family-switcher.
//!
//! Lists the font families installed on the system through `fontdb`. The
//! [`FontSource`] trait lets callers swap in other sources; whichever source is
//! used, [`enumerate_families`] never fails and yields an empty list instead.

pub mod enumerator;

pub use enumerator::{
    FontSource, SystemFontSource, enumerate_families, families_in_database, visible_families,
};

//! API operation groups.

mod indicators;
mod observables;
mod relationships;

pub use indicators::IndicatorApi;
pub use observables::ObservableApi;
pub use relationships::RelationshipApi;

use serde::Deserialize;

/// Reference to another entity by its standard id
#[derive(Deserialize)]
pub(crate) struct RawRef {
    pub(crate) standard_id: String,
}

/// Label entity as embedded in an observable
#[derive(Deserialize)]
pub(crate) struct RawLabel {
    pub(crate) value: String,
}

mod content;
mod draft;
mod indicator;
mod label;
mod observable;
mod status;

pub use content::*;
pub use draft::*;
pub use indicator::*;
pub use label::*;
pub use observable::*;
pub use status::*;

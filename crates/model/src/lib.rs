pub mod calculation;
pub mod point;
pub mod postal;

pub use calculation::{CalculationRequest, CalculationResponse, ErrorResponse};
pub use point::GeoPoint;
pub use postal::{PostalInfo, PostalKind};

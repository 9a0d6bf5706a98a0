//! Document field records extracted by the recognition service.

mod fields;

pub use fields::{FieldValue, PassportFields, VehicleFields};

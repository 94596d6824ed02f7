pub mod fields;
pub mod macros;
pub mod records;

pub use fields::{extract_required, field_text, is_truthy, MissingFields};
pub use records::{
    NewPolicyRequest, NewScreening, PolicyRequestId, PolicyRequestRecord, ScreeningId,
    ScreeningRecord,
};

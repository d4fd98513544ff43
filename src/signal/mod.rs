//! Signal-level building blocks: parameter records, bit ranges, signatures
//! and display-name normalization.

mod bits;
mod names;
mod record;
mod signature;

pub use bits::{extract_bit_info, BitRange};
pub use names::{normalize_name, NamePrefixMatcher};
pub(crate) use record::value_text;
pub use record::{CommandMap, Format, ParameterRecord, Scaling, VehicleRef};
pub use signature::{signature, signature_of};

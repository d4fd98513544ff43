//! Bit position of a signal within its command response.

use super::record::ParameterRecord;

/// Contiguous bit range occupied by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    /// First bit.
    pub offset: u32,
    /// Number of bits.
    pub length: u32,
}

impl BitRange {
    /// Last bit covered (`offset + length - 1`). A zero length yields
    /// `offset - 1`, which is what the signature format expects.
    #[must_use]
    pub fn last(&self) -> i64 {
        i64::from(self.offset) + i64::from(self.length) - 1
    }
}

/// Reads the bit range from `bitOffset`/`bitLength`, falling back to
/// `fmt.bix`/`fmt.len`. Both halves of a pair must be present.
#[must_use]
pub fn extract_bit_info(param: &ParameterRecord) -> Option<BitRange> {
    if let (Some(offset), Some(length)) = (param.bit_offset, param.bit_length) {
        return Some(BitRange { offset, length });
    }
    let fmt = param.fmt.as_ref()?;
    match (fmt.bix, fmt.len) {
        (Some(offset), Some(length)) => Some(BitRange { offset, length }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Format;

    #[test]
    fn direct_fields_take_priority() {
        let mut p = ParameterRecord::new("A", "a");
        p.bit_offset = Some(16);
        p.bit_length = Some(8);
        p.fmt = Some(Format { bix: Some(0), len: Some(4), ..Format::default() });
        assert_eq!(extract_bit_info(&p), Some(BitRange { offset: 16, length: 8 }));
    }

    #[test]
    fn falls_back_to_fmt() {
        let mut p = ParameterRecord::new("A", "a");
        p.bit_offset = Some(16);
        p.fmt = Some(Format { bix: Some(24), len: Some(12), ..Format::default() });
        let range = extract_bit_info(&p).unwrap();
        assert_eq!(range.offset, 24);
        assert_eq!(range.last(), 35);
    }

    #[test]
    fn fmt_without_bix_has_no_range() {
        let mut p = ParameterRecord::new("A", "a");
        p.fmt = Some(Format { len: Some(8), ..Format::default() });
        assert_eq!(extract_bit_info(&p), None);
    }
}

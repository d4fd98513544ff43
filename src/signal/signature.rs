//! Cross-vehicle identity of a signal.
//!
//! A signature is `hdr`, then `|CMD:` with the command entries, then
//! `|BIT:first-last`, then `|METRIC:name`. Segments whose source data is
//! missing are left out, so sparse records produce shorter (less specific)
//! signatures.

use std::fmt::Write as _;

use super::bits::extract_bit_info;
use super::record::ParameterRecord;

/// Computes the signature of a parameter.
#[must_use]
pub fn signature(param: &ParameterRecord) -> String {
    let mut sig = param.hdr.clone().unwrap_or_default();

    if let Some(cmd) = &param.cmd {
        sig.push_str("|CMD:");
        sig.push_str(&cmd.joined("_"));
    }

    if let Some(range) = extract_bit_info(param) {
        let _ = write!(sig, "|BIT:{}-{}", range.offset, range.last());
    }

    if let Some(metric) = param.metric() {
        let _ = write!(sig, "|METRIC:{metric}");
    }

    sig
}

/// Signature of an optional parameter; absent parameters yield `""`.
///
/// An empty signature is unmatchable: callers must not group on it.
#[must_use]
pub fn signature_of(param: Option<&ParameterRecord>) -> String {
    param.map(signature).unwrap_or_default()
}

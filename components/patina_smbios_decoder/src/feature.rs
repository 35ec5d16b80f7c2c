//! Feature flag lists and label lookup shared by the typed views.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

/// One labelled bit of a flag field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    /// Human readable name of the capability
    pub label: &'static str,
    /// Whether the bit is set
    pub supported: bool,
}

impl Feature {
    /// Creates a feature entry.
    pub const fn new(label: &'static str, supported: bool) -> Self {
        Self { label, supported }
    }
}

/// Appends one [`Feature`] per label, label `i` describing bit `first_bit + i` of `value`.
pub(crate) fn push_flags(features: &mut Vec<Feature>, value: u64, first_bit: usize, labels: &[&'static str]) {
    features.extend(
        labels.iter().enumerate().map(|(i, &label)| Feature::new(label, value & (1u64 << (first_bit + i)) != 0)),
    );
}

/// Looks up a 1-based enumeration code. Returns an empty string for 0 and for codes past the end of the table.
pub(crate) fn label_for_code(labels: &[&'static str], code: u8) -> &'static str {
    usize::from(code).checked_sub(1).and_then(|index| labels.get(index)).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_push_flags_in_bit_order() {
        let mut features = Vec::new();
        push_flags(&mut features, 0b1010_0000, 4, &["four", "five", "six", "seven"]);
        assert_eq!(
            features,
            vec![
                Feature::new("four", false),
                Feature::new("five", true),
                Feature::new("six", false),
                Feature::new("seven", true),
            ]
        );
    }

    #[test]
    fn test_push_flags_appends() {
        let mut features = vec![Feature::new("existing", true)];
        push_flags(&mut features, 0x01, 0, &["zero"]);
        assert_eq!(features.len(), 2);
        assert_eq!(features[1], Feature::new("zero", true));
    }

    #[test]
    fn test_push_flags_high_bits() {
        let mut features = Vec::new();
        push_flags(&mut features, 1 << 31, 31, &["thirty-one"]);
        assert_eq!(features, vec![Feature::new("thirty-one", true)]);
    }

    #[test]
    fn test_label_for_code() {
        let labels = ["one", "two", "three"];
        assert_eq!(label_for_code(&labels, 0), "");
        assert_eq!(label_for_code(&labels, 1), "one");
        assert_eq!(label_for_code(&labels, 3), "three");
        assert_eq!(label_for_code(&labels, 4), "");
        assert_eq!(label_for_code(&labels, 0xFF), "");
    }
}

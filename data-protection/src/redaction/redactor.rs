//! Redactors: pure string transformations.
//!
//! Redactors do not traverse structures, pick classifications, or make runtime
//! decisions about sensitivity. Lengths are counted in Unicode scalar values.

use std::{borrow::Cow, fmt};

/// Placeholder written by [`ErasingRedactor`] unless configured otherwise.
pub const ERASED_PLACEHOLDER: &str = "R*E*D*A*C*T*E*D";

/// A redaction strategy for string values.
///
/// Implementations must be total, deterministic and side-effect free: they run
/// on every matching log emission.
pub trait Redactor: fmt::Debug + Send + Sync {
    /// Upper bound on the number of scalar values `redact` returns for an input
    /// of `input_len` scalar values.
    fn max_output_len(&self, input_len: usize) -> usize;

    /// Redacts `input`.
    fn redact(&self, input: &str) -> String;
}

/// Replaces every value with a fixed placeholder.
///
/// The output does not depend on the input in any way, which makes this the
/// strictest redactor and trivially idempotent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErasingRedactor {
    placeholder: Cow<'static, str>,
    placeholder_len: usize,
}

impl ErasingRedactor {
    /// Constructs an erasing redactor writing [`ERASED_PLACEHOLDER`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_placeholder(ERASED_PLACEHOLDER)
    }

    /// Constructs an erasing redactor writing `placeholder`. An empty
    /// placeholder removes the value entirely.
    #[must_use]
    pub fn with_placeholder<P>(placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        let placeholder = placeholder.into();
        let placeholder_len = placeholder.chars().count();
        Self {
            placeholder,
            placeholder_len,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl Default for ErasingRedactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Redactor for ErasingRedactor {
    fn max_output_len(&self, _input_len: usize) -> usize {
        self.placeholder_len
    }

    fn redact(&self, _input: &str) -> String {
        self.placeholder.clone().into_owned()
    }
}

/// Leaves values unchanged. Used for data classified as not sensitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullRedactor;

impl Redactor for NullRedactor {
    fn max_output_len(&self, input_len: usize) -> usize {
        input_len
    }

    fn redact(&self, input: &str) -> String {
        input.to_owned()
    }
}

/// Keeps selected segments visible while masking the remainder.
///
/// If the configuration keeps the entire value visible, the output is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct KeepConfig {
    visible_prefix: usize,
    visible_suffix: usize,
}

impl KeepConfig {
    fn apply_to(self, value: &str, mask_char: char) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();
        if self.visible_prefix.saturating_add(self.visible_suffix) >= total {
            return value.to_owned();
        }
        chars[self.visible_prefix..(total - self.visible_suffix)].fill(mask_char);
        chars.into_iter().collect()
    }
}

/// Masks selected segments while leaving the remainder unchanged.
///
/// If the masked spans cover the entire value, everything is masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MaskConfig {
    mask_prefix: usize,
    mask_suffix: usize,
}

impl MaskConfig {
    fn apply_to(self, value: &str, mask_char: char) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();
        if self.mask_prefix.saturating_add(self.mask_suffix) >= total {
            chars.fill(mask_char);
            return chars.into_iter().collect();
        }
        chars[..self.mask_prefix].fill(mask_char);
        chars[(total - self.mask_suffix)..].fill(mask_char);
        chars.into_iter().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MaskMode {
    Keep(KeepConfig),
    Mask(MaskConfig),
}

/// Partially masks values character by character.
///
/// The output always has as many scalar values as the input. Empty input stays
/// empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskingRedactor {
    mode: MaskMode,
    mask_char: char,
}

impl MaskingRedactor {
    const fn keep(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            mode: MaskMode::Keep(KeepConfig {
                visible_prefix,
                visible_suffix,
            }),
            mask_char: '*',
        }
    }

    const fn mask(mask_prefix: usize, mask_suffix: usize) -> Self {
        Self {
            mode: MaskMode::Mask(MaskConfig {
                mask_prefix,
                mask_suffix,
            }),
            mask_char: '*',
        }
    }

    /// Keeps only the first `count` scalar values in clear text.
    #[must_use]
    pub const fn keep_first(count: usize) -> Self {
        Self::keep(count, 0)
    }

    /// Keeps only the last `count` scalar values in clear text.
    #[must_use]
    pub const fn keep_last(count: usize) -> Self {
        Self::keep(0, count)
    }

    /// Keeps both leading and trailing scalar values in clear text.
    #[must_use]
    pub const fn keep_both(prefix: usize, suffix: usize) -> Self {
        Self::keep(prefix, suffix)
    }

    /// Masks the first `count` scalar values.
    #[must_use]
    pub const fn mask_first(count: usize) -> Self {
        Self::mask(count, 0)
    }

    /// Masks the last `count` scalar values.
    #[must_use]
    pub const fn mask_last(count: usize) -> Self {
        Self::mask(0, count)
    }

    /// Masks both leading and trailing scalar values.
    #[must_use]
    pub const fn mask_both(prefix: usize, suffix: usize) -> Self {
        Self::mask(prefix, suffix)
    }

    /// Uses a specific masking character instead of `*`.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }
}

impl Redactor for MaskingRedactor {
    fn max_output_len(&self, input_len: usize) -> usize {
        input_len
    }

    fn redact(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        match self.mode {
            MaskMode::Keep(config) => config.apply_to(input, self.mask_char),
            MaskMode::Mask(config) => config.apply_to(input, self.mask_char),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErasingRedactor, MaskingRedactor, NullRedactor, Redactor, ERASED_PLACEHOLDER};

    fn assert_within_bound(redactor: &dyn Redactor, input: &str) {
        let output = redactor.redact(input);
        assert!(
            output.chars().count() <= redactor.max_output_len(input.chars().count()),
            "{redactor:?} exceeded its declared bound for {input:?}"
        );
    }

    #[test]
    fn erasing_redactor_is_constant() {
        let redactor = ErasingRedactor::new();
        assert_eq!(redactor.redact("Alice"), ERASED_PLACEHOLDER);
        assert_eq!(redactor.redact("123-45-6789"), ERASED_PLACEHOLDER);
        assert_eq!(redactor.redact(""), ERASED_PLACEHOLDER);
        assert_eq!(redactor.max_output_len(0), 15);
        assert_eq!(redactor.max_output_len(1_000), 15);
    }

    #[test]
    fn erasing_redactor_is_idempotent() {
        let redactor = ErasingRedactor::default();
        let once = redactor.redact("a@x.com");
        assert_eq!(redactor.redact(&once), once);
    }

    #[test]
    fn erasing_redactor_with_empty_placeholder_removes_value() {
        let redactor = ErasingRedactor::with_placeholder("");
        assert_eq!(redactor.redact("secret"), "");
        assert_eq!(redactor.max_output_len(6), 0);
    }

    #[test]
    fn null_redactor_is_identity() {
        assert_eq!(NullRedactor.redact("hello"), "hello");
        assert_eq!(NullRedactor.max_output_len(5), 5);
    }

    #[test]
    fn keep_allows_full_visibility() {
        assert_eq!(MaskingRedactor::keep_first(3).redact("ab"), "ab");
    }

    #[test]
    fn keep_respects_mask_char() {
        let redactor = MaskingRedactor::keep_first(2).with_mask_char('#');
        assert_eq!(redactor.redact("abcdef"), "ab####");
    }

    #[test]
    fn mask_masks_first_and_last_segments() {
        assert_eq!(MaskingRedactor::mask_first(2).redact("abcdef"), "**cdef");
        assert_eq!(MaskingRedactor::mask_last(3).redact("abcdef"), "abc***");
    }

    #[test]
    fn keep_both_overlap_keeps_entire_value() {
        assert_eq!(MaskingRedactor::keep_both(2, 2).redact("abc"), "abc");
        assert_eq!(MaskingRedactor::keep_both(2, 2).redact("abcd"), "abcd");
        assert_eq!(MaskingRedactor::keep_both(2, 2).redact("abcdef"), "ab**ef");
    }

    #[test]
    fn mask_both_overlap_masks_entire_value() {
        assert_eq!(MaskingRedactor::mask_both(2, 2).redact("abc"), "***");
        assert_eq!(MaskingRedactor::mask_both(2, 2).redact("abcdef"), "**cd**");
    }

    #[test]
    fn huge_spans_saturate_instead_of_overflowing() {
        assert_eq!(MaskingRedactor::keep_both(usize::MAX, 1).redact("abc"), "abc");
        assert_eq!(MaskingRedactor::mask_both(usize::MAX, 1).redact("abc"), "***");
        assert_eq!(MaskingRedactor::keep_both(1, usize::MAX).redact("abc"), "abc");
        assert_eq!(MaskingRedactor::mask_both(1, usize::MAX).redact("abc"), "***");
    }

    #[test]
    fn empty_input_stays_empty_for_masking() {
        assert_eq!(MaskingRedactor::keep_last(4).redact(""), "");
        assert_eq!(MaskingRedactor::mask_first(4).redact(""), "");
    }

    #[test]
    fn every_redactor_respects_its_bound() {
        let redactors: [&dyn Redactor; 5] = [
            &ErasingRedactor::new(),
            &NullRedactor,
            &MaskingRedactor::keep_last(4),
            &MaskingRedactor::mask_both(1, 1).with_mask_char('█'),
            &ErasingRedactor::with_placeholder("[x]"),
        ];
        for redactor in redactors {
            for input in ["", "a", "123-45-6789", "秘密数据", "secret🔒data"] {
                assert_within_bound(redactor, input);
            }
        }
    }
}

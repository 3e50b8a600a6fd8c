use serde::{Deserialize, Serialize};

///
/// PopulatePolicy
///
/// Per-call policy for `populate`. Both switches default to off, so a
/// standalone call fails on unsupported key shapes and always allocates.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PopulatePolicy {
    /// Leave groups with an unsupported key shape unkeyed instead of failing.
    pub skip_unsupported: bool,
    /// Skip the round trip when a group has exactly one unkeyed record.
    pub skip_if_single: bool,
}

impl PopulatePolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            skip_unsupported: false,
            skip_if_single: false,
        }
    }

    #[must_use]
    pub const fn skip_unsupported(mut self, skip: bool) -> Self {
        self.skip_unsupported = skip;
        self
    }

    #[must_use]
    pub const fn skip_if_single(mut self, skip: bool) -> Self {
        self.skip_if_single = skip;
        self
    }
}

///
/// BatchInsertConfig
/// Configuration for the before-flush hook installed by `enable`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct BatchInsertConfig {
    pub skip_unsupported: bool,
    pub skip_if_single: bool,
    /// Fail an explicit-subset flush instead of declining it with a warning.
    pub reject_subset_flush: bool,
}

impl BatchInsertConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            skip_unsupported: true,
            skip_if_single: true,
            reject_subset_flush: false,
        }
    }

    #[must_use]
    pub const fn skip_unsupported(mut self, skip: bool) -> Self {
        self.skip_unsupported = skip;
        self
    }

    #[must_use]
    pub const fn skip_if_single(mut self, skip: bool) -> Self {
        self.skip_if_single = skip;
        self
    }

    #[must_use]
    pub const fn reject_subset_flush(mut self, reject: bool) -> Self {
        self.reject_subset_flush = reject;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> PopulatePolicy {
        PopulatePolicy {
            skip_unsupported: self.skip_unsupported,
            skip_if_single: self.skip_if_single,
        }
    }
}

impl Default for BatchInsertConfig {
    fn default() -> Self {
        Self::new()
    }
}

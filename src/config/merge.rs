//! Merge rules: defaults and override order.

pub mod merge_policy;

use thiserror::Error;

/// Failures the simulator can surface to its driver.
///
/// The display strings double as the user-facing diagnostics, so the
/// binary prints them verbatim. `PageTableOom` is recoverable (the run
/// continues); `DataPageOom` is fatal for any non-bootstrap process.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    /// Requested page count cannot fit in a one-page table.
    #[error("OOM: proc {proc_num}: page table")]
    PageTableOom { proc_num: usize },

    /// No free physical page left for a process with abort-on-OOM policy.
    #[error("OOM: proc {proc_num}: data page")]
    DataPageOom { proc_num: usize },
}

impl VmError {
    /// Whether the simulator must halt after reporting this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VmError::DataPageOom { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_diagnostics() {
        let e = VmError::PageTableOom { proc_num: 3 };
        assert_eq!(e.to_string(), "OOM: proc 3: page table");

        let e = VmError::DataPageOom { proc_num: 7 };
        assert_eq!(e.to_string(), "OOM: proc 7: data page");
    }

    #[test]
    fn test_fatality_tiers() {
        assert!(!VmError::PageTableOom { proc_num: 2 }.is_fatal());
        assert!(VmError::DataPageOom { proc_num: 2 }.is_fatal());
    }
}

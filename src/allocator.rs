//! Free-page accounting over the byte map in page 0.
//!
//! The first `PAGE_COUNT` bytes of page 0 record the state of every
//! physical page (0 = free, nonzero = allocated). The map describes the
//! memory it lives in, so page 0 is reserved at initialization and never
//! offered by the allocator.

use log::debug;

use crate::constants::*;
use crate::error::VmError;
use crate::memory::{PhysicalMemory, page_address};

/// What the allocator does when no page is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OomPolicy {
    /// Out-of-memory is fatal: surface an error the driver reports and
    /// halts on.
    Abort,
    /// Out-of-memory degrades to returning `SENTINEL_PAGE` with no report.
    SentinelReturn,
}

impl OomPolicy {
    /// The policy a given process allocates under. Only the bootstrap
    /// process tolerates exhaustion.
    pub fn for_process(proc_num: usize) -> Self {
        if proc_num == BOOTSTRAP_PROC {
            OomPolicy::SentinelReturn
        } else {
            OomPolicy::Abort
        }
    }
}

/// Allocate one physical page for `proc_num`: first fit, lowest index.
///
/// On success the page is marked allocated in the free map and its index
/// returned. On exhaustion the outcome follows `OomPolicy::for_process`:
/// the bootstrap process silently receives `SENTINEL_PAGE`, every other
/// process gets `VmError::DataPageOom`.
pub fn allocate_page(mem: &mut PhysicalMemory, proc_num: usize) -> Result<u8, VmError> {
    for page in 0..PAGE_COUNT {
        let map_addr = page_address(0, page);
        if mem.read(map_addr) == 0 {
            mem.write(map_addr, 1);
            debug!("allocated page {:#04x} for proc {}", page, proc_num);
            return Ok(page as u8);
        }
    }

    match OomPolicy::for_process(proc_num) {
        OomPolicy::SentinelReturn => {
            debug!("proc {} exhausted memory, returning sentinel", proc_num);
            Ok(SENTINEL_PAGE)
        }
        OomPolicy::Abort => Err(VmError::DataPageOom { proc_num }),
    }
}

/// Return a page to the free pool. Unconditional: freeing an
/// already-free page just clears its map byte again.
pub fn deallocate_page(mem: &mut PhysicalMemory, page: u8) {
    mem.write(page_address(0, page as usize), 0);
    debug!("deallocated page {:#04x}", page);
}

/// Whether the free map records `page` as free.
#[inline]
pub fn is_page_free(mem: &PhysicalMemory, page: usize) -> bool {
    mem.read(page_address(0, page)) == 0
}

/// Number of pages currently free.
pub fn free_page_count(mem: &PhysicalMemory) -> usize {
    (0..PAGE_COUNT).filter(|&page| is_page_free(mem, page)).count()
}

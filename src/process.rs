//! Process lifecycle: page-table setup at creation, page reclamation at kill.

use log::debug;

use crate::allocator::{allocate_page, deallocate_page};
use crate::constants::*;
use crate::error::VmError;
use crate::memory::{PhysicalMemory, page_address};
use crate::table::{get_page_table, set_page_table};

/// Create a process: allocate its page-table page plus `page_count` data
/// pages, recording each data page in successive table entries.
///
/// A `page_count` that cannot fit in a one-page table fails up front with
/// `PageTableOom` and allocates nothing. Creation is not transactional:
/// if the allocator fails mid-loop the error propagates and the pages
/// already granted stay attached to the partial table.
pub fn new_process(
    mem: &mut PhysicalMemory,
    proc_num: usize,
    page_count: usize,
) -> Result<(), VmError> {
    if page_count >= PAGE_COUNT {
        return Err(VmError::PageTableOom { proc_num });
    }

    let table_page = allocate_page(mem, proc_num)?;
    set_page_table(mem, proc_num, table_page);

    for entry in 0..page_count {
        let data_page = allocate_page(mem, proc_num)?;
        mem.write(page_address(table_page as usize, entry), data_page);
    }

    debug!(
        "proc {}: created with table page {:#04x} and {} data pages",
        proc_num, table_page, page_count
    );
    Ok(())
}

/// Destroy a process, returning its pages to the free pool.
///
/// Walks table entries 1..PAGE_COUNT; entry 0 is never visited, so the
/// page it names leaks. An entry is reclaimed when its slot address is
/// nonzero, differs from the free map's page-0 byte, and the entry itself
/// names a page. The table page is freed last. The pointer-table slot is
/// left stale: it keeps naming the freed table page until a later
/// `new_process` overwrites it.
pub fn kill_process(mem: &mut PhysicalMemory, proc_num: usize) {
    let table_page = get_page_table(mem, proc_num);

    for entry in 1..PAGE_COUNT {
        let entry_addr = page_address(table_page as usize, entry);
        if entry_addr != 0 && entry_addr != mem.read(0) as usize {
            let data_page = mem.read(entry_addr);
            if data_page != 0 {
                deallocate_page(mem, data_page);
            }
        }
    }

    deallocate_page(mem, table_page);
    debug!("proc {}: killed, table page {:#04x} freed", proc_num, table_page);
}

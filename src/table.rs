//! Page-table bookkeeping and virtual-to-physical translation.
//!
//! Page 0 holds a pointer table at `PTP_OFFSET`: one byte per process slot
//! naming the physical page that holds that process's page table. A page
//! table is itself one physical page of byte-sized entries; entry `i` names
//! the physical page backing virtual page `i`, 0 meaning unmapped.

use log::trace;

use crate::constants::*;
use crate::memory::{PhysicalMemory, page_address};

/// The decomposed form of a virtual address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub raw: u32,
    pub page: usize,
    pub offset: usize,
}

impl VirtualAddress {
    /// Split a raw virtual address into page number and in-page offset.
    pub fn from_raw(raw: u32) -> Self {
        VirtualAddress {
            raw,
            page: (raw >> PAGE_SHIFT) as usize,
            offset: raw as usize & OFFSET_MASK,
        }
    }
}

impl std::fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VA({}) = (page={}, offset={})",
            self.raw, self.page, self.offset
        )
    }
}

/// The physical page holding `proc_num`'s page table.
///
/// After `kill_process` the slot still names the freed table page until a
/// later `new_process` overwrites it; reading it then is undefined state.
#[inline]
pub fn get_page_table(mem: &PhysicalMemory, proc_num: usize) -> u8 {
    mem.read(page_address(0, PTP_OFFSET + proc_num))
}

/// Record the physical page holding `proc_num`'s page table. Written once,
/// at process creation.
#[inline]
pub fn set_page_table(mem: &mut PhysicalMemory, proc_num: usize, page: u8) {
    mem.write(page_address(0, PTP_OFFSET + proc_num), page);
}

/// Translate a virtual address for `proc_num` into a physical address.
///
/// Reads the page-table entry for the virtual page and composes the named
/// physical page with the offset. No validity check is made: an unmapped
/// virtual page carries entry 0 and so aliases to page 0, the system map
/// page. Callers get whatever the table names.
pub fn translate(mem: &PhysicalMemory, proc_num: usize, va: VirtualAddress) -> usize {
    let table_page = get_page_table(mem, proc_num);
    let physical_page = mem.read(page_address(table_page as usize, va.page));
    let pa = page_address(physical_page as usize, va.offset);
    trace!("proc {}: {} -> PA {}", proc_num, va, pa);
    pa
}

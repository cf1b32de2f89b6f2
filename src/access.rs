//! Simulated memory access through address translation.

use crate::memory::PhysicalMemory;
use crate::table::{VirtualAddress, translate};

/// Which direction a memory access went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Store,
    Load,
}

/// Report of one translated memory access, rendered by the driver as
/// `Store proc P: VA => PA, value = V` (or `Load ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAccess {
    pub kind: AccessKind,
    pub proc_num: usize,
    pub virtual_address: u32,
    pub physical_address: usize,
    pub value: u8,
}

impl std::fmt::Display for MemoryAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self.kind {
            AccessKind::Store => "Store",
            AccessKind::Load => "Load",
        };
        write!(
            f,
            "{} proc {}: {} => {}, value = {}",
            verb, self.proc_num, self.virtual_address, self.physical_address, self.value
        )
    }
}

/// Translate and write one byte. The value is truncated to a byte; that
/// truncated value is what gets reported. No check that the process
/// exists or the page is mapped: the write lands wherever the page-table
/// entry points.
pub fn store_value(
    mem: &mut PhysicalMemory,
    proc_num: usize,
    virtual_address: u32,
    value: u32,
) -> MemoryAccess {
    let va = VirtualAddress::from_raw(virtual_address);
    let physical_address = translate(mem, proc_num, va);
    let byte = value as u8;
    mem.write(physical_address, byte);

    MemoryAccess {
        kind: AccessKind::Store,
        proc_num,
        virtual_address,
        physical_address,
        value: byte,
    }
}

/// Translate and read one byte. Same caveats as [`store_value`].
pub fn load_value(mem: &PhysicalMemory, proc_num: usize, virtual_address: u32) -> MemoryAccess {
    let va = VirtualAddress::from_raw(virtual_address);
    let physical_address = translate(mem, proc_num, va);

    MemoryAccess {
        kind: AccessKind::Load,
        proc_num,
        virtual_address,
        physical_address,
        value: mem.read(physical_address),
    }
}

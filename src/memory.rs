use crate::constants::*;

/// Compose a page number and an in-page offset into a flat address.
#[inline]
pub fn page_address(page: usize, offset: usize) -> usize {
    (page << PAGE_SHIFT) | offset
}

/// The simulated physical memory: one fixed byte array holding everything —
/// the free-page map and pointer table in page 0, every page table, and all
/// data pages. It is the single shared mutable resource; every other
/// component borrows it.
pub struct PhysicalMemory {
    data: Box<[u8; MEM_SIZE]>,
}

impl PhysicalMemory {
    /// Create physical memory with every byte zeroed.
    pub fn new() -> Self {
        // Allocate on the heap first, then fix the size.
        let data = vec![0u8; MEM_SIZE].into_boxed_slice();
        let data: Box<[u8; MEM_SIZE]> = data.try_into().unwrap();
        PhysicalMemory { data }
    }

    /// Create physical memory ready for use: zeroed, with page 0 reserved.
    pub fn initialized() -> Self {
        let mut mem = Self::new();
        mem.initialize();
        mem
    }

    /// Reset to the boot state: all bytes zero, then page 0 marked
    /// allocated in the free map. Page 0 hosts the free map and the
    /// page-table-pointer table and is never handed out by the allocator.
    pub fn initialize(&mut self) {
        self.data.fill(0);
        self.data[page_address(0, 0)] = 1;
    }

    /// Read one byte of physical memory. Addresses wrap at `MEM_SIZE`:
    /// page numbers are bytes, so a composed address can name a page past
    /// the end of the array (the bootstrap sentinel does), and the access
    /// lands wherever the wrap puts it rather than faulting.
    #[inline]
    pub fn read(&self, address: usize) -> u8 {
        self.data[address & (MEM_SIZE - 1)]
    }

    /// Write one byte of physical memory. Wraps like [`Self::read`].
    #[inline]
    pub fn write(&mut self, address: usize, value: u8) {
        self.data[address & (MEM_SIZE - 1)] = value;
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new()
    }
}

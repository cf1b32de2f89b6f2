pub const PAGE_SHIFT: u32 = 8;
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;
pub const PAGE_COUNT: usize = 64;
pub const MEM_SIZE: usize = PAGE_SIZE * PAGE_COUNT;

pub const OFFSET_MASK: usize = PAGE_SIZE - 1;

/// Offset into page 0 where the page-table-pointer table begins
/// (one byte per process slot).
pub const PTP_OFFSET: usize = 64;

/// Invalid page number handed to the bootstrap process when no page is free.
pub const SENTINEL_PAGE: u8 = 0xff;

/// Process number granted relaxed (non-fatal) out-of-memory handling.
pub const BOOTSTRAP_PROC: usize = 1;

const _: () = assert!(PAGE_SIZE == 1 << PAGE_SHIFT);
const _: () = assert!(PAGE_SIZE * PAGE_COUNT == MEM_SIZE);
const _: () = assert!(PAGE_COUNT <= PAGE_SIZE, "free map must fit in page 0");

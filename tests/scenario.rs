//! End-to-end scenarios driving the library the way the command stream does.

use pagesim::access::{load_value, store_value};
use pagesim::allocator::{allocate_page, free_page_count, is_page_free};
use pagesim::constants::*;
use pagesim::memory::{PhysicalMemory, page_address};
use pagesim::process::{kill_process, new_process};
use pagesim::table::get_page_table;
use pagesim::VmError;

/// Collect a process's nonzero page-table entries, as `ppt` would print them.
fn page_table_entries(mem: &PhysicalMemory, proc_num: usize) -> Vec<(usize, u8)> {
    let table = get_page_table(mem, proc_num) as usize;
    (0..PAGE_COUNT)
        .filter_map(|entry| {
            let page = mem.read(page_address(table, entry));
            (page != 0).then_some((entry, page))
        })
        .collect()
}

#[test]
fn fresh_memory_has_one_allocated_page() {
    let mem = PhysicalMemory::initialized();
    assert_eq!(free_page_count(&mem), PAGE_COUNT - 1);
    assert!(!is_page_free(&mem, 0));
    // Data area is untouched.
    for addr in PAGE_SIZE..MEM_SIZE {
        assert_eq!(mem.read(addr), 0);
    }
}

#[test]
fn np_ppt_sb_lb_kp_round_trip() {
    let mut mem = PhysicalMemory::initialized();

    // np 2 3: table in page 1, data in the next three lowest pages.
    new_process(&mut mem, 2, 3).unwrap();
    assert_eq!(get_page_table(&mem, 2), 1);
    assert_eq!(
        page_table_entries(&mem, 2),
        vec![(0, 2), (1, 3), (2, 4)]
    );

    // sb 2 0 99 / lb 2 0
    let stored = store_value(&mut mem, 2, 0, 99);
    assert_eq!(stored.to_string(), "Store proc 2: 0 => 512, value = 99");
    let loaded = load_value(&mem, 2, 0);
    assert_eq!(loaded.value, 99);
    assert_eq!(loaded.to_string(), "Load proc 2: 0 => 512, value = 99");

    // kp 2: table and data pages return to the pool, except the page named
    // by entry 0, which the reclaim loop skips.
    kill_process(&mut mem, 2);
    assert!(is_page_free(&mem, 1));
    assert!(!is_page_free(&mem, 2));
    assert!(is_page_free(&mem, 3));
    assert!(is_page_free(&mem, 4));
    assert!(!is_page_free(&mem, 0));
}

#[test]
fn two_processes_own_disjoint_pages() {
    let mut mem = PhysicalMemory::initialized();

    new_process(&mut mem, 2, 2).unwrap(); // table 1, data 2 3
    new_process(&mut mem, 3, 2).unwrap(); // table 4, data 5 6

    let owned_2: Vec<u8> = page_table_entries(&mem, 2).iter().map(|&(_, p)| p).collect();
    let owned_3: Vec<u8> = page_table_entries(&mem, 3).iter().map(|&(_, p)| p).collect();
    assert_eq!(owned_2, vec![2, 3]);
    assert_eq!(owned_3, vec![5, 6]);

    // Stores through one process do not land in the other's pages.
    store_value(&mut mem, 2, 0, 11);
    store_value(&mut mem, 3, 0, 22);
    assert_eq!(load_value(&mem, 2, 0).value, 11);
    assert_eq!(load_value(&mem, 3, 0).value, 22);
}

#[test]
fn store_load_every_page_and_offset_boundary() {
    let mut mem = PhysicalMemory::initialized();
    new_process(&mut mem, 2, 4).unwrap();

    for page in 0..4u32 {
        for offset in [0u32, 1, PAGE_SIZE as u32 / 2, PAGE_SIZE as u32 - 1] {
            let va = (page << PAGE_SHIFT) | offset;
            let value = (page * 100 + offset) % 256;
            store_value(&mut mem, 2, va, value);
            assert_eq!(load_value(&mem, 2, va).value, value as u8);
        }
    }
}

#[test]
fn oversized_page_count_reports_and_continues() {
    let mut mem = PhysicalMemory::initialized();

    let err = new_process(&mut mem, 2, PAGE_COUNT).unwrap_err();
    assert_eq!(err, VmError::PageTableOom { proc_num: 2 });
    assert!(!err.is_fatal());
    assert_eq!(free_page_count(&mem), PAGE_COUNT - 1);

    // The run goes on: the same process can be created with a sane count.
    new_process(&mut mem, 2, 1).unwrap();
    assert_eq!(page_table_entries(&mem, 2), vec![(0, 2)]);
}

#[test]
fn exhaustion_policy_is_asymmetric() {
    let mut mem = PhysicalMemory::initialized();
    while free_page_count(&mem) > 0 {
        allocate_page(&mut mem, 2).unwrap();
    }

    // Bootstrap process degrades to the sentinel, silently.
    assert_eq!(allocate_page(&mut mem, BOOTSTRAP_PROC), Ok(SENTINEL_PAGE));

    // Anyone else hits the fatal tier.
    let err = allocate_page(&mut mem, 2).unwrap_err();
    assert_eq!(err, VmError::DataPageOom { proc_num: 2 });
    assert!(err.is_fatal());
}

#[test]
fn kill_then_recreate_reuses_lowest_pages() {
    let mut mem = PhysicalMemory::initialized();

    new_process(&mut mem, 2, 2).unwrap(); // table 1, data 2 3
    kill_process(&mut mem, 2); // frees 1 and 3; entry-0 page 2 leaks

    new_process(&mut mem, 4, 2).unwrap();
    // First fit walks past the leaked page 2.
    assert_eq!(get_page_table(&mem, 4), 1);
    assert_eq!(page_table_entries(&mem, 4), vec![(0, 3), (1, 4)]);
}

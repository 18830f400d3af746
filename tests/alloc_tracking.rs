// Counts live heap bytes with a wrapping global allocator to show that
// re-initialize and teardown release every bucket and entry.
//
// Kept as the only test in this binary so no other test allocates
// concurrently while the counter is being compared.

use chained_hashtable::{ChainedHashTable, PjwHash};
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicIsize, Ordering};

struct Counting;

static LIVE: AtomicIsize = AtomicIsize::new(0);

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let p = System.alloc(layout);
        if !p.is_null() {
            LIVE.fetch_add(layout.size() as isize, Ordering::SeqCst);
        }
        p
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        LIVE.fetch_sub(layout.size() as isize, Ordering::SeqCst);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let p = System.realloc(ptr, layout, new_size);
        if !p.is_null() {
            LIVE.fetch_add(new_size as isize - layout.size() as isize, Ordering::SeqCst);
        }
        p
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

fn live() -> isize {
    LIVE.load(Ordering::SeqCst)
}

#[test]
fn reinitialize_and_teardown_release_everything() {
    let keys: Vec<String> = (0..500).map(|i| format!("word{i}")).collect();
    let mut t = ChainedHashTable::new();

    let baseline = live();
    t.initialize(128, PjwHash).unwrap();
    for k in &keys {
        t.insert(k).unwrap();
    }
    assert!(live() > baseline);

    // Re-initialize over a populated table, then fill it again.
    t.initialize(64, PjwHash).unwrap();
    assert_eq!(t.occupancy(), 0);
    let after_reinit = live();
    for k in &keys {
        t.insert(k).unwrap();
    }
    t.initialize(64, PjwHash).unwrap();
    assert_eq!(live(), after_reinit, "re-initialize leaked the previous table");

    t.teardown();
    assert_eq!(live(), baseline, "teardown left allocations behind");
    t.teardown();
    assert_eq!(live(), baseline);
}

// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Universal invariants that must hold after every public operation, checked
// against all three policies under a deterministic mixed workload:
//
//   1. len() == |keys()| == heap size
//   2. size() == Σ entry sizes (checked by check_invariants)
//   3. size() <= capacity
//   4. heap order and back-pointers are consistent
//   5. age() is monotonically non-decreasing except across purge()
//   6. peek/contains leave the key order untouched

use freqkit::policy::engine::{AgedCache, AgingPolicy};
use freqkit::policy::gdsf::Gdsf;
use freqkit::policy::lfu::Lfu;
use freqkit::policy::lfuda::Lfuda;

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn run_workload<P: AgingPolicy>() {
    let mut cache: AgedCache<u64, u64, P> = AgedCache::new(64.0);
    let mut rng = Lcg(7);
    let mut last_age = 0.0f64;

    for step in 0..4000u64 {
        let key = rng.next() % 200;
        match rng.next() % 10 {
            0..=4 => {
                cache.set(key, key);
            }
            5 | 6 => {
                if let Some(value) = cache.get(&key) {
                    assert_eq!(*value, key);
                }
            }
            7 => {
                let before = cache.keys();
                let peeked = cache.peek(&key).copied();
                let contained = cache.contains(&key);
                assert_eq!(peeked.is_some(), contained);
                assert_eq!(cache.keys(), before, "read-only ops reordered keys");
            }
            _ => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.remove(&key), was_present);
            }
        }

        if step % 1500 == 1499 {
            cache.purge();
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.size(), 0.0);
            assert_eq!(cache.age(), 0.0);
            last_age = 0.0;
        }

        cache.check_invariants().unwrap();
        cache.debug_validate_invariants();
        assert_eq!(cache.len(), cache.keys().len());
        assert!(cache.size() <= cache.capacity());
        assert!(
            cache.age() >= last_age,
            "age went backwards outside purge at step {step}"
        );
        last_age = cache.age();
    }
}

#[test]
fn lfu_workload_upholds_invariants() {
    run_workload::<Lfu>();
}

#[test]
fn lfuda_workload_upholds_invariants() {
    run_workload::<Lfuda>();
}

#[test]
fn gdsf_workload_upholds_invariants() {
    run_workload::<Gdsf>();
}

// ==============================================
// Algebraic laws
// ==============================================

fn laws<P: AgingPolicy>() {
    let mut cache: AgedCache<u64, u64, P> = AgedCache::new(100.0);

    // set then get observes the value
    cache.set(1, 10);
    assert_eq!(cache.get(&1), Some(&10));

    // set then remove then get misses
    cache.set(2, 20);
    assert!(cache.remove(&2));
    assert_eq!(cache.get(&2), None);

    // peek and contains are idempotent
    let keys = cache.keys();
    for _ in 0..3 {
        cache.peek(&1);
        cache.contains(&1);
    }
    assert_eq!(cache.keys(), keys);

    // purge zeroes everything
    cache.purge();
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.size(), 0.0);
    assert_eq!(cache.age(), 0.0);
}

#[test]
fn laws_hold_for_every_policy() {
    laws::<Lfu>();
    laws::<Lfuda>();
    laws::<Gdsf>();
}

use freqkit::policy::lfuda::LfudaCache;

fn main() {
    let mut cache: LfudaCache<&str, u64> = LfudaCache::new(2.0);

    cache.set("a", 1);
    cache.set("b", 2);

    cache.get(&"a");
    cache.set("c", 3);

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
    println!("age: {}", cache.age());
}

// Expected output:
// contains a? true
// contains b? false
// age: 1
//
// Explanation: capacity=2; "a" is accessed before inserting "c", so "b" is
// the lowest-priority entry and is evicted, raising the age floor to its
// priority.

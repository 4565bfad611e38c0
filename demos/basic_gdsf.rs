use freqkit::policy::gdsf::GdsfCache;

fn main() {
    let mut cache: GdsfCache<&str, String> = GdsfCache::with_evict(6.0, |key, value: &String| {
        println!("evicted {key} ({} bytes)", value.len());
    });

    cache.set("banner", "xxxx".to_string()); // 4 bytes, priority 1/4
    cache.set("icon", "x".to_string()); // 1 byte, priority 1
    cache.set("glyph", "y".to_string()); // 1 byte, priority 1

    // The cache is full; the low-density banner is the first victim.
    cache.set("dot", "z".to_string());

    println!("contains banner? {}", cache.contains(&"banner"));
    println!("len: {}, size: {}", cache.len(), cache.size());
}

// Expected output:
// evicted banner (4 bytes)
// contains banner? false
// len: 3, size: 3

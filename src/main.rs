use veb_rs::{KeyedSet, VebSet};

fn main() -> veb_rs::Result<()> {
    let mut set = VebSet::new(37)?;

    // Insert
    for v in [3u64, 8, 1, 1 << 36, 123_456_789] {
        set.insert(v)?;
    }

    // Membership
    println!("contains 8: {}", set.contains(8)?); // true
    println!("contains 5: {}", set.contains(5)?); // false

    // Min and max
    println!("min: {:?}, max: {:?}", set.min(), set.max()); // Some(1), Some(68719476736)

    // Successor / predecessor
    println!("succ(3): {:?}", set.succ(3)?); // Some(8)
    println!("pred(8): {:?}", set.pred(8)?); // Some(3)

    // Remove
    set.remove(3)?;
    println!("succ(1) after remove: {:?}", set.succ(1)?); // Some(8)
    if let Err(e) = set.remove(3) {
        println!("remove again: {e}");
    }

    // Out of range
    if let Err(e) = set.insert(1 << 40) {
        println!("insert: {e}");
    }

    println!("in order: {set:?}");

    // Arbitrary keys, ordered by hash
    let mut names = KeyedSet::with_ahash(32)?;
    for name in ["bid", "ask", "last", "mid"] {
        names.insert(name)?;
    }
    println!("first by hash: {:?}", names.min());
    println!("all by hash: {names:?}");
    Ok(())
}

//! Tracking variable bindings through nested scopes with a [`MarkableStack`], indexing their
//! depths with an [`IntegerMap`].
//!
//! Run with `RUST_LOG=warn` to see the unbalanced scope being reported.

use bagkit::prelude::*;

fn main() {
    env_logger::init();

    let mut bindings = MarkableStack::new();
    let mut depths = IntegerMap::new();

    bindings.mark();
    bindings.push("x");
    bindings.push("y");
    depths.put(0, bindings.len());

    bindings.mark();
    bindings.push("z");
    depths.put(1, bindings.len());
    println!("inner scope: {:?}", bindings.iter().collect::<Vec<_>>());

    // The inner scope forgot to pop "z", so unwinding discards it.
    let dropped = bindings.unwind();
    println!("discarded {dropped} binding(s)");
    println!("outer scope: {:?}", bindings.iter().collect::<Vec<_>>());

    for (depth, len) in &depths {
        println!("scope {depth} held {len} binding(s)");
    }

    let visible: Vec<_> = bindings.iter().filtering(|name: &&&str| **name != "y").collect();
    println!("visible but y: {visible:?}");
}

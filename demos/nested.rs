//! Tagging documents, then looking them up by their tag sets.

use bagkit::prelude::*;
use std::collections::BTreeSet;

fn main() -> Result<(), Error> {
    let mut tags: NestedHashSet<&str> = NestedHashSet::new();
    tags.try_insert(["rust", "collections", "sets"])?;
    tags.try_insert(["rust", "parsing"])?;
    tags.try_insert(["python", "sets"])?;
    tags.try_insert(["rust", "sets"])?;

    println!("tag sets: {tags}");
    println!("tag frequencies: {}", tags.flat());

    let query = BTreeSet::from(["rust", "sets"]);
    println!("supersets of {query:?}: {}", tags.supersets(&query));
    println!(
        "same, rarest tag first: {}",
        tags.sorted_array_supersets(&query)
    );
    println!("subsets of {query:?}: {}", tags.subsets(&query));
    println!("containing \"python\": {}", tags.containing_sets(&"python"));

    // A tag can't be repeated within a single set.
    if let Err(err) = tags.try_insert(["rust", "rust"]) {
        println!("rejected: {err}");
    }

    Ok(())
}

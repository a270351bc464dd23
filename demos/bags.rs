//! Counting words with multisets, then comparing the counts.
//!
//! Run with `RUST_LOG=trace` to see the cursor's bookkeeping.

use bagkit::prelude::*;
use std::collections::HashSet;

/// Splits a line into lowercase words.
fn words(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split_whitespace().map(str::to_lowercase)
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let first: MultiHashSet<_> = words("the cat saw the other cat").collect();
    let second: MultiHashSet<_> = words("the dog saw the cat").collect();
    println!("first:  {first}");
    println!("second: {second}");

    println!("union:        {}", first.union(&second));
    println!("intersection: {}", first.intersection(&second));
    println!("sum:          {}", first.sum(&second));
    println!("difference:   {}", first.difference(&second));

    let stop: HashSet<String> = ["the", "a"].map(String::from).into_iter().collect();
    println!("without stop words: {}", first.difference(&stop));
    println!("only stop words? {}", first.subset(&stop));

    // Drop every instance of "cat" while walking the multiset.
    let mut bag = first.clone();
    let mut cursor = bag.cursor();
    while let Some(word) = cursor.next(&bag)? {
        if word == "cat" {
            cursor.remove(&mut bag)?;
        }
    }
    println!("no cats: {bag}");

    Ok(())
}

//! Crate prelude.

// The actual prelude.
pub use crate::{
    error::Error,
    filter::{Filter, FilterExt, FilteringIterator},
    int_map::IntegerMap,
    mset::{Cursor, MultiHashSet, MultiSet, Operand},
    nested::{NestedHashSet, NestedSet},
    stack::MarkableStack,
};

// Convenient imports within the crate.
pub(crate) use crate::{
    error::Result,
    utils::{fingerprint, write_roster, HashMemo},
    SmallVec,
};
pub(crate) use bitvec::prelude::*;
pub(crate) use derive_more::From;
pub(crate) use std::{
    collections::{hash_map, BTreeSet, HashMap, HashSet},
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    mem,
};

//! The crate [`Error`] type.

/// Errors reported by the collections in this crate.
///
/// Misuse that only deserves a diagnostic, like pushing onto a
/// [`MarkableStack`](crate::stack::MarkableStack) outside of a marked scope, is logged instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A collection passed where an elementary set was expected contains repeated elements.
    #[error("not a set: the collection contains repeated elements")]
    NotASet,

    /// A multiset was structurally modified behind the back of an active
    /// [`Cursor`](crate::mset::Cursor).
    #[error("multiset was modified outside of the active cursor")]
    ConcurrentModification,

    /// An iteration protocol was violated.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The operation is never supported by this type.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// An [`IntegerMap`](crate::int_map::IntegerMap) was configured with a load factor that isn't
    /// a positive number.
    #[error("load factor must be a positive number, got {0}")]
    InvalidLoadFactor(f32),
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

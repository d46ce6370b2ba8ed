//! Entity trait: records that keep their identity while their fields change.

/// Entity marker + minimal interface.
///
/// A product stays the same product after an admin renames or reprices it;
/// a cart line or a money amount has no such identity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

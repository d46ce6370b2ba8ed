//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values: two
/// `Money` amounts of 350.00 are the same amount, and a sale line snapshot
/// stays equal to itself no matter what later happens to the catalog.
///
/// ```ignore
/// let a: Money = "350".parse()?;
/// let b = Money::from_units(350);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

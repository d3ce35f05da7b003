use std::cmp::Ordering;

/// How individual bytes of a component are interpreted when ordering keys.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ComponentOrder {
    /// Bytes compare as `u8`. This is the order produced by order-preserving key encodings.
    Unsigned,
    /// Bytes compare as `i8`, so `0x80..=0xFF` sort before `0x00`.
    Signed,
}

impl Default for ComponentOrder {
    fn default() -> Self {
        ComponentOrder::Unsigned
    }
}

/// Compares a single pair of key components.
///
/// The first mismatching byte decides. Components that match on their common
/// prefix sort the shorter one first.
pub fn compare_component(left: &[u8], right: &[u8], order: ComponentOrder) -> Ordering {
    let mismatch = left
        .iter()
        .zip(right.iter())
        .map(|(l, r)| match order {
            ComponentOrder::Unsigned => l.cmp(r),
            ComponentOrder::Signed => (*l as i8).cmp(&(*r as i8)),
        })
        .find(|ordering| *ordering != Ordering::Equal);

    mismatch.unwrap_or_else(|| left.len().cmp(&right.len()))
}

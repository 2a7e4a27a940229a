/// Outcome of looking up a record slot.
///
/// `Absent` covers both a backing file that was never created and a slot
/// that lies entirely beyond the end of the file. A slot cut short by the end
/// of the file is not absent; it is reported as
/// [`AccessError::ShortRead`](crate::AccessError::ShortRead).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<R> {
    Present(R),
    Absent,
}

impl<R> Slot<R> {
    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Slot::Present(_))
    }

    pub fn into_option(self) -> Option<R> {
        match self {
            Slot::Present(record) => Some(record),
            Slot::Absent => None,
        }
    }
}

impl<R> From<Slot<R>> for Option<R> {
    fn from(slot: Slot<R>) -> Self {
        slot.into_option()
    }
}

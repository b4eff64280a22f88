/// Ticket identifying one issued dataset fetch.
///
/// Tickets are allocated monotonically by the coordinator, so a settlement can
/// always be matched against the fetch that is currently tracked for its code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u64);

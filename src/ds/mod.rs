pub mod entry;
pub mod frequency_heap;
pub mod recency_list;
pub mod slot_arena;

pub use entry::Entry;
pub use frequency_heap::FrequencyHeap;
pub use recency_list::RecencyList;
pub use slot_arena::{SlotArena, SlotId};

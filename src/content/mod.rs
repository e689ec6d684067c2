mod listing;
mod record;

pub use self::{
    listing::{ITEMS_PER_PAGE, Page, SortOption, TypeCounts, TypeFilter, search, sort},
    record::{ContentRecord, ContentRef, ContentType, sample_contents},
};

use serde::{Deserialize, Serialize};

use super::{ContentRecord, ContentType};

/// 每页条数
pub const ITEMS_PER_PAGE: usize = 10;

/// 类型标签页筛选
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Blog,
    Resume,
    Portfolio,
}

impl TypeFilter {
    pub fn matches(&self, kind: ContentType) -> bool {
        match self {
            Self::All => true,
            Self::Blog => kind == ContentType::Blog,
            Self::Resume => kind == ContentType::Resume,
            Self::Portfolio => kind == ContentType::Portfolio,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// 按更新时间，新的在前
    #[default]
    Latest,
    /// 按创建时间，旧的在前
    Oldest,
    TitleAsc,
    TitleDesc,
}

/// 各类型的数量，`all` 为总数
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub all: usize,
    pub blog: usize,
    pub resume: usize,
    pub portfolio: usize,
}

impl TypeCounts {
    pub fn count(contents: &[ContentRecord]) -> Self {
        contents.iter().fold(
            Self {
                all: contents.len(),
                ..Default::default()
            },
            |mut acc, c| {
                match c.kind {
                    ContentType::Blog => acc.blog += 1,
                    ContentType::Resume => acc.resume += 1,
                    ContentType::Portfolio => acc.portfolio += 1,
                }
                acc
            },
        )
    }
}

/// 分页结果，页码从 1 开始
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// 取第 `page` 页，页码小于 1 时按第 1 页处理，超出范围时返回空页
    pub fn paginate(all: Vec<T>, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total = all.len();
        let total_pages = total.div_ceil(per_page);
        let items = all
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        Self {
            items,
            page,
            total_pages,
            total,
        }
    }
}

/// 按标题做大小写无关的子串匹配，空查询匹配全部
pub fn search<'a>(
    contents: impl IntoIterator<Item = &'a ContentRecord>,
    query: &str,
) -> Vec<&'a ContentRecord> {
    let query = query.trim().to_lowercase();
    contents
        .into_iter()
        .filter(|c| query.is_empty() || c.title.to_lowercase().contains(&query))
        .collect()
}

pub fn sort(contents: &mut [&ContentRecord], option: SortOption) {
    match option {
        SortOption::Latest => contents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortOption::Oldest => contents.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::TitleAsc => contents.sort_by(|a, b| title_key(a).cmp(&title_key(b))),
        SortOption::TitleDesc => contents.sort_by(|a, b| title_key(b).cmp(&title_key(a))),
    }
}

fn title_key(c: &ContentRecord) -> (String, &str) {
    (c.title.to_lowercase(), c.title.as_str())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(id: &str, kind: ContentType, title: &str, day: u32) -> ContentRecord {
        let at = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        let mut r = ContentRecord::new(id, kind, at);
        r.title = title.to_string();
        r
    }

    #[test]
    fn test_type_counts() {
        let contents = vec![
            record("a", ContentType::Blog, "a", 1),
            record("b", ContentType::Blog, "b", 2),
            record("c", ContentType::Resume, "c", 3),
        ];
        let counts = TypeCounts::count(&contents);
        assert_eq!(
            counts,
            TypeCounts {
                all: 3,
                blog: 2,
                resume: 1,
                portfolio: 0
            }
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let contents = vec![
            record("a", ContentType::Blog, "Rust Notes", 1),
            record("b", ContentType::Blog, "Cover letter", 2),
        ];
        let found = search(&contents, "  rust ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
        assert_eq!(search(&contents, "").len(), 2);
    }

    #[test]
    fn test_sort_options() {
        let contents = vec![
            record("a", ContentType::Blog, "beta", 2),
            record("b", ContentType::Blog, "Alpha", 1),
            record("c", ContentType::Blog, "gamma", 3),
        ];
        let mut refs: Vec<_> = contents.iter().collect();

        sort(&mut refs, SortOption::Latest);
        assert_eq!(refs.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["c", "a", "b"]);

        sort(&mut refs, SortOption::Oldest);
        assert_eq!(refs.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["b", "a", "c"]);

        sort(&mut refs, SortOption::TitleAsc);
        assert_eq!(refs.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["b", "a", "c"]);

        sort(&mut refs, SortOption::TitleDesc);
        assert_eq!(refs.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["c", "a", "b"]);
    }

    #[test]
    fn test_paginate() {
        let page = Page::paginate((0..25).collect::<Vec<_>>(), 3, ITEMS_PER_PAGE);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 25);

        let page = Page::paginate((0..5).collect::<Vec<_>>(), 0, ITEMS_PER_PAGE);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 5);

        let empty = Page::paginate(Vec::<i32>::new(), 1, ITEMS_PER_PAGE);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_paginate_page_out_of_range() {
        let page = Page::paginate((0..5).collect::<Vec<_>>(), usize::MAX, ITEMS_PER_PAGE);
        assert_eq!(page.page, usize::MAX);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());

        let page = Page::paginate((0..25).collect::<Vec<_>>(), 4, ITEMS_PER_PAGE);
        assert!(page.items.is_empty());
    }
}

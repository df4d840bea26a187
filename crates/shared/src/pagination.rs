#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    pub page: u32,
    pub limit: u32,
}

impl PageArgs {
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(max_limit);

        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageArgs {
    fn default() -> Self {
        Self { page: 1, limit: 6 }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub count: u64,
    pub items: Vec<T>,
    pub args: PageArgs,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.args.offset() + u64::from(self.args.limit) < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.args.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
            args: self.args,
        }
    }
}

use serde::Serialize;

/// Position of the returned slice within all top-level rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub size: usize,
    pub total_pages: usize,
}

impl Page {
    /// Clamps `number` into `1..=total_pages` (page 1 when there are no
    /// rows) and a zero `size` to 1.
    pub fn new(number: usize, size: usize, total_rows: usize) -> Self {
        let size = size.max(1);
        let total_pages = total_rows.div_ceil(size);
        let number = number.clamp(1, total_pages.max(1));
        Self {
            number,
            size,
            total_pages,
        }
    }

    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter()
            .skip((self.number - 1) * self.size)
            .take(self.size)
            .collect()
    }
}

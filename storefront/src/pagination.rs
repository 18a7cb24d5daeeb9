// burgerbox_storefront/src/pagination.rs

//! Client-side paging of lists that the API returns whole.

pub const CATALOG_PER_PAGE: usize = 6;
pub const ORDER_HISTORY_PER_PAGE: usize = 5;
pub const ADMIN_ORDERS_PER_PAGE: usize = 9;

pub fn total_pages(len: usize, per_page: usize) -> usize {
  if per_page == 0 {
    return 0;
  }
  len.div_ceil(per_page)
}

/// Items on 1-based `page`. Out-of-range pages are empty.
pub fn page<T>(items: &[T], per_page: usize, page: usize) -> &[T] {
  if per_page == 0 || page == 0 {
    return &[];
  }
  let start = (page - 1).saturating_mul(per_page);
  if start >= items.len() {
    return &[];
  }
  let end = start.saturating_add(per_page).min(items.len());
  &items[start..end]
}

/// The number of posts shown on a single listing page.
pub const PER_PAGE: i64 = 10;

/// Why a requested page number cannot be served as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPage {
	#[error("that page number is not an integer")]
	NotAnInteger,
	#[error("that page number is less than 1")]
	LessThanOne,
	#[error("that page contains no results")]
	NoResults,
}

/// Splits a collection of `count` items into pages of `per_page` items.
///
/// An empty collection still has a single, empty first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
	count: i64,
	per_page: i64,
}

impl Paginator {
	pub fn new(count: i64, per_page: i64) -> Self {
		Self {
			count: count.max(0),
			per_page: per_page.max(1),
		}
	}

	pub fn count(&self) -> i64 {
		self.count
	}

	pub fn per_page(&self) -> i64 {
		self.per_page
	}

	pub fn num_pages(&self) -> i64 {
		if self.count == 0 {
			return 1;
		}

		(self.count + self.per_page - 1) / self.per_page
	}

	/// Parses and bounds-checks a raw page number.
	pub fn validate_number(&self, raw: &str) -> Result<i64, InvalidPage> {
		let number = raw
			.trim()
			.parse::<i64>()
			.map_err(|_| InvalidPage::NotAnInteger)?;

		if number < 1 {
			return Err(InvalidPage::LessThanOne);
		}

		if number > self.num_pages() {
			return Err(InvalidPage::NoResults);
		}

		Ok(number)
	}

	/// Resolves a requested page number leniently, the way listing pages do.
	///
	/// A missing or non-numeric value yields the first page, and a number outside
	/// of `1..=num_pages` yields the last page.
	pub fn resolve(&self, raw: Option<&str>) -> i64 {
		let Some(raw) = raw else {
			return 1;
		};

		match self.validate_number(raw) {
			Ok(number) => number,
			Err(InvalidPage::NotAnInteger) => 1,
			Err(InvalidPage::LessThanOne | InvalidPage::NoResults) => self.num_pages(),
		}
	}

	/// The SQL `OFFSET` of the given page.
	pub fn offset(&self, number: i64) -> i64 {
		(number.max(1) - 1) * self.per_page
	}

	/// The SQL `LIMIT` of every page.
	pub fn limit(&self) -> i64 {
		self.per_page
	}

	/// Wraps an already-sliced set of items as the page `number`.
	pub fn page<T>(&self, number: i64, items: Vec<T>) -> Page<T> {
		Page {
			items,
			number,
			paginator: *self,
		}
	}
}

/// A numbered link in the page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
	pub number: i64,
	pub current: bool,
}

/// A single page of items, along with what the templates need to navigate
/// between pages.
#[derive(Debug, Clone)]
pub struct Page<T> {
	pub items: Vec<T>,
	number: i64,
	paginator: Paginator,
}

impl<T> Page<T> {
	pub fn number(&self) -> i64 {
		self.number
	}

	pub fn num_pages(&self) -> i64 {
		self.paginator.num_pages()
	}

	/// The number of items across all pages.
	pub fn count(&self) -> i64 {
		self.paginator.count()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn has_next(&self) -> bool {
		self.number < self.num_pages()
	}

	pub fn has_previous(&self) -> bool {
		self.number > 1
	}

	pub fn has_other_pages(&self) -> bool {
		self.has_next() || self.has_previous()
	}

	pub fn next_page_number(&self) -> Option<i64> {
		self.has_next().then_some(self.number + 1)
	}

	pub fn previous_page_number(&self) -> Option<i64> {
		self.has_previous().then_some(self.number - 1)
	}

	/// The 1-based index of the first item on this page, or 0 for an empty page.
	pub fn start_index(&self) -> i64 {
		if self.count() == 0 {
			return 0;
		}

		self.paginator.offset(self.number) + 1
	}

	/// The 1-based index of the last item on this page, or 0 for an empty page.
	pub fn end_index(&self) -> i64 {
		if self.number == self.num_pages() {
			return self.count();
		}

		self.number * self.paginator.per_page()
	}

	pub fn links(&self) -> Vec<PageLink> {
		(1..=self.num_pages())
			.map(|number| PageLink {
				number,
				current: number == self.number,
			})
			.collect()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_num_pages() {
		assert_eq!(Paginator::new(0, PER_PAGE).num_pages(), 1);
		assert_eq!(Paginator::new(1, PER_PAGE).num_pages(), 1);
		assert_eq!(Paginator::new(10, PER_PAGE).num_pages(), 1);
		assert_eq!(Paginator::new(11, PER_PAGE).num_pages(), 2);
		assert_eq!(Paginator::new(13, PER_PAGE).num_pages(), 2);
	}

	#[test]
	fn test_validate_number() {
		let paginator = Paginator::new(13, PER_PAGE);

		assert_eq!(paginator.validate_number("2"), Ok(2));
		assert_eq!(paginator.validate_number(" 1 "), Ok(1));
		assert_eq!(
			paginator.validate_number("two"),
			Err(InvalidPage::NotAnInteger)
		);
		assert_eq!(paginator.validate_number("0"), Err(InvalidPage::LessThanOne));
		assert_eq!(paginator.validate_number("3"), Err(InvalidPage::NoResults));
	}

	#[test]
	fn test_resolve_clamps() {
		let paginator = Paginator::new(13, PER_PAGE);

		assert_eq!(paginator.resolve(None), 1);
		assert_eq!(paginator.resolve(Some("")), 1);
		assert_eq!(paginator.resolve(Some("abc")), 1);
		assert_eq!(paginator.resolve(Some("2")), 2);
		assert_eq!(paginator.resolve(Some("99")), 2);
		assert_eq!(paginator.resolve(Some("-1")), 2);
	}

	#[test]
	fn test_empty_collection_has_one_page() {
		let paginator = Paginator::new(0, PER_PAGE);

		assert_eq!(paginator.resolve(Some("1")), 1);
		assert_eq!(paginator.resolve(Some("5")), 1);

		let page = paginator.page::<()>(1, Vec::new());

		assert!(page.is_empty());
		assert!(!page.has_other_pages());
		assert_eq!(page.start_index(), 0);
		assert_eq!(page.end_index(), 0);
	}

	#[test]
	fn test_offset_and_limit() {
		let paginator = Paginator::new(13, PER_PAGE);

		assert_eq!(paginator.offset(1), 0);
		assert_eq!(paginator.offset(2), 10);
		assert_eq!(paginator.limit(), 10);

		let paginator = Paginator::new(13, 5);

		assert_eq!(paginator.offset(3), 10);
	}

	#[test]
	fn test_page_navigation() {
		let paginator = Paginator::new(13, PER_PAGE);

		let first = paginator.page(1, (1..=10).collect::<Vec<_>>());

		assert_eq!(first.len(), 10);
		assert!(first.has_next());
		assert!(!first.has_previous());
		assert_eq!(first.next_page_number(), Some(2));
		assert_eq!(first.previous_page_number(), None);
		assert_eq!((first.start_index(), first.end_index()), (1, 10));

		let second = paginator.page(2, (11..=13).collect::<Vec<_>>());

		assert_eq!(second.len(), 3);
		assert!(!second.has_next());
		assert_eq!(second.previous_page_number(), Some(1));
		assert_eq!((second.start_index(), second.end_index()), (11, 13));
		assert_eq!(
			second.links(),
			vec![
				PageLink {
					number: 1,
					current: false
				},
				PageLink {
					number: 2,
					current: true
				},
			]
		);
	}
}

/// Closed, inclusive interval of item positions selected by a range
/// qualifier such as `[2-4]` or `[3]`.
///
/// Bounds are signed: an empty list yields `[0, -1]`, which matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeExpression {
    first: i64,
    last: i64,
}

impl RangeExpression {
    /// The range covering every position of a list of `len` items.
    pub fn full(len: usize) -> Self {
        Self {
            first: 0,
            last: i64::try_from(len).unwrap_or(i64::MAX) - 1,
        }
    }

    pub fn first(&self) -> i64 {
        self.first
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    /// True iff `first <= index <= last`.
    pub fn in_range(&self, index: usize) -> bool {
        match i64::try_from(index) {
            Ok(i) => self.first <= i && i <= self.last,
            Err(_) => false,
        }
    }
}

/// Parses a range qualifier for a list of `len` items. Never fails.
///
/// - `"N-M"` splits on the first `-`; each side that parses as an integer
///   replaces its default bound (`0` and `len - 1`).
/// - `"N"` selects the single position `N`.
/// - Anything unparsable keeps the defaults, i.e. selects the whole list.
///
/// # Examples
///
/// ```
/// use rss2json::query::parse_range;
///
/// let range = parse_range(10, "2-4");
/// assert!(range.in_range(2) && range.in_range(4));
/// assert!(!range.in_range(5));
///
/// // A malformed bound falls back to its default
/// let range = parse_range(10, "bogus-3");
/// assert_eq!((range.first(), range.last()), (0, 3));
/// ```
pub fn parse_range(len: usize, expr: &str) -> RangeExpression {
    let mut range = RangeExpression::full(len);

    match expr.split_once('-') {
        Some((first, last)) => {
            if let Some(first) = parse_bound(expr, first) {
                range.first = first;
            }
            if let Some(last) = parse_bound(expr, last) {
                range.last = last;
            }
        }
        None => {
            if let Some(index) = parse_bound(expr, expr) {
                range.first = index;
                range.last = index;
            }
        }
    }
    range
}

fn parse_bound(expr: &str, bound: &str) -> Option<i64> {
    match bound.parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => {
            if !bound.is_empty() {
                tracing::debug!(expr, bound, error = %e, "Ignoring malformed range bound");
            }
            None
        }
    }
}

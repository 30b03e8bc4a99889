//! Catalog browsing enums.

use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Dresses,
    Tops,
    Outerwear,
}

impl Category {
    /// Human-readable label for selectors and product cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dresses => "Dresses",
            Self::Tops => "Tops",
            Self::Outerwear => "Outerwear",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dresses => write!(f, "dresses"),
            Self::Tops => write!(f, "tops"),
            Self::Outerwear => write!(f, "outerwear"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dresses" => Ok(Self::Dresses),
            "tops" => Ok(Self::Tops),
            "outerwear" => Ok(Self::Outerwear),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Category filter for catalog browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every category passes.
    #[default]
    All,
    /// Only the named category passes.
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == category,
        }
    }

    /// Label for the filter selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Every filter option, in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::All,
            Self::Only(Category::Dresses),
            Self::Only(Category::Tops),
            Self::Only(Category::Outerwear),
        ]
    }

    /// The next filter option, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all.get((idx + 1) % all.len()).copied().unwrap_or(self)
    }

    /// The previous filter option, wrapping at the start.
    #[must_use]
    pub fn previous(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all.get(prev).copied().unwrap_or(self)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Sort order for catalog browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order, the curated default.
    #[default]
    Popular,
    /// Price, cheapest first.
    PriceAsc,
    /// Price, most expensive first.
    PriceDesc,
    /// Rating, best first.
    Rating,
}

impl SortOrder {
    /// Label for the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Rating => "Rating",
        }
    }

    /// Every sort option, in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Popular, Self::PriceAsc, Self::PriceDesc, Self::Rating]
    }

    /// The next sort option, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|s| *s == self).unwrap_or(0);
        all.get((idx + 1) % all.len()).copied().unwrap_or(self)
    }

    /// The previous sort option, wrapping at the start.
    #[must_use]
    pub fn previous(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|s| *s == self).unwrap_or(0);
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all.get(prev).copied().unwrap_or(self)
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Popular => write!(f, "popular"),
            Self::PriceAsc => write!(f, "price-asc"),
            Self::PriceDesc => write!(f, "price-desc"),
            Self::Rating => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in [Category::Dresses, Category::Tops, Category::Outerwear] {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!("shoes".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_all_matches_everything() {
        for category in [Category::Dresses, Category::Tops, Category::Outerwear] {
            assert!(CategoryFilter::All.matches(category));
        }
    }

    #[test]
    fn test_filter_only_matches_its_category() {
        let filter = CategoryFilter::Only(Category::Tops);
        assert!(filter.matches(Category::Tops));
        assert!(!filter.matches(Category::Dresses));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "tops".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Tops)
        );
        assert!("shoes".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_cycle_wraps() {
        let mut filter = CategoryFilter::All;
        for _ in 0..CategoryFilter::all().len() {
            filter = filter.next();
        }
        assert_eq!(filter, CategoryFilter::All);
        assert_eq!(CategoryFilter::All.previous().next(), CategoryFilter::All);
    }

    #[test]
    fn test_sort_order_roundtrip() {
        for &sort in SortOrder::all() {
            let parsed: SortOrder = sort.to_string().parse().unwrap();
            assert_eq!(parsed, sort);
        }
    }

    #[test]
    fn test_sort_order_cycle_wraps() {
        let mut sort = SortOrder::Popular;
        for _ in 0..SortOrder::all().len() {
            sort = sort.next();
        }
        assert_eq!(sort, SortOrder::Popular);
    }
}

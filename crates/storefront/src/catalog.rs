//! Product catalog and browse logic.
//!
//! The demo storefront ships a small fixed catalog. Browsing filters
//! by category and orders the result without mutating the catalog
//! itself, so the same `Catalog` can back every view and the cart.

use boutique_core::{Category, CategoryFilter, CurrencyCode, Price, ProductId, Rating, SortOrder};

/// One sellable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub rating: Rating,
    pub category: Category,
    /// Path to the product image asset.
    pub image: String,
    pub description: String,
}

/// The full set of products the storefront can sell.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in demo catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded product data fails validation, which the
    /// catalog tests rule out.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            product(
                "p1",
                "Elegant Evening Gown",
                3499,
                48,
                Category::Dresses,
                "images/dress1.jpg",
                "Flowing silhouette, premium fabric.",
            ),
            product(
                "p2",
                "Summer Sundress",
                1299,
                45,
                Category::Dresses,
                "images/dress2.jpg",
                "Breathable, casual summer style.",
            ),
            product(
                "p3",
                "Silk Blouse",
                999,
                43,
                Category::Tops,
                "images/dress3.jpg",
                "Lightweight and luxe.",
            ),
            product(
                "p4",
                "Trench Coat",
                4999,
                47,
                Category::Outerwear,
                "images/dress4.jpg",
                "Classic polished finish.",
            ),
        ])
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// The currency everything in this catalog is priced in.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.products
            .first()
            .map_or_else(CurrencyCode::default, |p| p.price.currency_code)
    }

    /// Products matching `filter`, ordered by `sort`.
    ///
    /// Sorting is stable: products that compare equal keep their
    /// catalog order, and [`SortOrder::Popular`] is the catalog order
    /// itself.
    #[must_use]
    pub fn browse(&self, filter: CategoryFilter, sort: SortOrder) -> Vec<&Product> {
        let mut list: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p.category))
            .collect();
        match sort {
            SortOrder::Popular => {}
            SortOrder::PriceAsc => list.sort_by_key(|p| p.price.amount),
            SortOrder::PriceDesc => list.sort_by_key(|p| std::cmp::Reverse(p.price.amount)),
            SortOrder::Rating => list.sort_by_key(|p| std::cmp::Reverse(p.rating)),
        }
        list
    }
}

fn product(
    id: &str,
    title: &str,
    price_units: i64,
    rating_tenths: u8,
    category: Category,
    image: &str,
    description: &str,
) -> Product {
    Product {
        id: ProductId::parse(id).expect("demo product id is valid"),
        title: title.to_string(),
        price: Price::from_major_units(price_units, CurrencyCode::INR),
        rating: Rating::from_tenths(rating_tenths).expect("demo rating is in range"),
        category,
        image: image.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(list: &[&Product]) -> Vec<String> {
        list.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_demo_catalog_is_valid() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.products().len(), 4);
        assert_eq!(catalog.currency(), CurrencyCode::INR);
    }

    #[test]
    fn test_get_and_contains() {
        let catalog = Catalog::demo();
        let id = ProductId::parse("p3").unwrap();
        assert_eq!(catalog.get(&id).unwrap().title, "Silk Blouse");
        assert!(catalog.contains(&id));
        assert!(!catalog.contains(&ProductId::parse("p9").unwrap()));
    }

    #[test]
    fn test_browse_popular_keeps_catalog_order() {
        let catalog = Catalog::demo();
        let list = catalog.browse(CategoryFilter::All, SortOrder::Popular);
        assert_eq!(ids(&list), ["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_browse_filters_by_category() {
        let catalog = Catalog::demo();
        let list = catalog.browse(CategoryFilter::Only(Category::Dresses), SortOrder::Popular);
        assert_eq!(ids(&list), ["p1", "p2"]);
    }

    #[test]
    fn test_browse_sorts_by_price() {
        let catalog = Catalog::demo();
        let asc = catalog.browse(CategoryFilter::All, SortOrder::PriceAsc);
        assert_eq!(ids(&asc), ["p3", "p2", "p1", "p4"]);
        let desc = catalog.browse(CategoryFilter::All, SortOrder::PriceDesc);
        assert_eq!(ids(&desc), ["p4", "p1", "p2", "p3"]);
    }

    #[test]
    fn test_browse_sorts_by_rating_descending() {
        let catalog = Catalog::demo();
        let list = catalog.browse(CategoryFilter::All, SortOrder::Rating);
        assert_eq!(ids(&list), ["p1", "p4", "p2", "p3"]);
    }

    #[test]
    fn test_browse_filter_and_sort_compose() {
        let catalog = Catalog::demo();
        let list = catalog.browse(CategoryFilter::Only(Category::Dresses), SortOrder::PriceDesc);
        assert_eq!(ids(&list), ["p1", "p2"]);
    }

    #[test]
    fn test_price_sort_is_stable_for_ties() {
        let mut products = Catalog::demo().products().to_vec();
        // Give the first two products the same price; their relative
        // order must survive sorting.
        let first_price = products.first().unwrap().price;
        if let Some(second) = products.get_mut(1) {
            second.price = first_price;
        }
        let catalog = Catalog::new(products);
        let list = catalog.browse(CategoryFilter::All, SortOrder::PriceAsc);
        assert_eq!(ids(&list), ["p3", "p1", "p2", "p4"]);
    }

    #[test]
    fn test_browse_does_not_mutate_catalog() {
        let catalog = Catalog::demo();
        let _ = catalog.browse(CategoryFilter::All, SortOrder::PriceAsc);
        assert_eq!(ids(&catalog.browse(CategoryFilter::All, SortOrder::Popular)), ["p1", "p2", "p3", "p4"]);
    }
}

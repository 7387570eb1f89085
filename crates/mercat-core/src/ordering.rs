//! # Ordering Policies
//!
//! Comparators applied when a cart is listed or checked out. They are plain
//! functions for `sort_by`; they never reorder the cart itself.
//!
//! - [`by_price`]: receipts, cheapest base price first.
//! - [`by_composition`]: textile block of the cart listing.

use std::cmp::Ordering;

use crate::product::{Product, Textile};

/// Orders products by base price, ascending.
///
/// Uses IEEE total ordering so the comparison is total even for values a
/// validated product can never hold (NaN). Equal prices compare `Equal`,
/// so a stable sort keeps insertion order for ties.
pub fn by_price(a: &Product, b: &Product) -> Ordering {
    a.base_price().total_cmp(&b.base_price())
}

/// Orders textiles by composition, case-sensitive lexicographic.
pub fn by_composition(a: &Textile, b: &Textile) -> Ordering {
    a.composition().cmp(b.composition())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt(barcode: &str, price: f64, composition: &str) -> Product {
        Product::textile("Samarreta", price, barcode, composition).unwrap()
    }

    #[test]
    fn test_by_price_sorts_ascending_and_keeps_ties_stable() {
        let mut products = vec![
            shirt("1", 30.0, "wool"),
            shirt("2", 5.0, "wool"),
            shirt("3", 30.0, "silk"),
            shirt("4", 12.5, "cotton"),
        ];
        products.sort_by(by_price);

        let order: Vec<&str> = products.iter().map(|p| p.barcode()).collect();
        assert_eq!(order, ["2", "4", "1", "3"]);
    }

    #[test]
    fn test_by_composition_is_case_sensitive() {
        let products = [
            shirt("1", 1.0, "wool"),
            shirt("2", 1.0, "Silk"),
            shirt("3", 1.0, "cotton"),
        ];
        let mut textiles: Vec<&Textile> = products.iter().filter_map(Product::as_textile).collect();
        textiles.sort_by(|a, b| by_composition(a, b));

        let order: Vec<&str> = textiles.iter().map(|t| t.composition()).collect();
        // uppercase sorts before lowercase
        assert_eq!(order, ["Silk", "cotton", "wool"]);
    }
}

//! Filter to keep only items of the requested drink category.

use crate::traits::Filter;
use catalog::{CatalogItem, DrinkCategory};

/// Keeps items whose `category` equals the requested one, ignoring case.
///
/// The comparison is exact: "sparkling red wine" is not "red wine".
pub struct CategoryFilter {
    category: DrinkCategory,
}

impl CategoryFilter {
    pub fn new(category: DrinkCategory) -> Self {
        Self { category }
    }
}

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a CatalogItem>) -> Vec<&'a CatalogItem> {
        candidates
            .into_iter()
            .filter(|item| item.is_in_category(self.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_keeps_order() {
        let items = vec![
            CatalogItem::new("Chablis", "White Wine"),
            CatalogItem::new("Pilsner", "beer"),
            CatalogItem::new("Riesling", "white wine"),
        ];

        let filter = CategoryFilter::new(DrinkCategory::WhiteWine);
        let filtered = filter.apply(items.iter().collect());

        let names: Vec<_> = filtered.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Chablis", "Riesling"]);
    }
}

use crate::models::Plant;

/// Client-side narrowing of an already fetched plant list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontFilters {
    pub search_term: String,
    pub selected_categories: Vec<String>,
    pub in_stock_only: bool,
}

impl StorefrontFilters {
    pub fn update_search_term(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
    }

    pub fn update_categories(&mut self, selected_categories: Vec<String>) {
        self.selected_categories = selected_categories;
    }

    pub fn toggle_in_stock_only(&mut self) {
        self.in_stock_only = !self.in_stock_only;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || !self.selected_categories.is_empty() || self.in_stock_only
    }

    /// Search term OR-matches name, categories, scientific name and description;
    /// the category selection is any-of; all three parts must hold.
    pub fn matches(&self, plant: &Plant) -> bool {
        self.matches_search(plant) && self.matches_categories(plant) && self.matches_stock(plant)
    }

    pub fn apply<'a>(&self, plants: &'a [Plant]) -> Vec<&'a Plant> {
        plants.iter().filter(|plant| self.matches(plant)).collect()
    }

    fn matches_search(&self, plant: &Plant) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&needle);

        contains(&plant.name)
            || plant.categories.iter().any(|c| contains(c))
            || plant.scientific_name.as_deref().is_some_and(contains)
            || plant.description.as_deref().is_some_and(contains)
    }

    fn matches_categories(&self, plant: &Plant) -> bool {
        self.selected_categories.is_empty()
            || self
                .selected_categories
                .iter()
                .any(|category| plant.has_category(category))
    }

    fn matches_stock(&self, plant: &Plant) -> bool {
        !self.in_stock_only || plant.in_stock
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{CareLevel, Sunlight, Watering};

    fn plant(name: &str, categories: &[&str], in_stock: bool) -> Plant {
        Plant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: 100.0,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            in_stock,
            image: format!("https://example.com/{name}.jpg"),
            description: None,
            scientific_name: None,
            care_level: CareLevel::Easy,
            sunlight: Sunlight::Low,
            watering: Watering::Low,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Plant> {
        let mut aloe = plant("Aloe Vera", &["Succulent", "Medicinal"], true);
        aloe.scientific_name = Some("Aloe barbadensis".into());
        let mut tulsi = plant("Tulsi", &["Herb", "Medicinal"], false);
        tulsi.description = Some("Holy basil with a peppery aroma".into());
        vec![
            aloe,
            tulsi,
            plant("Golden Barrel", &["Cactus", "Desert"], true),
            plant("Snake Plant", &["Indoor", "Low Light"], true),
            plant("Echeveria", &["Succulent", "Small"], false),
        ]
    }

    fn names(plants: Vec<&Plant>) -> Vec<&str> {
        plants.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn no_filters_keep_everything() {
        let plants = catalog();
        let filters = StorefrontFilters::default();
        assert!(!filters.is_active());
        assert_eq!(filters.apply(&plants).len(), plants.len());
    }

    #[test]
    fn two_categories_give_the_union() {
        let plants = catalog();
        let mut filters = StorefrontFilters::default();
        filters.update_categories(vec!["Succulent".into(), "Cactus".into()]);
        assert_eq!(
            names(filters.apply(&plants)),
            vec!["Aloe Vera", "Golden Barrel", "Echeveria"]
        );
    }

    #[test]
    fn search_and_stock_narrow_the_union() {
        let plants = catalog();
        let mut filters = StorefrontFilters::default();
        filters.update_categories(vec!["Succulent".into(), "Herb".into()]);
        filters.update_search_term("MEDIC");
        assert_eq!(names(filters.apply(&plants)), vec!["Aloe Vera", "Tulsi"]);

        filters.toggle_in_stock_only();
        assert_eq!(names(filters.apply(&plants)), vec!["Aloe Vera"]);
    }

    #[test]
    fn search_covers_scientific_name_and_description() {
        let plants = catalog();
        let mut filters = StorefrontFilters::default();
        filters.update_search_term("barbadensis");
        assert_eq!(names(filters.apply(&plants)), vec!["Aloe Vera"]);

        filters.update_search_term("basil");
        assert_eq!(names(filters.apply(&plants)), vec!["Tulsi"]);
    }

    #[test]
    fn clear_resets_every_filter() {
        let plants = catalog();
        let mut filters = StorefrontFilters::default();
        filters.update_search_term("nothing matches this");
        filters.toggle_in_stock_only();
        assert!(filters.apply(&plants).is_empty());

        filters.clear();
        assert_eq!(filters, StorefrontFilters::default());
        assert_eq!(filters.apply(&plants).len(), plants.len());
    }
}

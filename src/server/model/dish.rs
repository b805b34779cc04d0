use serde::{Deserialize, Serialize};
use crate::server::model::locale::{localized_field, FieldFamily, Locale, Localized, LocalizedText};

pub(crate) type DishId = i64;
/// Minor currency units.
pub(crate) type Price = i64;

/// Snapshot of a menu item taken when it enters the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DishRef {
    pub id: DishId,
    pub names: LocalizedText,
    #[serde(default)]
    pub descriptions: LocalizedText,
    pub image_path: Option<String>,
    pub unit_price: Price,
}

impl Localized for DishRef {
    fn field(&self, family: FieldFamily) -> Option<&LocalizedText> {
        match family {
            FieldFamily::Name => Some(&self.names),
            FieldFamily::Description => Some(&self.descriptions),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Category {
    pub id: i64,
    pub names: LocalizedText,
    pub children: Vec<Category>,
    pub dishes: Vec<DishRef>,
}

impl Localized for Category {
    fn field(&self, family: FieldFamily) -> Option<&LocalizedText> {
        match family {
            FieldFamily::Name => Some(&self.names),
            FieldFamily::Description => None,
        }
    }
}

impl Category {
    /// Depth-first lookup of a dish anywhere below this category.
    pub fn find_dish(&self, id: DishId) -> Option<&DishRef> {
        self.dishes
            .iter()
            .find(|d| d.id == id)
            .or_else(|| self.children.iter().find_map(|c| c.find_dish(id)))
    }
}

/// Immutable catalog, rebuilt on every fetch.
#[derive(Debug, Clone, Default)]
pub(crate) struct Menu {
    pub categories: Vec<Category>,
}

impl Menu {
    pub fn find_dish(&self, id: DishId) -> Option<&DishRef> {
        self.categories.iter().find_map(|c| c.find_dish(id))
    }
}

/// Dish as the backend sends it, one column per locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireDish {
    pub id: DishId,
    pub name_en: Option<String>,
    pub name_zh: Option<String>,
    pub name_ko: Option<String>,
    pub name_ja: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub description_zh: Option<String>,
    #[serde(default)]
    pub description_ko: Option<String>,
    #[serde(default)]
    pub description_ja: Option<String>,
    pub image_path: Option<String>,
    pub price: Price,
}

impl From<WireDish> for DishRef {
    fn from(w: WireDish) -> Self {
        Self {
            id: w.id,
            names: LocalizedText::new()
                .with(Locale::En, w.name_en)
                .with(Locale::Zh, w.name_zh)
                .with(Locale::Ko, w.name_ko)
                .with(Locale::Ja, w.name_ja),
            descriptions: LocalizedText::new()
                .with(Locale::En, w.description_en)
                .with(Locale::Zh, w.description_zh)
                .with(Locale::Ko, w.description_ko)
                .with(Locale::Ja, w.description_ja),
            image_path: w.image_path,
            unit_price: w.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireCategory {
    pub id: i64,
    pub name_en: Option<String>,
    pub name_zh: Option<String>,
    pub name_ko: Option<String>,
    pub name_ja: Option<String>,
    #[serde(default)]
    pub children: Vec<WireCategory>,
    #[serde(default)]
    pub dishes: Vec<WireDish>,
}

impl From<WireCategory> for Category {
    fn from(w: WireCategory) -> Self {
        Self {
            id: w.id,
            names: LocalizedText::new()
                .with(Locale::En, w.name_en)
                .with(Locale::Zh, w.name_zh)
                .with(Locale::Ko, w.name_ko)
                .with(Locale::Ja, w.name_ja),
            children: w.children.into_iter().map(Category::from).collect(),
            dishes: w.dishes.into_iter().map(DishRef::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMenuParams {
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMenuResponse {
    pub locale: Locale,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryView {
    pub id: i64,
    pub name: String,
    pub children: Vec<CategoryView>,
    pub dishes: Vec<DishView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DishView {
    pub id: DishId,
    pub name: String,
    pub description: String,
    pub image_path: Option<String>,
    pub unit_price: Price,
}

impl CategoryView {
    pub fn localize(category: &Category, locale: Locale) -> Self {
        Self {
            id: category.id,
            name: localized_field(category, locale, FieldFamily::Name),
            children: category.children.iter().map(|c| Self::localize(c, locale)).collect(),
            dishes: category.dishes.iter().map(|d| DishView::localize(d, locale)).collect(),
        }
    }
}

impl DishView {
    pub fn localize(dish: &DishRef, locale: Locale) -> Self {
        Self {
            id: dish.id,
            name: localized_field(dish, locale, FieldFamily::Name),
            description: localized_field(dish, locale, FieldFamily::Description),
            image_path: dish.image_path.clone(),
            unit_price: dish.unit_price,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn dish(id: DishId, unit_price: Price) -> DishRef {
        DishRef {
            id,
            names: LocalizedText::new().with(Locale::Ja, Some(format!("料理{id}"))),
            descriptions: LocalizedText::new(),
            image_path: None,
            unit_price,
        }
    }
}

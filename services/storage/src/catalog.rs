//! Seed food catalog
//!
//! A small fixed catalog spanning the three categories, used for local
//! runs and tests. Real deployments would load the catalog from an
//! upstream source; the matching core never depends on its contents.

use types::ids::ItemId;
use types::item::FoodItem;
use types::session::Category;

fn item(
    id: &str,
    name: &str,
    description: &str,
    category: Category,
    image: &str,
    rating: &str,
    tags: &[&str],
) -> FoodItem {
    FoodItem {
        id: ItemId::from(id),
        name: name.to_string(),
        description: description.to_string(),
        category,
        image: image.to_string(),
        rating: rating.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        cook_time: None,
        delivery_time: None,
        distance: None,
        price: None,
    }
}

/// The built-in sample catalog.
pub fn seed_items() -> Vec<FoodItem> {
    vec![
        FoodItem {
            cook_time: Some("25 min".to_string()),
            ..item(
                "tuscan-pasta",
                "Creamy Tuscan Pasta",
                "Creamy pasta with sun-dried tomatoes, spinach, and Italian herbs",
                Category::Cooking,
                "https://images.example.com/tuscan-pasta.jpg",
                "4.8",
                &["Italian", "Vegetarian"],
            )
        },
        FoodItem {
            cook_time: Some("20 min".to_string()),
            ..item(
                "truffle-burger",
                "Truffle Burger Deluxe",
                "Gourmet burger with truffle mayo and sweet potato fries",
                Category::Cooking,
                "https://images.example.com/truffle-burger.jpg",
                "4.6",
                &["American", "Comfort Food"],
            )
        },
        FoodItem {
            cook_time: Some("15 min".to_string()),
            ..item(
                "power-bowl",
                "Mediterranean Power Bowl",
                "Fresh salad with quinoa, chickpeas, and tahini dressing",
                Category::Cooking,
                "https://images.example.com/power-bowl.jpg",
                "4.7",
                &["Healthy", "Vegetarian"],
            )
        },
        FoodItem {
            delivery_time: Some("30-45 min".to_string()),
            price: Some("$24.99".to_string()),
            ..item(
                "dragon-roll",
                "Dragon Roll Sushi",
                "Fresh sushi rolls with eel, avocado, and spicy mayo",
                Category::Delivery,
                "https://images.example.com/dragon-roll.jpg",
                "4.9",
                &["Japanese", "Fresh"],
            )
        },
        FoodItem {
            delivery_time: Some("25-35 min".to_string()),
            price: Some("$16.99".to_string()),
            ..item(
                "thai-basil-chicken",
                "Spicy Thai Basil Chicken",
                "Authentic pad kra pao with jasmine rice",
                Category::Delivery,
                "https://images.example.com/thai-basil.jpg",
                "4.7",
                &["Thai", "Spicy"],
            )
        },
        FoodItem {
            distance: Some("0.8 miles".to_string()),
            price: Some("$$$".to_string()),
            ..item(
                "bistro-le-petit",
                "Bistro Le Petit",
                "Cozy French bistro with authentic cuisine",
                Category::DineOut,
                "https://images.example.com/bistro.jpg",
                "4.5",
                &["French", "Fine Dining"],
            )
        },
        FoodItem {
            distance: Some("1.2 miles".to_string()),
            price: Some("$$".to_string()),
            ..item(
                "local-gastropub",
                "The Local Gastropub",
                "Craft beer and elevated pub food",
                Category::DineOut,
                "https://images.example.com/gastropub.jpg",
                "4.3",
                &["American", "Casual"],
            )
        },
    ]
}

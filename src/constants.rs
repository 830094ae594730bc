pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const PAGE_TITLE: &str = "Calorie Compass";
pub const PAGE_ICON: &str = "🍎";

pub const IMAGE_FIELD_NAME: &str = "image";
pub const ACCEPTED_IMAGE_MIMES: &[&str] = &["image/jpeg", "image/png"];

pub const NO_RESPONSE_FALLBACK: &str = "No response generated.";

pub const ANALYSIS_PROMPT: &str = r#"
You are an expert nutritionist analyzing the food items in the image.
Start by determining if the image contains food items.
If the image does not contain any food items,
clearly state "No food items detected in the image."
and do not provide any calorie information.
If food items are detected,
start by naming the meal based on the image,
identify and list every ingredient you can find in the image,
and then estimate the total calories for each ingredient.

Summarize the total calories based on the identified ingredients.
Follow the format below:

If food items are detected:
Meal Name: [Name of the meal]

1. Ingredient 1 - estimated calories
2. Ingredient 2 - estimated calories
----
Total estimated calories: X

Finally, mention whether the food is healthy or not,
and provide the percentage split of protein, carbs, fibre, sugar and fats in the food item.

Also, mention the total fiber content in the food item and any other important details.

Provide a recommendation on how to modify the recipe if its unhealthy to a healthy one.

Note: Always identify ingredients and provide an estimated calorie count,
even if some details are uncertain.
"#;

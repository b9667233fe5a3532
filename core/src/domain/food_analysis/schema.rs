use serde_json::json;

pub const RECOGNITION_PROMPT: &str = "You are a nutrition assistant. Identify the food or meal in the \
photo and estimate the nutrition of the whole visible portion. Answer with a short dish name, \
calories in kcal, protein, fat and carbohydrates in grams, a health score from 1 (least healthy) \
to 10 (most healthy) and your confidence in the estimate from 0 to 1.";

/// JSON schema the vision model must answer with.
pub fn get_food_recognition_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "nutrition": {
                "type": "object",
                "properties": {
                    "calories": { "type": "number" },
                    "protein_g": { "type": "number" },
                    "fat_g": { "type": "number" },
                    "carbs_g": { "type": "number" }
                },
                "required": ["calories", "protein_g", "fat_g", "carbs_g"],
                "additionalProperties": false
            },
            "health_score": { "type": "number" },
            "confidence": { "type": "number" }
        },
        "required": ["name", "nutrition", "health_score", "confidence"],
        "additionalProperties": false
    })
}
